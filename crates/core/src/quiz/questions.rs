//! Static question sets for each quiz variant.

use serde::Serialize;

use super::QuizVariant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub label: &'static str,
    pub mapping: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u8,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

/// Question ids the engine reads for the skin routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkincareLayout {
    pub skin_type: u8,
    pub primary_concern: u8,
    pub secondary_concern: u8,
    pub sunscreen: u8,
    pub body_concern: u8,
}

/// Question ids the engine reads for the hair routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HaircareLayout {
    pub hair_type: u8,
    pub hair_concern: u8,
}

pub const SKINCARE_LAYOUT: SkincareLayout = SkincareLayout {
    skin_type: 1,
    primary_concern: 2,
    secondary_concern: 3,
    sunscreen: 4,
    body_concern: 5,
};

pub const HAIRCARE_LAYOUT: HaircareLayout = HaircareLayout { hair_type: 1, hair_concern: 2 };

/// The combined quiz appends the hair questions after the five skin questions.
pub const COMBINED_HAIR_LAYOUT: HaircareLayout = HaircareLayout { hair_type: 6, hair_concern: 7 };

const SKIN_TYPE_OPTIONS: &[AnswerOption] = &[
    AnswerOption { label: "Shiny by midday, visible pores", mapping: "Oily" },
    AnswerOption { label: "Tight or flaky after cleansing", mapping: "Dry" },
    AnswerOption { label: "Oily T-zone, dry cheeks", mapping: "Combination" },
    AnswerOption { label: "Comfortable most of the time", mapping: "Normal" },
    AnswerOption { label: "Reacts easily, prone to redness", mapping: "Sensitive" },
];

const CONCERN_OPTIONS: &[AnswerOption] = &[
    AnswerOption { label: "Dullness and uneven tone", mapping: "Brightening" },
    AnswerOption { label: "Fine lines and loss of firmness", mapping: "Anti-Wrinkle" },
    AnswerOption { label: "Breakouts and congestion", mapping: "Acne/Blemishes" },
    AnswerOption { label: "Dehydration and a weak barrier", mapping: "Barrier Repair/Hydration" },
    AnswerOption { label: "Puffiness and dark circles", mapping: "Eye Concerns" },
];

const SECONDARY_CONCERN_OPTIONS: &[AnswerOption] = &[
    AnswerOption { label: "Dullness and uneven tone", mapping: "Brightening" },
    AnswerOption { label: "Fine lines and loss of firmness", mapping: "Anti-Wrinkle" },
    AnswerOption { label: "Breakouts and congestion", mapping: "Acne/Blemishes" },
    AnswerOption { label: "Dehydration and a weak barrier", mapping: "Barrier Repair/Hydration" },
    AnswerOption { label: "Puffiness and dark circles", mapping: "Eye Concerns" },
    AnswerOption { label: "Nothing else", mapping: "None" },
];

const SUNSCREEN_OPTIONS: &[AnswerOption] = &[
    AnswerOption { label: "Mineral filters, sensitive-friendly", mapping: "Mineral SPF 30" },
    AnswerOption { label: "Invisible finish, high protection", mapping: "Chemical SPF 50" },
    AnswerOption { label: "A hint of tint", mapping: "Tinted SPF 30" },
];

const BODY_OPTIONS: &[AnswerOption] = &[
    AnswerOption { label: "Dry, tight skin", mapping: "Hydration" },
    AnswerOption { label: "Rough bumps and texture", mapping: "Smoothing" },
    AnswerOption { label: "Loss of firmness", mapping: "Firming" },
    AnswerOption { label: "Dark spots and uneven tone", mapping: "Even Tone" },
];

const HAIR_TYPE_OPTIONS: &[AnswerOption] = &[
    AnswerOption { label: "Straight", mapping: "Straight" },
    AnswerOption { label: "Wavy", mapping: "Wavy" },
    AnswerOption { label: "Curly", mapping: "Curly" },
    AnswerOption { label: "Coily", mapping: "Coily" },
];

const HAIR_CONCERN_OPTIONS: &[AnswerOption] = &[
    AnswerOption { label: "Shedding and thinning", mapping: "Anti-Hair Fall" },
    AnswerOption { label: "Flakes and an itchy scalp", mapping: "Dandruff" },
    AnswerOption { label: "Frizz and flyaways", mapping: "Frizz Control" },
    AnswerOption { label: "Keeping color vibrant", mapping: "Color Protection" },
    AnswerOption { label: "Dry, damaged lengths", mapping: "Dryness/Damage" },
];

const SKIN_TYPE: Question = Question {
    id: 1,
    prompt: "How does your skin feel by the afternoon?",
    options: SKIN_TYPE_OPTIONS,
};
const PRIMARY_CONCERN: Question =
    Question { id: 2, prompt: "What is your main skin concern?", options: CONCERN_OPTIONS };
const SECONDARY_CONCERN: Question = Question {
    id: 3,
    prompt: "Anything else you would like to work on?",
    options: SECONDARY_CONCERN_OPTIONS,
};
const SUNSCREEN: Question =
    Question { id: 4, prompt: "Which sunscreen do you prefer?", options: SUNSCREEN_OPTIONS };
const BODY: Question =
    Question { id: 5, prompt: "What does your body skin need most?", options: BODY_OPTIONS };

const SKINCARE_QUESTIONS: &[Question] =
    &[SKIN_TYPE, PRIMARY_CONCERN, SECONDARY_CONCERN, SUNSCREEN, BODY];

const HAIRCARE_QUESTIONS: &[Question] = &[
    Question { id: 1, prompt: "What is your hair type?", options: HAIR_TYPE_OPTIONS },
    Question { id: 2, prompt: "What is your main hair concern?", options: HAIR_CONCERN_OPTIONS },
];

const COMBINED_QUESTIONS: &[Question] = &[
    SKIN_TYPE,
    PRIMARY_CONCERN,
    SECONDARY_CONCERN,
    SUNSCREEN,
    BODY,
    Question { id: 6, prompt: "What is your hair type?", options: HAIR_TYPE_OPTIONS },
    Question { id: 7, prompt: "What is your main hair concern?", options: HAIR_CONCERN_OPTIONS },
];

pub fn questions(variant: QuizVariant) -> &'static [Question] {
    match variant {
        QuizVariant::Skincare => SKINCARE_QUESTIONS,
        QuizVariant::Haircare => HAIRCARE_QUESTIONS,
        QuizVariant::Combined => COMBINED_QUESTIONS,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{questions, COMBINED_HAIR_LAYOUT, HAIRCARE_LAYOUT, SKINCARE_LAYOUT};
    use crate::quiz::tags::{
        BodyConcern, HairConcern, HairType, SecondaryConcern, SkinConcern, SkinType,
        SunscreenFormula,
    };
    use crate::quiz::QuizVariant;

    #[test]
    fn question_ids_are_one_based_and_sequential() {
        for variant in QuizVariant::ALL {
            let ids = questions(*variant).iter().map(|question| question.id).collect::<Vec<_>>();
            let expected = (1..=ids.len() as u8).collect::<Vec<_>>();
            assert_eq!(ids, expected, "{variant:?} ids");
        }
    }

    #[test]
    fn every_option_mapping_parses_for_its_question() {
        let skin = SKINCARE_LAYOUT;
        for question in questions(QuizVariant::Combined) {
            for option in question.options {
                let parsed = match question.id {
                    id if id == skin.skin_type => option.mapping.parse::<SkinType>().is_ok(),
                    id if id == skin.primary_concern => {
                        option.mapping.parse::<SkinConcern>().is_ok()
                    }
                    id if id == skin.secondary_concern => {
                        option.mapping.parse::<SecondaryConcern>().is_ok()
                    }
                    id if id == skin.sunscreen => {
                        option.mapping.parse::<SunscreenFormula>().is_ok()
                    }
                    id if id == skin.body_concern => option.mapping.parse::<BodyConcern>().is_ok(),
                    id if id == COMBINED_HAIR_LAYOUT.hair_type => {
                        option.mapping.parse::<HairType>().is_ok()
                    }
                    id if id == COMBINED_HAIR_LAYOUT.hair_concern => {
                        option.mapping.parse::<HairConcern>().is_ok()
                    }
                    _ => false,
                };
                assert!(parsed, "question {} option `{}`", question.id, option.mapping);
            }
        }
    }

    #[test]
    fn haircare_layout_matches_haircare_questions() {
        let ids = questions(QuizVariant::Haircare)
            .iter()
            .map(|question| question.id)
            .collect::<BTreeSet<_>>();
        assert!(ids.contains(&HAIRCARE_LAYOUT.hair_type));
        assert!(ids.contains(&HAIRCARE_LAYOUT.hair_concern));
    }
}
