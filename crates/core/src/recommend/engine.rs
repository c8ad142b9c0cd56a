//! Quiz answers to routine recommendations.

use tracing::debug;

use super::table::{
    KeyPart, Literal, LookupSlot, ProductMappingTable, RecommendationTemplate, TableKey,
    EXFOLIATING_SCRUB, LIP_PLUMPING, LIP_REPAIR,
};
use super::types::{
    Recommendation, RecommendationBundle, RoutineSlot, SkincareRoutine, UnfilledSlot,
};
use crate::quiz::answers::{AnswerSet, TagValue};
use crate::quiz::questions::{
    HaircareLayout, SkincareLayout, COMBINED_HAIR_LAYOUT, HAIRCARE_LAYOUT, SKINCARE_LAYOUT,
};
use crate::quiz::tags::{
    BodyConcern, HairConcern, HairType, MappingTag, SecondaryConcern, SkinConcern, SkinType,
    SunscreenFormula,
};
use crate::quiz::QuizVariant;

/// Fallback tags for unanswered questions.
pub const DEFAULT_SKIN_TYPE: SkinType = SkinType::Normal;
pub const DEFAULT_PRIMARY_CONCERN: SkinConcern = SkinConcern::Brightening;
pub const DEFAULT_SECONDARY_CONCERN: SecondaryConcern = SecondaryConcern::None;
pub const DEFAULT_SUNSCREEN: SunscreenFormula = SunscreenFormula::MineralSpf30;
pub const DEFAULT_BODY_CONCERN: BodyConcern = BodyConcern::Hydration;
pub const DEFAULT_HAIR_TYPE: HairType = HairType::Straight;
pub const DEFAULT_HAIR_CONCERN: HairConcern = HairConcern::DrynessDamage;

/// Deterministic recommendation engine over a mapping table.
///
/// Never fails: slots whose key cannot be resolved are left out of the
/// bundle and listed in [`RecommendationBundle::unfilled`].
#[derive(Clone, Debug, Default)]
pub struct RecommendationEngine {
    table: ProductMappingTable,
}

impl RecommendationEngine {
    pub fn new(table: ProductMappingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ProductMappingTable {
        &self.table
    }

    pub fn recommend(&self, variant: QuizVariant, answers: &AnswerSet) -> RecommendationBundle {
        let mut bundle = match variant {
            QuizVariant::Skincare => self.skincare(answers),
            QuizVariant::Haircare => self.haircare(answers),
            QuizVariant::Combined => {
                let mut bundle = self.skincare(answers);
                let hair = self.hair_bundle(answers, COMBINED_HAIR_LAYOUT);
                bundle.haircare = hair.haircare;
                bundle.unfilled.extend(hair.unfilled);
                bundle
            }
        };
        bundle.variant = Some(variant);
        bundle
    }

    /// Skin, body and lip recommendations from the five skincare questions.
    pub fn skincare(&self, answers: &AnswerSet) -> RecommendationBundle {
        self.skin_bundle(answers, SKINCARE_LAYOUT)
    }

    /// Hair recommendations from the two haircare questions.
    pub fn haircare(&self, answers: &AnswerSet) -> RecommendationBundle {
        self.hair_bundle(answers, HAIRCARE_LAYOUT)
    }

    fn skin_bundle(&self, answers: &AnswerSet, layout: SkincareLayout) -> RecommendationBundle {
        let skin_type = answers.tag_or(layout.skin_type, DEFAULT_SKIN_TYPE);
        let primary = answers.tag_or(layout.primary_concern, DEFAULT_PRIMARY_CONCERN);
        let secondary = answers.tag_or(layout.secondary_concern, DEFAULT_SECONDARY_CONCERN);
        let sunscreen = answers.tag_or(layout.sunscreen, DEFAULT_SUNSCREEN);
        let body = answers.tag_or(layout.body_concern, DEFAULT_BODY_CONCERN);

        let mut composer = Composer::new(&self.table);
        let mut routine = SkincareRoutine::default();

        if let Some(cleanser) =
            composer.fill(LookupSlot::Cleanser, KeyInput::tag(&skin_type), KeyInput::tag(&primary))
        {
            routine.am.push(cleanser.place(RoutineSlot::CleanserAm));
            routine.pm.push(cleanser.place(RoutineSlot::CleanserPm));
        }

        composer.treatment(&primary, &mut routine);
        match secondary {
            TagValue::Known(SecondaryConcern::Concern(concern))
                if primary.known() != Some(concern) =>
            {
                composer.treatment(&TagValue::Known(concern), &mut routine);
            }
            TagValue::Unrecognized(raw) => {
                composer.treatment(&TagValue::<SkinConcern>::Unrecognized(raw), &mut routine);
            }
            TagValue::Known(_) => {}
        }

        if let Some(moisturizer) = composer.fill(
            LookupSlot::Moisturizer,
            KeyInput::tag(&skin_type),
            KeyInput::tag(&primary),
        ) {
            routine.am.push(moisturizer.place(RoutineSlot::MoisturizerAm));
            routine.pm.push(moisturizer.place(RoutineSlot::MoisturizerPm));
        }

        if let Some(spf) = composer.fill(
            LookupSlot::Sunscreen,
            KeyInput::tag(&sunscreen),
            KeyInput::literal(Literal::Sunscreen),
        ) {
            routine.am.push(spf.place(RoutineSlot::SunscreenAm));
        }

        if let Some(mask) = composer.fill(
            LookupSlot::FaceMask,
            KeyInput::tag(&skin_type),
            KeyInput::literal(Literal::Mask),
        ) {
            routine.weekly.push(mask.place(RoutineSlot::MaskWeekly));
        }
        routine.weekly.push(EXFOLIATING_SCRUB.place(RoutineSlot::ScrubWeekly));

        let mut bodycare = Vec::new();
        if let Some(wash) = composer.fill(
            LookupSlot::BodyWash,
            KeyInput::tag(&body),
            KeyInput::literal(Literal::BodyWash),
        ) {
            bodycare.push(wash.place(RoutineSlot::BodyWash));
        }
        if let Some(lotion) = composer.fill(
            LookupSlot::BodyMoisturizer,
            KeyInput::tag(&body),
            KeyInput::literal(Literal::BodyLotion),
        ) {
            bodycare.push(lotion.place(RoutineSlot::BodyMoisturizer));
        }

        let lipcare = vec![
            LIP_REPAIR.place(RoutineSlot::LipCareNight),
            LIP_PLUMPING.place(RoutineSlot::LipCareDay),
        ];

        RecommendationBundle {
            variant: Some(QuizVariant::Skincare),
            skincare: Some(routine),
            bodycare: Some(bodycare),
            lipcare: Some(lipcare),
            haircare: None,
            unfilled: composer.finish(),
        }
    }

    fn hair_bundle(&self, answers: &AnswerSet, layout: HaircareLayout) -> RecommendationBundle {
        let hair_type = answers.tag_or(layout.hair_type, DEFAULT_HAIR_TYPE);
        let concern = answers.tag_or(layout.hair_concern, DEFAULT_HAIR_CONCERN);

        let mut composer = Composer::new(&self.table);
        let mut haircare = Vec::new();

        let steps = [
            (
                LookupSlot::Shampoo,
                RoutineSlot::Shampoo,
                KeyInput::tag(&concern),
                KeyInput::literal(Literal::Shampoo),
            ),
            (
                LookupSlot::Conditioner,
                RoutineSlot::Conditioner,
                KeyInput::tag(&hair_type),
                KeyInput::tag(&concern),
            ),
            (
                LookupSlot::HairMask,
                RoutineSlot::HairMask,
                KeyInput::tag(&concern),
                KeyInput::literal(Literal::Mask),
            ),
            (
                LookupSlot::ScalpTreatment,
                RoutineSlot::ScalpTreatment,
                KeyInput::tag(&concern),
                KeyInput::tag(&hair_type),
            ),
        ];

        for (lookup, slot, primary, secondary) in steps {
            if let Some(template) = composer.fill(lookup, primary, secondary) {
                haircare.push(template.place(slot));
            }
        }

        RecommendationBundle {
            haircare: Some(haircare),
            unfilled: composer.finish(),
            ..RecommendationBundle::empty(QuizVariant::Haircare)
        }
    }
}

/// One half of a key: the typed part when the tag was recognised, plus the
/// text used to report the key when it cannot be resolved.
struct KeyInput {
    part: Option<KeyPart>,
    text: String,
}

impl KeyInput {
    fn tag<T>(value: &TagValue<T>) -> Self
    where
        T: Copy + ToString + Into<MappingTag>,
    {
        Self { part: value.known().map(|tag| KeyPart::Tag(tag.into())), text: value.render() }
    }

    fn literal(literal: Literal) -> Self {
        Self { part: Some(KeyPart::Literal(literal)), text: literal.as_str().to_owned() }
    }
}

struct Composer<'t> {
    table: &'t ProductMappingTable,
    unfilled: Vec<UnfilledSlot>,
}

impl<'t> Composer<'t> {
    fn new(table: &'t ProductMappingTable) -> Self {
        Self { table, unfilled: Vec::new() }
    }

    fn fill(
        &mut self,
        slot: LookupSlot,
        primary: KeyInput,
        secondary: KeyInput,
    ) -> Option<&'t RecommendationTemplate> {
        let resolved = match primary.part {
            Some(KeyPart::Tag(primary_tag)) => {
                let key =
                    TableKey::new(slot, primary_tag, secondary.part.unwrap_or(KeyPart::Wildcard));
                self.table.resolve(&key).map(|resolution| resolution.template)
            }
            _ => None,
        };

        if resolved.is_none() {
            let key = format!("{}+{}", primary.text, secondary.text);
            debug!(
                event_name = "recommend.slot_unfilled",
                slot = slot.as_str(),
                key = key.as_str(),
                "no mapping for composed key; slot left empty"
            );
            self.unfilled.push(UnfilledSlot { slot, key });
        }

        resolved
    }

    /// Serum for most concerns (AM for brightening, PM otherwise); eye
    /// concerns get an AM and a PM eye product instead.
    fn treatment(&mut self, concern: &TagValue<SkinConcern>, routine: &mut SkincareRoutine) {
        if concern.known() == Some(SkinConcern::EyeConcerns) {
            if let Some(eye) = self.fill(
                LookupSlot::EyeCare,
                KeyInput::tag(concern),
                KeyInput::literal(Literal::EyeAm),
            ) {
                routine.am.push(eye.place(RoutineSlot::EyeCareAm));
            }
            if let Some(eye) = self.fill(
                LookupSlot::EyeCare,
                KeyInput::tag(concern),
                KeyInput::literal(Literal::EyePm),
            ) {
                routine.pm.push(eye.place(RoutineSlot::EyeCarePm));
            }
            return;
        }

        if let Some(serum) =
            self.fill(LookupSlot::Serum, KeyInput::tag(concern), KeyInput::literal(Literal::Serum))
        {
            if concern.known() == Some(SkinConcern::Brightening) {
                routine.am.push(serum.place(RoutineSlot::SerumAm));
            } else {
                routine.pm.push(serum.place(RoutineSlot::SerumPm));
            }
        }
    }

    fn finish(self) -> Vec<UnfilledSlot> {
        self.unfilled
    }
}

impl RecommendationTemplate {
    fn place(&self, slot: RoutineSlot) -> Recommendation {
        Recommendation { product: self.product.to_owned(), slot, reason: self.reason.to_owned() }
    }
}

#[cfg(test)]
mod tests {
    use super::RecommendationEngine;
    use crate::quiz::answers::{Answer, AnswerSet};
    use crate::quiz::QuizVariant;
    use crate::recommend::table::LookupSlot;
    use crate::recommend::types::{RecommendationBundle, RoutineSlot, UnfilledSlot};

    fn skincare(tags: &[(u8, &str)]) -> RecommendationBundle {
        let answers =
            tags.iter().fold(AnswerSet::new(), |answers, (id, tag)| answers.with_tag(*id, *tag));
        RecommendationEngine::default().recommend(QuizVariant::Skincare, &answers)
    }

    fn products(recommendations: &[crate::recommend::Recommendation]) -> Vec<&str> {
        recommendations.iter().map(|recommendation| recommendation.product.as_str()).collect()
    }

    #[test]
    fn dry_barrier_repair_routine_end_to_end() {
        let bundle = skincare(&[
            (1, "Dry"),
            (2, "Barrier Repair/Hydration"),
            (3, "None"),
            (4, "Mineral SPF 30"),
            (5, "Hydration"),
        ]);

        let cleanser_am = bundle.in_slot(RoutineSlot::CleanserAm).expect("am cleanser");
        let cleanser_pm = bundle.in_slot(RoutineSlot::CleanserPm).expect("pm cleanser");
        assert_eq!(cleanser_am.product, "Cleanser - Gentle Sensitive Wash");
        assert_eq!(cleanser_pm.product, cleanser_am.product);

        assert_eq!(
            bundle.in_slot(RoutineSlot::MoisturizerAm).map(|r| r.product.as_str()),
            Some("Face Cream - Barrier Repair")
        );
        assert_eq!(
            bundle.in_slot(RoutineSlot::MoisturizerPm).map(|r| r.product.as_str()),
            Some("Face Cream - Barrier Repair")
        );
        assert_eq!(
            bundle.in_slot(RoutineSlot::SunscreenAm).map(|r| r.product.as_str()),
            Some("Sunscreen - Mineral SPF 30")
        );
        assert!(products(bundle.bodycare()).contains(&"Body Moisturizer - Hydration Glow Lotion"));
        assert_eq!(bundle.lipcare().len(), 2);
        assert!(bundle.unfilled.is_empty());
    }

    #[test]
    fn am_routine_keeps_cleanse_treat_moisturize_protect_order() {
        let bundle = skincare(&[(1, "Oily"), (2, "Brightening"), (4, "Chemical SPF 50")]);
        let slots = bundle.am().iter().map(|r| r.slot).collect::<Vec<_>>();

        assert_eq!(
            slots,
            vec![
                RoutineSlot::CleanserAm,
                RoutineSlot::SerumAm,
                RoutineSlot::MoisturizerAm,
                RoutineSlot::SunscreenAm
            ]
        );
    }

    #[test]
    fn same_answers_give_identical_bundles() {
        let tags = [(1, "Combination"), (2, "Acne/Blemishes"), (3, "Eye Concerns"), (5, "Firming")];
        assert_eq!(skincare(&tags), skincare(&tags));
    }

    #[test]
    fn lip_care_is_always_the_two_balms() {
        for tags in [vec![], vec![(1, "Oily"), (2, "Anti-Wrinkle")], vec![(1, "Nonsense")]] {
            let bundle = skincare(&tags);
            assert_eq!(
                products(bundle.lipcare()),
                vec!["Lip Balm - Overnight Repair", "Lip Balm - Plumping Peptide"]
            );
        }
    }

    #[test]
    fn weekly_always_contains_the_exfoliating_scrub() {
        for tags in [vec![], vec![(1, "Sensitive")], vec![(1, "Glassy"), (2, "Glow")]] {
            let bundle = skincare(&tags);
            assert!(products(bundle.weekly()).contains(&"Scrub - Gentle Exfoliating"));
        }
    }

    #[test]
    fn missing_skin_type_behaves_as_normal() {
        let bundle = skincare(&[(2, "Brightening")]);

        assert_eq!(
            bundle.in_slot(RoutineSlot::CleanserAm).map(|r| r.product.as_str()),
            Some("Cleanser - Daily Balancing Wash")
        );
        assert_eq!(bundle, skincare(&[(1, "Normal"), (2, "Brightening")]));
    }

    #[test]
    fn unanswered_quiz_uses_every_fallback() {
        let bundle = skincare(&[]);

        assert_eq!(
            bundle.in_slot(RoutineSlot::SerumAm).map(|r| r.product.as_str()),
            Some("Serum - Vitamin C Brightening")
        );
        assert_eq!(
            bundle.in_slot(RoutineSlot::SunscreenAm).map(|r| r.product.as_str()),
            Some("Sunscreen - Mineral SPF 30")
        );
        assert_eq!(
            products(bundle.bodycare()),
            vec!["Body Wash - Hydrating Cream Wash", "Body Moisturizer - Hydration Glow Lotion"]
        );
        assert!(bundle.unfilled.is_empty());
    }

    #[test]
    fn secondary_concern_adds_a_second_treatment() {
        let bundle = skincare(&[(1, "Normal"), (2, "Anti-Wrinkle"), (3, "Brightening")]);

        assert!(products(bundle.pm()).contains(&"Serum - Retinol Renewal"));
        assert!(products(bundle.am()).contains(&"Serum - Vitamin C Brightening"));
    }

    #[test]
    fn secondary_concern_matching_primary_adds_nothing() {
        let with_duplicate = skincare(&[(1, "Dry"), (2, "Anti-Wrinkle"), (3, "Anti-Wrinkle")]);
        let without = skincare(&[(1, "Dry"), (2, "Anti-Wrinkle"), (3, "None")]);
        assert_eq!(with_duplicate, without);
    }

    #[test]
    fn eye_concerns_emit_am_and_pm_eye_care() {
        for tags in [vec![(2, "Eye Concerns")], vec![(2, "Acne/Blemishes"), (3, "Eye Concerns")]] {
            let bundle = skincare(&tags);
            assert_eq!(
                bundle.in_slot(RoutineSlot::EyeCareAm).map(|r| r.product.as_str()),
                Some("Eye Cream - Caffeine Depuffing")
            );
            assert_eq!(
                bundle.in_slot(RoutineSlot::EyeCarePm).map(|r| r.product.as_str()),
                Some("Eye Cream - Peptide Night Repair")
            );
        }
    }

    #[test]
    fn unknown_tags_leave_slots_empty_and_are_reported() {
        let bundle = skincare(&[(1, "Glassy"), (2, "Brightening"), (5, "Sparkle")]);

        assert!(bundle.in_slot(RoutineSlot::CleanserAm).is_none());
        assert!(bundle.in_slot(RoutineSlot::MoisturizerAm).is_none());
        assert!(bundle.in_slot(RoutineSlot::MaskWeekly).is_none());
        assert!(bundle.bodycare().is_empty());
        assert!(bundle.in_slot(RoutineSlot::SerumAm).is_some());

        let keys = bundle.unfilled.iter().map(|slot| slot.key.as_str()).collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                "Glassy+Brightening",
                "Glassy+Brightening",
                "Glassy+Mask",
                "Sparkle+BodyWash",
                "Sparkle+BodyLotion"
            ]
        );
        assert_eq!(bundle.unfilled[0].slot, LookupSlot::Cleanser);
    }

    #[test]
    fn unknown_secondary_concern_is_reported_and_primary_kept() {
        let bundle = skincare(&[(1, "Dry"), (2, "Anti-Wrinkle"), (3, "Sparkle")]);

        assert_eq!(
            bundle.in_slot(RoutineSlot::SerumPm).map(|r| r.product.as_str()),
            Some("Serum - Retinol Renewal")
        );
        assert_eq!(products(bundle.pm()).iter().filter(|p| p.starts_with("Serum")).count(), 1);
        assert_eq!(
            bundle.unfilled,
            vec![UnfilledSlot { slot: LookupSlot::Serum, key: "Sparkle+Serum".to_owned() }]
        );
    }

    #[test]
    fn unknown_concern_still_reaches_the_skin_type_wildcard() {
        let bundle = skincare(&[(1, "Oily"), (2, "Glow")]);

        assert_eq!(
            bundle.in_slot(RoutineSlot::CleanserAm).map(|r| r.product.as_str()),
            Some("Cleanser - Foaming Gel Wash")
        );
        assert!(bundle.in_slot(RoutineSlot::SerumAm).is_none());
        assert!(bundle.in_slot(RoutineSlot::SerumPm).is_none());
        assert!(bundle.unfilled.iter().any(|slot| slot.key == "Glow+Serum"));
    }

    #[test]
    fn haircare_routine_uses_concern_and_type() {
        let answers = AnswerSet::new().with_tag(1, "Curly").with_tag(2, "Frizz Control");
        let bundle = RecommendationEngine::default().recommend(QuizVariant::Haircare, &answers);

        assert_eq!(
            products(bundle.haircare()),
            vec![
                "Shampoo - Smoothing Keratin",
                "Conditioner - Curl Moisture",
                "Hair Mask - Deep Smoothing",
                "Leave-In - Curl Defining Cream"
            ]
        );
        assert!(bundle.skincare.is_none());
        assert!(bundle.lipcare().is_empty());
    }

    #[test]
    fn haircare_scalp_concerns_use_the_wildcard_treatment() {
        let answers = AnswerSet::new().with_tag(1, "Straight").with_tag(2, "Anti-Hair Fall");
        let bundle = RecommendationEngine::default().haircare(&answers);

        assert_eq!(
            bundle.in_slot(RoutineSlot::ScalpTreatment).map(|r| r.product.as_str()),
            Some("Scalp Serum - Anti-Hair Fall")
        );
    }

    #[test]
    fn combined_variant_reads_hair_answers_from_questions_six_and_seven() {
        let mut answers = AnswerSet::new().with_tag(1, "Dry").with_tag(2, "Anti-Wrinkle");
        answers.record(Answer::new(6, "Coily", "Coily"));
        answers.record(Answer::new(7, "Dry, damaged lengths", "Dryness/Damage"));

        let bundle = RecommendationEngine::default().recommend(QuizVariant::Combined, &answers);

        assert_eq!(bundle.variant, Some(QuizVariant::Combined));
        assert_eq!(bundle.lipcare().len(), 2);
        assert_eq!(
            bundle.in_slot(RoutineSlot::Conditioner).map(|r| r.product.as_str()),
            Some("Conditioner - Rich Repair")
        );
        assert_eq!(
            bundle.in_slot(RoutineSlot::MoisturizerPm).map(|r| r.product.as_str()),
            Some("Face Cream - Peptide Firming")
        );
    }

    #[test]
    fn skincare_json_has_only_skin_body_and_lip_sections() {
        let bundle = skincare(&[(1, "Dry")]);
        let json = serde_json::to_value(&bundle).expect("serialize bundle");
        let object = json.as_object().expect("object");

        let mut keys = object.keys().map(String::as_str).collect::<Vec<_>>();
        keys.sort_unstable();
        assert_eq!(keys, vec!["bodycare", "lipcare", "skincare"]);
        assert_eq!(json["skincare"]["am"][0]["slot"], "Cleanser (AM)");
        assert_eq!(json["lipcare"][0]["product"], "Lip Balm - Overnight Repair");
    }
}
