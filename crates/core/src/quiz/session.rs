use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::answers::{Answer, AnswerSet};
use super::questions::{questions, Question};
use super::QuizVariant;
use crate::recommend::{RecommendationBundle, RecommendationEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizState {
    InProgress { index: usize },
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizEvent {
    /// Picks option `option` (0-based) of the current question.
    Answered { option: usize },
    WentBack,
    Reset,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizTransition {
    pub from: QuizState,
    pub to: QuizState,
    pub event: QuizEvent,
    pub answered: Option<Answer>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("option {option} is out of range for question {question_id} ({available} options)")]
    OptionOutOfRange { question_id: u8, option: usize, available: usize },
    #[error("quiz is already completed; go back or reset to change answers")]
    AlreadyCompleted,
    #[error("already at the first question")]
    AtFirstQuestion,
    #[error("quiz is not completed yet ({answered} of {total} questions answered)")]
    NotCompleted { answered: usize, total: usize },
}

/// Walks one quiz variant question by question and produces a bundle once
/// the last question is answered.
#[derive(Clone, Debug)]
pub struct QuizSession {
    variant: QuizVariant,
    questions: &'static [Question],
    state: QuizState,
    answers: AnswerSet,
    bundle: Option<RecommendationBundle>,
}

impl QuizSession {
    pub fn new(variant: QuizVariant) -> Self {
        Self {
            variant,
            questions: questions(variant),
            state: QuizState::InProgress { index: 0 },
            answers: AnswerSet::new(),
            bundle: None,
        }
    }

    pub fn variant(&self) -> QuizVariant {
        self.variant
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_completed(&self) -> bool {
        self.state == QuizState::Completed
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.state {
            QuizState::InProgress { index } => self.questions.get(index),
            QuizState::Completed => None,
        }
    }

    /// Fraction of questions answered, as `(answered, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.answers.len(), self.questions.len())
    }

    pub fn bundle(&self) -> Result<&RecommendationBundle, QuizError> {
        self.bundle.as_ref().ok_or(QuizError::NotCompleted {
            answered: self.answers.len(),
            total: self.questions.len(),
        })
    }

    pub fn apply(
        &mut self,
        event: QuizEvent,
        engine: &RecommendationEngine,
    ) -> Result<QuizTransition, QuizError> {
        let from = self.state.clone();
        let mut answered = None;

        let to = match (&self.state, &event) {
            (QuizState::Completed, QuizEvent::Answered { .. }) => {
                return Err(QuizError::AlreadyCompleted);
            }
            (QuizState::InProgress { index }, QuizEvent::Answered { option }) => {
                let index = *index;
                let answer = self.select(index, *option)?;
                self.answers.record(answer.clone());
                answered = Some(answer);

                if index + 1 < self.questions.len() {
                    QuizState::InProgress { index: index + 1 }
                } else {
                    let bundle = engine.recommend(self.variant, &self.answers);
                    info!(
                        event_name = "quiz.completed",
                        variant = self.variant.as_str(),
                        recommendations = bundle.iter().count(),
                        unfilled = bundle.unfilled.len(),
                        "quiz completed and recommendations generated"
                    );
                    self.bundle = Some(bundle);
                    QuizState::Completed
                }
            }
            (QuizState::InProgress { index: 0 }, QuizEvent::WentBack) => {
                return Err(QuizError::AtFirstQuestion);
            }
            (QuizState::InProgress { index }, QuizEvent::WentBack) => {
                QuizState::InProgress { index: index - 1 }
            }
            (QuizState::Completed, QuizEvent::WentBack) => {
                self.bundle = None;
                QuizState::InProgress { index: self.questions.len().saturating_sub(1) }
            }
            (_, QuizEvent::Reset) => {
                self.answers.clear();
                self.bundle = None;
                QuizState::InProgress { index: 0 }
            }
        };

        self.state = to.clone();
        Ok(QuizTransition { from, to, event, answered })
    }

    fn select(&self, index: usize, option: usize) -> Result<Answer, QuizError> {
        let question = &self.questions[index];
        let chosen = question.options.get(option).ok_or(QuizError::OptionOutOfRange {
            question_id: question.id,
            option,
            available: question.options.len(),
        })?;

        Ok(Answer::new(question.id, chosen.label, chosen.mapping))
    }
}

#[cfg(test)]
mod tests {
    use super::{QuizError, QuizEvent, QuizSession, QuizState};
    use crate::quiz::QuizVariant;
    use crate::recommend::{RecommendationEngine, RoutineSlot};

    fn answer_all(session: &mut QuizSession, engine: &RecommendationEngine, options: &[usize]) {
        for option in options {
            session.apply(QuizEvent::Answered { option: *option }, engine).expect("valid option");
        }
    }

    #[test]
    fn completing_the_skincare_quiz_produces_a_bundle() {
        let engine = RecommendationEngine::default();
        let mut session = QuizSession::new(QuizVariant::Skincare);

        // Dry, Barrier Repair/Hydration, None, Mineral SPF 30, Hydration
        answer_all(&mut session, &engine, &[1, 3, 5, 0, 0]);

        assert!(session.is_completed());
        let bundle = session.bundle().expect("bundle after completion");
        assert_eq!(
            bundle.in_slot(RoutineSlot::MoisturizerAm).map(|r| r.product.as_str()),
            Some("Face Cream - Barrier Repair")
        );
        assert_eq!(session.progress(), (5, 5));
    }

    #[test]
    fn bundle_is_unavailable_until_the_last_answer() {
        let engine = RecommendationEngine::default();
        let mut session = QuizSession::new(QuizVariant::Haircare);
        answer_all(&mut session, &engine, &[2]);

        assert_eq!(session.bundle(), Err(QuizError::NotCompleted { answered: 1, total: 2 }));
        assert_eq!(session.current_question().map(|question| question.id), Some(2));
    }

    #[test]
    fn out_of_range_option_is_rejected_without_advancing() {
        let engine = RecommendationEngine::default();
        let mut session = QuizSession::new(QuizVariant::Haircare);

        let error = session
            .apply(QuizEvent::Answered { option: 9 }, &engine)
            .expect_err("only four hair types");
        assert_eq!(error, QuizError::OptionOutOfRange { question_id: 1, option: 9, available: 4 });
        assert_eq!(session.state(), &QuizState::InProgress { index: 0 });
    }

    #[test]
    fn going_back_and_reanswering_overwrites_the_answer() {
        let engine = RecommendationEngine::default();
        let mut session = QuizSession::new(QuizVariant::Haircare);
        answer_all(&mut session, &engine, &[0, 0]);

        let back = session.apply(QuizEvent::WentBack, &engine).expect("back from completed");
        assert_eq!(back.to, QuizState::InProgress { index: 1 });
        assert!(session.bundle().is_err());

        session.apply(QuizEvent::Answered { option: 1 }, &engine).expect("reanswer");
        let concern = session.answers().get(2).and_then(|answer| answer.mapping.clone());
        assert_eq!(concern.as_deref(), Some("Dandruff"));
        assert_eq!(session.answers().len(), 2);
        assert!(session.is_completed());
    }

    #[test]
    fn going_back_from_the_first_question_is_rejected() {
        let engine = RecommendationEngine::default();
        let mut session = QuizSession::new(QuizVariant::Skincare);
        assert_eq!(session.apply(QuizEvent::WentBack, &engine), Err(QuizError::AtFirstQuestion));
    }

    #[test]
    fn answering_after_completion_is_rejected() {
        let engine = RecommendationEngine::default();
        let mut session = QuizSession::new(QuizVariant::Haircare);
        answer_all(&mut session, &engine, &[0, 0]);

        assert_eq!(
            session.apply(QuizEvent::Answered { option: 0 }, &engine),
            Err(QuizError::AlreadyCompleted)
        );
    }

    #[test]
    fn reset_discards_answers_and_bundle() {
        let engine = RecommendationEngine::default();
        let mut session = QuizSession::new(QuizVariant::Haircare);
        answer_all(&mut session, &engine, &[3, 4]);

        let reset = session.apply(QuizEvent::Reset, &engine).expect("reset");
        assert_eq!(reset.from, QuizState::Completed);
        assert_eq!(reset.to, QuizState::InProgress { index: 0 });
        assert!(session.answers().is_empty());
        assert!(session.bundle().is_err());
    }
}
