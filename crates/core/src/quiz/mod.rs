//! Recommendation quiz: question sets, recorded answers, and the session
//! state holder that hands a finished answer set to the engine.

pub mod answers;
pub mod questions;
pub mod session;
pub mod tags;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use answers::{Answer, AnswerSet, TagValue};
pub use questions::{questions, AnswerOption, Question};
pub use session::{QuizError, QuizEvent, QuizSession, QuizState, QuizTransition};
pub use tags::{
    BodyConcern, HairConcern, HairType, MappingTag, SecondaryConcern, SkinConcern, SkinType,
    SunscreenFormula, UnknownTag,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizVariant {
    Skincare,
    Haircare,
    /// Legacy single quiz covering skin, body, lip and hair.
    Combined,
}

impl QuizVariant {
    pub const ALL: &'static [QuizVariant] = &[Self::Skincare, Self::Haircare, Self::Combined];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skincare => "skincare",
            Self::Haircare => "haircare",
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for QuizVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizVariant {
    type Err = UnknownTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skincare" => Ok(Self::Skincare),
            "haircare" => Ok(Self::Haircare),
            "combined" => Ok(Self::Combined),
            other => Err(UnknownTag { kind: "quiz variant", raw: other.to_owned() }),
        }
    }
}
