//! Quiz recommendation engine.
//!
//! Turns a completed answer set into a bundle of routine recommendations by
//! composing typed lookup keys against a static product mapping table.

mod engine;
pub mod table;
mod types;

pub use engine::{
    RecommendationEngine, DEFAULT_BODY_CONCERN, DEFAULT_HAIR_CONCERN, DEFAULT_HAIR_TYPE,
    DEFAULT_PRIMARY_CONCERN, DEFAULT_SECONDARY_CONCERN, DEFAULT_SKIN_TYPE, DEFAULT_SUNSCREEN,
};
pub use table::{
    KeyPart, Literal, LookupSlot, ProductMappingTable, RecommendationTemplate, Resolution, TableKey,
};
pub use types::{Recommendation, RecommendationBundle, RoutineSlot, SkincareRoutine, UnfilledSlot};
