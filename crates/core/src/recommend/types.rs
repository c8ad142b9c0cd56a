//! Output types of the recommendation engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::table::LookupSlot;
use crate::quiz::QuizVariant;

/// Position in a routine that a recommendation fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoutineSlot {
    #[serde(rename = "Cleanser (AM)")]
    CleanserAm,
    #[serde(rename = "Cleanser (PM)")]
    CleanserPm,
    #[serde(rename = "Serum (AM)")]
    SerumAm,
    #[serde(rename = "Serum (PM)")]
    SerumPm,
    #[serde(rename = "Eye Care (AM)")]
    EyeCareAm,
    #[serde(rename = "Eye Care (PM)")]
    EyeCarePm,
    #[serde(rename = "Moisturizer (AM)")]
    MoisturizerAm,
    #[serde(rename = "Moisturizer (PM)")]
    MoisturizerPm,
    #[serde(rename = "Sunscreen (AM)")]
    SunscreenAm,
    #[serde(rename = "Mask (Weekly)")]
    MaskWeekly,
    #[serde(rename = "Exfoliating Scrub (Weekly)")]
    ScrubWeekly,
    #[serde(rename = "Shampoo")]
    Shampoo,
    #[serde(rename = "Conditioner")]
    Conditioner,
    #[serde(rename = "Hair Mask")]
    HairMask,
    #[serde(rename = "Scalp/Leave-In Treatment")]
    ScalpTreatment,
    #[serde(rename = "Body Wash")]
    BodyWash,
    #[serde(rename = "Body Moisturizer")]
    BodyMoisturizer,
    #[serde(rename = "Lip Care (Night)")]
    LipCareNight,
    #[serde(rename = "Lip Care (Day)")]
    LipCareDay,
}

impl RoutineSlot {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CleanserAm => "Cleanser (AM)",
            Self::CleanserPm => "Cleanser (PM)",
            Self::SerumAm => "Serum (AM)",
            Self::SerumPm => "Serum (PM)",
            Self::EyeCareAm => "Eye Care (AM)",
            Self::EyeCarePm => "Eye Care (PM)",
            Self::MoisturizerAm => "Moisturizer (AM)",
            Self::MoisturizerPm => "Moisturizer (PM)",
            Self::SunscreenAm => "Sunscreen (AM)",
            Self::MaskWeekly => "Mask (Weekly)",
            Self::ScrubWeekly => "Exfoliating Scrub (Weekly)",
            Self::Shampoo => "Shampoo",
            Self::Conditioner => "Conditioner",
            Self::HairMask => "Hair Mask",
            Self::ScalpTreatment => "Scalp/Leave-In Treatment",
            Self::BodyWash => "Body Wash",
            Self::BodyMoisturizer => "Body Moisturizer",
            Self::LipCareNight => "Lip Care (Night)",
            Self::LipCareDay => "Lip Care (Day)",
        }
    }
}

impl fmt::Display for RoutineSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single product suggestion for a routine slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: String,
    pub slot: RoutineSlot,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkincareRoutine {
    pub am: Vec<Recommendation>,
    pub pm: Vec<Recommendation>,
    pub weekly: Vec<Recommendation>,
}

/// A slot the engine tried to fill but could not resolve in the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfilledSlot {
    pub slot: LookupSlot,
    /// The composed `primary+secondary` key that failed to resolve.
    pub key: String,
}

/// Everything recommended for one completed quiz.
///
/// Categories that do not belong to the quiz variant are `None` and are left
/// out of the serialized form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    #[serde(skip)]
    pub variant: Option<QuizVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skincare: Option<SkincareRoutine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodycare: Option<Vec<Recommendation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lipcare: Option<Vec<Recommendation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub haircare: Option<Vec<Recommendation>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unfilled: Vec<UnfilledSlot>,
}

impl RecommendationBundle {
    pub fn empty(variant: QuizVariant) -> Self {
        Self {
            variant: Some(variant),
            skincare: None,
            bodycare: None,
            lipcare: None,
            haircare: None,
            unfilled: Vec::new(),
        }
    }

    pub fn am(&self) -> &[Recommendation] {
        self.skincare.as_ref().map(|routine| routine.am.as_slice()).unwrap_or_default()
    }

    pub fn pm(&self) -> &[Recommendation] {
        self.skincare.as_ref().map(|routine| routine.pm.as_slice()).unwrap_or_default()
    }

    pub fn weekly(&self) -> &[Recommendation] {
        self.skincare.as_ref().map(|routine| routine.weekly.as_slice()).unwrap_or_default()
    }

    pub fn bodycare(&self) -> &[Recommendation] {
        self.bodycare.as_deref().unwrap_or_default()
    }

    pub fn lipcare(&self) -> &[Recommendation] {
        self.lipcare.as_deref().unwrap_or_default()
    }

    pub fn haircare(&self) -> &[Recommendation] {
        self.haircare.as_deref().unwrap_or_default()
    }

    /// Every recommendation in routine order: AM, PM, weekly, body, lip, hair.
    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.am()
            .iter()
            .chain(self.pm())
            .chain(self.weekly())
            .chain(self.bodycare())
            .chain(self.lipcare())
            .chain(self.haircare())
    }

    /// Finds the first recommendation placed in `slot`.
    pub fn in_slot(&self, slot: RoutineSlot) -> Option<&Recommendation> {
        self.iter().find(|recommendation| recommendation.slot == slot)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
