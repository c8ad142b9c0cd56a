//! Typed answer mapping tags.
//!
//! Every quiz option carries a short mapping tag (`"Oily"`, `"Anti-Hair Fall"`).
//! The tags parse into closed enums so a mistyped tag is caught at the parse
//! boundary instead of producing a silently missing lookup further down.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognized {kind} tag `{raw}`")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub raw: String,
}

macro_rules! mapping_tag {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownTag;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let trimmed = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|tag| tag.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| UnknownTag { kind: $kind, raw: trimmed.to_owned() })
            }
        }
    };
}

mapping_tag! {
    /// Answer to the skin type question.
    SkinType, "skin type" {
        Oily => "Oily",
        Dry => "Dry",
        Combination => "Combination",
        Normal => "Normal",
        Sensitive => "Sensitive",
    }
}

mapping_tag! {
    /// Primary (and secondary) skin concern.
    SkinConcern, "skin concern" {
        Brightening => "Brightening",
        AntiWrinkle => "Anti-Wrinkle",
        AcneBlemishes => "Acne/Blemishes",
        BarrierRepair => "Barrier Repair/Hydration",
        EyeConcerns => "Eye Concerns",
    }
}

mapping_tag! {
    SunscreenFormula, "sunscreen" {
        MineralSpf30 => "Mineral SPF 30",
        ChemicalSpf50 => "Chemical SPF 50",
        TintedSpf30 => "Tinted SPF 30",
    }
}

mapping_tag! {
    BodyConcern, "body concern" {
        Hydration => "Hydration",
        Smoothing => "Smoothing",
        Firming => "Firming",
        EvenTone => "Even Tone",
    }
}

mapping_tag! {
    HairType, "hair type" {
        Straight => "Straight",
        Wavy => "Wavy",
        Curly => "Curly",
        Coily => "Coily",
    }
}

mapping_tag! {
    HairConcern, "hair concern" {
        AntiHairFall => "Anti-Hair Fall",
        Dandruff => "Dandruff",
        FrizzControl => "Frizz Control",
        ColorProtection => "Color Protection",
        DrynessDamage => "Dryness/Damage",
    }
}

/// Secondary concern answer; `None` is the explicit "nothing else" sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SecondaryConcern {
    #[default]
    None,
    Concern(SkinConcern),
}

impl SecondaryConcern {
    pub const SENTINEL: &'static str = "None";

    pub fn concern(&self) -> Option<SkinConcern> {
        match self {
            Self::None => None,
            Self::Concern(concern) => Some(*concern),
        }
    }
}

impl fmt::Display for SecondaryConcern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str(Self::SENTINEL),
            Self::Concern(concern) => concern.fmt(f),
        }
    }
}

impl FromStr for SecondaryConcern {
    type Err = UnknownTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case(Self::SENTINEL) {
            return Ok(Self::None);
        }
        value
            .parse::<SkinConcern>()
            .map(Self::Concern)
            .map_err(|error| UnknownTag { kind: "secondary concern", raw: error.raw })
    }
}

/// Any tag that can appear in a mapping table key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MappingTag {
    SkinType(SkinType),
    Concern(SkinConcern),
    Sunscreen(SunscreenFormula),
    Body(BodyConcern),
    HairType(HairType),
    HairConcern(HairConcern),
}

impl MappingTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkinType(tag) => tag.as_str(),
            Self::Concern(tag) => tag.as_str(),
            Self::Sunscreen(tag) => tag.as_str(),
            Self::Body(tag) => tag.as_str(),
            Self::HairType(tag) => tag.as_str(),
            Self::HairConcern(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for MappingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SkinType> for MappingTag {
    fn from(value: SkinType) -> Self {
        Self::SkinType(value)
    }
}

impl From<SkinConcern> for MappingTag {
    fn from(value: SkinConcern) -> Self {
        Self::Concern(value)
    }
}

impl From<SunscreenFormula> for MappingTag {
    fn from(value: SunscreenFormula) -> Self {
        Self::Sunscreen(value)
    }
}

impl From<BodyConcern> for MappingTag {
    fn from(value: BodyConcern) -> Self {
        Self::Body(value)
    }
}

impl From<HairType> for MappingTag {
    fn from(value: HairType) -> Self {
        Self::HairType(value)
    }
}

impl From<HairConcern> for MappingTag {
    fn from(value: HairConcern) -> Self {
        Self::HairConcern(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{HairConcern, SecondaryConcern, SkinConcern, SkinType, UnknownTag};

    #[test]
    fn tags_parse_from_source_labels() {
        assert_eq!("Barrier Repair/Hydration".parse(), Ok(SkinConcern::BarrierRepair));
        assert_eq!("Anti-Hair Fall".parse(), Ok(HairConcern::AntiHairFall));
        assert_eq!("  oily ".parse(), Ok(SkinType::Oily));
    }

    #[test]
    fn unknown_tag_reports_kind_and_raw_value() {
        let error = "Glassy".parse::<SkinType>().expect_err("not a skin type");
        assert_eq!(error, UnknownTag { kind: "skin type", raw: "Glassy".to_owned() });
        assert_eq!(error.to_string(), "unrecognized skin type tag `Glassy`");
    }

    #[test]
    fn secondary_concern_accepts_sentinel() {
        assert_eq!("None".parse(), Ok(SecondaryConcern::None));
        assert_eq!("Eye Concerns".parse(), Ok(SecondaryConcern::Concern(SkinConcern::EyeConcerns)));
        assert!("Sparkle".parse::<SecondaryConcern>().is_err());
    }

    #[test]
    fn tags_serialize_as_source_labels() {
        let json = serde_json::to_string(&HairConcern::DrynessDamage).expect("serialize");
        assert_eq!(json, "\"Dryness/Damage\"");
    }
}
