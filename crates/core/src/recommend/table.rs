//! Product mapping table.
//!
//! Keys are typed (`slot`, primary tag, secondary tag / literal / wildcard) and
//! render as the `Primary+Secondary` strings used in the storefront copy. The
//! table content is authored seed data.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::quiz::tags::{
    BodyConcern, HairConcern, HairType, MappingTag, SkinConcern, SkinType, SunscreenFormula,
};

/// Table dimension a lookup belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSlot {
    Cleanser,
    Serum,
    EyeCare,
    Moisturizer,
    Sunscreen,
    FaceMask,
    BodyWash,
    BodyMoisturizer,
    Shampoo,
    Conditioner,
    HairMask,
    ScalpTreatment,
}

impl LookupSlot {
    pub const ALL: &'static [LookupSlot] = &[
        Self::Cleanser,
        Self::Serum,
        Self::EyeCare,
        Self::Moisturizer,
        Self::Sunscreen,
        Self::FaceMask,
        Self::BodyWash,
        Self::BodyMoisturizer,
        Self::Shampoo,
        Self::Conditioner,
        Self::HairMask,
        Self::ScalpTreatment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleanser => "cleanser",
            Self::Serum => "serum",
            Self::EyeCare => "eye_care",
            Self::Moisturizer => "moisturizer",
            Self::Sunscreen => "sunscreen",
            Self::FaceMask => "face_mask",
            Self::BodyWash => "body_wash",
            Self::BodyMoisturizer => "body_moisturizer",
            Self::Shampoo => "shampoo",
            Self::Conditioner => "conditioner",
            Self::HairMask => "hair_mask",
            Self::ScalpTreatment => "scalp_treatment",
        }
    }
}

impl fmt::Display for LookupSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal key suffixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Literal {
    Serum,
    EyeAm,
    EyePm,
    Sunscreen,
    Mask,
    Shampoo,
    BodyWash,
    BodyLotion,
}

impl Literal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Serum => "Serum",
            Self::EyeAm => "EyeAM",
            Self::EyePm => "EyePM",
            Self::Sunscreen => "Sunscreen",
            Self::Mask => "Mask",
            Self::Shampoo => "Shampoo",
            Self::BodyWash => "BodyWash",
            Self::BodyLotion => "BodyLotion",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyPart {
    Tag(MappingTag),
    Literal(Literal),
    Wildcard,
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => tag.fmt(f),
            Self::Literal(literal) => f.write_str(literal.as_str()),
            Self::Wildcard => f.write_str("*"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableKey {
    pub slot: LookupSlot,
    pub primary: MappingTag,
    pub secondary: KeyPart,
}

impl TableKey {
    pub fn new(slot: LookupSlot, primary: impl Into<MappingTag>, secondary: KeyPart) -> Self {
        Self { slot, primary: primary.into(), secondary }
    }

    pub fn wildcard(&self) -> Self {
        Self { secondary: KeyPart::Wildcard, ..*self }
    }

    pub fn is_wildcard(&self) -> bool {
        self.secondary == KeyPart::Wildcard
    }

    /// The `Primary+Secondary` form without the slot.
    pub fn composite(&self) -> String {
        format!("{}+{}", self.primary, self.secondary)
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}+{}", self.slot, self.primary, self.secondary)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RecommendationTemplate {
    pub product: &'static str,
    pub reason: &'static str,
}

/// Result of a successful lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution<'t> {
    pub matched: TableKey,
    pub template: &'t RecommendationTemplate,
}

impl Resolution<'_> {
    pub fn via_wildcard(&self) -> bool {
        self.matched.is_wildcard()
    }
}

#[derive(Clone, Copy, Debug)]
struct MappingSeed {
    key: TableKey,
    template: RecommendationTemplate,
}

const fn seed(
    slot: LookupSlot,
    primary: MappingTag,
    secondary: KeyPart,
    product: &'static str,
    reason: &'static str,
) -> MappingSeed {
    MappingSeed {
        key: TableKey { slot, primary, secondary },
        template: RecommendationTemplate { product, reason },
    }
}

const fn skin(tag: SkinType) -> MappingTag {
    MappingTag::SkinType(tag)
}

const fn concern(tag: SkinConcern) -> MappingTag {
    MappingTag::Concern(tag)
}

const fn body(tag: BodyConcern) -> MappingTag {
    MappingTag::Body(tag)
}

const fn hair(tag: HairType) -> MappingTag {
    MappingTag::HairType(tag)
}

const fn hair_concern(tag: HairConcern) -> MappingTag {
    MappingTag::HairConcern(tag)
}

const fn spf(tag: SunscreenFormula) -> MappingTag {
    MappingTag::Sunscreen(tag)
}

const fn tag(tag: MappingTag) -> KeyPart {
    KeyPart::Tag(tag)
}

const fn lit(literal: Literal) -> KeyPart {
    KeyPart::Literal(literal)
}

const ANY: KeyPart = KeyPart::Wildcard;

const GENTLE_WASH: &str = "Cleanser - Gentle Sensitive Wash";
const CLARIFYING_WASH: &str = "Cleanser - Salicylic Clarifying Gel";
const BARRIER_CREAM: &str = "Face Cream - Barrier Repair";
const PEPTIDE_CREAM: &str = "Face Cream - Peptide Firming";
const CLAY_MASK: &str = "Mask - Clay Purifying";
const CURL_CONDITIONER: &str = "Conditioner - Curl Moisture";
const COLOR_CONDITIONER: &str = "Conditioner - Color Care";
const CURL_LEAVE_IN: &str = "Leave-In - Curl Defining Cream";

#[rustfmt::skip]
const MAPPING_SEEDS: &[MappingSeed] = {
    use HairConcern as HC;
    use HairType as HT;
    use Literal::{BodyLotion, BodyWash, EyeAm, EyePm, Mask, Serum, Shampoo, Sunscreen};
    use LookupSlot as L;
    use SkinConcern as C;
    use SkinType as S;

    &[
        // Cleansers: skin type, refined by primary concern.
        seed(L::Cleanser, skin(S::Oily), tag(concern(C::AcneBlemishes)), CLARIFYING_WASH,
            "Salicylic acid keeps pores clear on oily, breakout-prone skin."),
        seed(L::Cleanser, skin(S::Combination), tag(concern(C::AcneBlemishes)), CLARIFYING_WASH,
            "Salicylic acid targets congestion in the T-zone."),
        seed(L::Cleanser, skin(S::Oily), ANY, "Cleanser - Foaming Gel Wash",
            "A foaming gel lifts excess oil without stripping."),
        seed(L::Cleanser, skin(S::Combination), ANY, "Cleanser - Balancing Gel Wash",
            "Balances an oily T-zone without drying the cheeks."),
        seed(L::Cleanser, skin(S::Dry), ANY, GENTLE_WASH,
            "A low-foam, fragrance-free wash keeps dry skin comfortable."),
        seed(L::Cleanser, skin(S::Sensitive), ANY, GENTLE_WASH,
            "Fragrance-free and soap-free for reactive skin."),
        seed(L::Cleanser, skin(S::Normal), ANY, "Cleanser - Daily Balancing Wash",
            "An everyday wash that keeps balanced skin balanced."),
        // Treatment serums by concern.
        seed(L::Serum, concern(C::Brightening), lit(Serum), "Serum - Vitamin C Brightening",
            "Vitamin C evens tone and boosts radiance under sunscreen."),
        seed(L::Serum, concern(C::AntiWrinkle), lit(Serum), "Serum - Retinol Renewal",
            "Retinol smooths fine lines overnight."),
        seed(L::Serum, concern(C::AcneBlemishes), lit(Serum), "Serum - Niacinamide Clarifying",
            "Niacinamide calms breakouts and refines pores."),
        seed(L::Serum, concern(C::BarrierRepair), lit(Serum), "Serum - Hyaluronic Hydration",
            "Hyaluronic acid replenishes water for a stronger barrier."),
        seed(L::EyeCare, concern(C::EyeConcerns), lit(EyeAm), "Eye Cream - Caffeine Depuffing",
            "Caffeine reduces morning puffiness."),
        seed(L::EyeCare, concern(C::EyeConcerns), lit(EyePm), "Eye Cream - Peptide Night Repair",
            "Peptides target dark circles and crepey skin overnight."),
        // Moisturizers: skin type, refined by primary concern.
        seed(L::Moisturizer, skin(S::Dry), tag(concern(C::BarrierRepair)), BARRIER_CREAM,
            "Ceramides rebuild a compromised, dehydrated barrier."),
        seed(L::Moisturizer, skin(S::Normal), tag(concern(C::BarrierRepair)), BARRIER_CREAM,
            "Ceramides restore hydration and resilience."),
        seed(L::Moisturizer, skin(S::Dry), tag(concern(C::AntiWrinkle)), PEPTIDE_CREAM,
            "Peptides and rich emollients firm dry skin."),
        seed(L::Moisturizer, skin(S::Normal), tag(concern(C::AntiWrinkle)), PEPTIDE_CREAM,
            "Peptides support firmness without heaviness."),
        seed(L::Moisturizer, skin(S::Sensitive), ANY, BARRIER_CREAM,
            "A minimal, ceramide-rich cream for reactive skin."),
        seed(L::Moisturizer, skin(S::Dry), ANY, "Face Cream - Rich Nourishing",
            "Rich lipids keep dry skin supple all day."),
        seed(L::Moisturizer, skin(S::Oily), ANY, "Gel Moisturizer - Oil-Free Matte",
            "Oil-free hydration with a matte finish."),
        seed(L::Moisturizer, skin(S::Combination), ANY, "Gel Cream - Balancing",
            "Light where you are oily, comforting where you are dry."),
        seed(L::Moisturizer, skin(S::Normal), ANY, "Face Cream - Daily Hydration",
            "Lightweight daily hydration."),
        // Sunscreen by preference.
        seed(L::Sunscreen, spf(SunscreenFormula::MineralSpf30), lit(Sunscreen),
            "Sunscreen - Mineral SPF 30", "Zinc oxide protection that is gentle on skin."),
        seed(L::Sunscreen, spf(SunscreenFormula::ChemicalSpf50), lit(Sunscreen),
            "Sunscreen - Invisible SPF 50", "High protection with no white cast."),
        seed(L::Sunscreen, spf(SunscreenFormula::TintedSpf30), lit(Sunscreen),
            "Sunscreen - Tinted Mineral SPF 30", "Mineral protection with a sheer tint."),
        // Weekly masks by skin type.
        seed(L::FaceMask, skin(S::Oily), lit(Mask), CLAY_MASK,
            "Kaolin clay absorbs oil and decongests pores weekly."),
        seed(L::FaceMask, skin(S::Combination), lit(Mask), CLAY_MASK,
            "Use on the T-zone once a week to decongest."),
        seed(L::FaceMask, skin(S::Dry), lit(Mask), "Mask - Overnight Hydrating",
            "A weekly overnight drink of water for dry skin."),
        seed(L::FaceMask, skin(S::Sensitive), lit(Mask), "Mask - Soothing Oat",
            "Colloidal oat calms redness."),
        seed(L::FaceMask, skin(S::Normal), lit(Mask), "Mask - Glow Enzyme",
            "Fruit enzymes refresh dull skin."),
        // Body care by concern.
        seed(L::BodyWash, body(BodyConcern::Hydration), lit(BodyWash),
            "Body Wash - Hydrating Cream Wash", "A creamy wash that does not strip the skin."),
        seed(L::BodyMoisturizer, body(BodyConcern::Hydration), lit(BodyLotion),
            "Body Moisturizer - Hydration Glow Lotion", "Glycerin and shea for lasting moisture."),
        seed(L::BodyWash, body(BodyConcern::Smoothing), lit(BodyWash),
            "Body Wash - AHA Smoothing", "Lactic acid loosens rough bumps in the shower."),
        seed(L::BodyMoisturizer, body(BodyConcern::Smoothing), lit(BodyLotion),
            "Body Moisturizer - Urea Smoothing Lotion", "Urea softens rough texture."),
        seed(L::BodyWash, body(BodyConcern::Firming), lit(BodyWash),
            "Body Wash - Caffeine Firming", "Caffeine wakes up tired-looking skin."),
        seed(L::BodyMoisturizer, body(BodyConcern::Firming), lit(BodyLotion),
            "Body Moisturizer - Firming Body Butter", "A rich butter that improves elasticity."),
        seed(L::BodyWash, body(BodyConcern::EvenTone), lit(BodyWash),
            "Body Wash - Brightening Gel", "Gentle acids fade the look of dark spots."),
        seed(L::BodyMoisturizer, body(BodyConcern::EvenTone), lit(BodyLotion),
            "Body Moisturizer - Even Tone Lotion", "Niacinamide evens body skin tone."),
        // Shampoo and hair masks by hair concern.
        seed(L::Shampoo, hair_concern(HC::AntiHairFall), lit(Shampoo),
            "Shampoo - Anti-Hair Fall Strengthening", "Caffeine and biotin support the roots."),
        seed(L::Shampoo, hair_concern(HC::Dandruff), lit(Shampoo),
            "Shampoo - Anti-Dandruff Zinc", "Zinc pyrithione clears flakes."),
        seed(L::Shampoo, hair_concern(HC::FrizzControl), lit(Shampoo),
            "Shampoo - Smoothing Keratin", "Keratin smooths the cuticle as you wash."),
        seed(L::Shampoo, hair_concern(HC::ColorProtection), lit(Shampoo),
            "Shampoo - Color Care Sulfate-Free", "Sulfate-free cleansing keeps color longer."),
        seed(L::Shampoo, hair_concern(HC::DrynessDamage), lit(Shampoo),
            "Shampoo - Bond Repair", "Repairs broken bonds in damaged hair."),
        seed(L::HairMask, hair_concern(HC::AntiHairFall), lit(Mask),
            "Hair Mask - Strengthening Protein", "Protein reinforces fragile strands."),
        seed(L::HairMask, hair_concern(HC::Dandruff), lit(Mask),
            "Hair Mask - Scalp Soothing Clay", "Clay detoxifies a flaky scalp."),
        seed(L::HairMask, hair_concern(HC::FrizzControl), lit(Mask),
            "Hair Mask - Deep Smoothing", "Weekly smoothing for humidity-proof hair."),
        seed(L::HairMask, hair_concern(HC::ColorProtection), lit(Mask),
            "Hair Mask - Color Gloss", "Restores shine to color-treated hair."),
        seed(L::HairMask, hair_concern(HC::DrynessDamage), lit(Mask),
            "Hair Mask - Intensive Repair", "Deep conditioning for dry, damaged lengths."),
        // Conditioner: hair type, refined by concern.
        seed(L::Conditioner, hair(HT::Straight), tag(hair_concern(HC::ColorProtection)),
            COLOR_CONDITIONER, "UV filters keep color from fading."),
        seed(L::Conditioner, hair(HT::Wavy), tag(hair_concern(HC::ColorProtection)),
            COLOR_CONDITIONER, "UV filters keep color from fading."),
        seed(L::Conditioner, hair(HT::Coily), tag(hair_concern(HC::DrynessDamage)),
            "Conditioner - Rich Repair", "Butters and oils seal moisture into coils."),
        seed(L::Conditioner, hair(HT::Straight), ANY, "Conditioner - Lightweight Daily",
            "Detangles without weighing straight hair down."),
        seed(L::Conditioner, hair(HT::Wavy), ANY, "Conditioner - Wave Hydrating",
            "Hydrates waves without flattening them."),
        seed(L::Conditioner, hair(HT::Curly), ANY, CURL_CONDITIONER,
            "Slip and moisture for defined curls."),
        seed(L::Conditioner, hair(HT::Coily), ANY, CURL_CONDITIONER,
            "Slip and moisture for coily textures."),
        // Scalp or leave-in treatment: concern, refined by hair type.
        seed(L::ScalpTreatment, hair_concern(HC::AntiHairFall), ANY,
            "Scalp Serum - Anti-Hair Fall", "A daily scalp serum that reduces shedding."),
        seed(L::ScalpTreatment, hair_concern(HC::Dandruff), ANY,
            "Scalp Treatment - Anti-Dandruff Tonic", "A leave-on tonic that keeps flakes away."),
        seed(L::ScalpTreatment, hair_concern(HC::FrizzControl), tag(hair(HT::Curly)),
            CURL_LEAVE_IN, "Defines curls and locks out humidity."),
        seed(L::ScalpTreatment, hair_concern(HC::FrizzControl), tag(hair(HT::Coily)),
            CURL_LEAVE_IN, "Defines coils and locks out humidity."),
        seed(L::ScalpTreatment, hair_concern(HC::FrizzControl), ANY,
            "Leave-In - Smoothing Anti-Frizz", "Seals the cuticle against humidity."),
        seed(L::ScalpTreatment, hair_concern(HC::ColorProtection), ANY,
            "Leave-In - Color Shield Mist", "Heat and UV protection for colored hair."),
        seed(L::ScalpTreatment, hair_concern(HC::DrynessDamage), ANY,
            "Leave-In - Bond Repair", "Keeps repairing between washes."),
    ]
};

/// Recommendations added to every skin routine regardless of answers.
pub const LIP_REPAIR: RecommendationTemplate = RecommendationTemplate {
    product: "Lip Balm - Overnight Repair",
    reason: "Everyone's routine gets an overnight lip repair balm.",
};

pub const LIP_PLUMPING: RecommendationTemplate = RecommendationTemplate {
    product: "Lip Balm - Plumping Peptide",
    reason: "A daytime peptide balm for softer, fuller-looking lips.",
};

pub const EXFOLIATING_SCRUB: RecommendationTemplate = RecommendationTemplate {
    product: "Scrub - Gentle Exfoliating",
    reason: "A gentle weekly scrub keeps every skin type smooth.",
};

/// Read-only lookup from typed keys to recommendation templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductMappingTable {
    entries: BTreeMap<TableKey, RecommendationTemplate>,
}

impl ProductMappingTable {
    pub fn builtin() -> Self {
        Self::from_entries(MAPPING_SEEDS.iter().map(|seed| (seed.key, seed.template)))
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = (TableKey, RecommendationTemplate)>,
    ) -> Self {
        Self { entries: entries.into_iter().collect() }
    }

    pub fn get(&self, key: &TableKey) -> Option<&RecommendationTemplate> {
        self.entries.get(key)
    }

    /// Looks up `key`, falling back to its `primary+*` wildcard.
    pub fn resolve(&self, key: &TableKey) -> Option<Resolution<'_>> {
        if let Some(template) = self.entries.get(key) {
            return Some(Resolution { matched: *key, template });
        }

        let wildcard = key.wildcard();
        self.entries.get(&wildcard).map(|template| Resolution { matched: wildcard, template })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&TableKey, &RecommendationTemplate)> {
        self.entries.iter()
    }

    /// Every product name the table can produce, plus the fixed entries.
    pub fn product_names(&self) -> Vec<&'static str> {
        let mut names = self
            .entries
            .values()
            .map(|template| template.product)
            .chain([LIP_REPAIR.product, LIP_PLUMPING.product, EXFOLIATING_SCRUB.product])
            .collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Keys the engine can compose from recognised tags that resolve to nothing.
    pub fn coverage_gaps(&self) -> Vec<TableKey> {
        composable_keys().into_iter().filter(|key| self.resolve(key).is_none()).collect()
    }
}

impl Default for ProductMappingTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Every exact key the engine can build from recognised tags.
pub fn composable_keys() -> Vec<TableKey> {
    let mut keys = Vec::new();

    for skin_type in SkinType::ALL {
        for primary in SkinConcern::ALL {
            keys.push(TableKey::new(LookupSlot::Cleanser, *skin_type, tag((*primary).into())));
            keys.push(TableKey::new(LookupSlot::Moisturizer, *skin_type, tag((*primary).into())));
        }
        keys.push(TableKey::new(LookupSlot::FaceMask, *skin_type, lit(Literal::Mask)));
    }

    for skin_concern in SkinConcern::ALL {
        if *skin_concern == SkinConcern::EyeConcerns {
            keys.push(TableKey::new(LookupSlot::EyeCare, *skin_concern, lit(Literal::EyeAm)));
            keys.push(TableKey::new(LookupSlot::EyeCare, *skin_concern, lit(Literal::EyePm)));
        } else {
            keys.push(TableKey::new(LookupSlot::Serum, *skin_concern, lit(Literal::Serum)));
        }
    }

    for formula in SunscreenFormula::ALL {
        keys.push(TableKey::new(LookupSlot::Sunscreen, *formula, lit(Literal::Sunscreen)));
    }

    for body_concern in BodyConcern::ALL {
        keys.push(TableKey::new(LookupSlot::BodyWash, *body_concern, lit(Literal::BodyWash)));
        keys.push(TableKey::new(
            LookupSlot::BodyMoisturizer,
            *body_concern,
            lit(Literal::BodyLotion),
        ));
    }

    for concern_tag in HairConcern::ALL {
        keys.push(TableKey::new(LookupSlot::Shampoo, *concern_tag, lit(Literal::Shampoo)));
        keys.push(TableKey::new(LookupSlot::HairMask, *concern_tag, lit(Literal::Mask)));
        for hair_type in HairType::ALL {
            keys.push(TableKey::new(
                LookupSlot::Conditioner,
                *hair_type,
                tag((*concern_tag).into()),
            ));
            keys.push(TableKey::new(
                LookupSlot::ScalpTreatment,
                *concern_tag,
                tag((*hair_type).into()),
            ));
        }
    }

    keys
}
