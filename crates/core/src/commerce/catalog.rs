use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductCategory, ProductId};

/// Mock catalog record; prices are in cents.
#[derive(Debug, Clone, Copy)]
struct ProductSeed {
    code: &'static str,
    name: &'static str,
    category: ProductCategory,
    price_cents: i64,
    active: bool,
}

const fn item(
    code: &'static str,
    name: &'static str,
    category: ProductCategory,
    price_cents: i64,
) -> ProductSeed {
    ProductSeed { code, name, category, price_cents, active: true }
}

const PRODUCT_SEEDS: &[ProductSeed] = {
    use ProductCategory::{Bodycare, Haircare, Lipcare, Skincare};

    &[
        item("cln-clarify", "Cleanser - Salicylic Clarifying Gel", Skincare, 2400),
        item("cln-foam", "Cleanser - Foaming Gel Wash", Skincare, 2200),
        item("cln-balance-gel", "Cleanser - Balancing Gel Wash", Skincare, 2200),
        item("cln-gentle", "Cleanser - Gentle Sensitive Wash", Skincare, 2100),
        item("cln-daily", "Cleanser - Daily Balancing Wash", Skincare, 2000),
        item("srm-vitc", "Serum - Vitamin C Brightening", Skincare, 3800),
        item("srm-retinol", "Serum - Retinol Renewal", Skincare, 4200),
        item("srm-niacinamide", "Serum - Niacinamide Clarifying", Skincare, 3200),
        item("srm-hyaluronic", "Serum - Hyaluronic Hydration", Skincare, 3400),
        item("eye-caffeine", "Eye Cream - Caffeine Depuffing", Skincare, 2900),
        item("eye-peptide", "Eye Cream - Peptide Night Repair", Skincare, 3600),
        item("crm-barrier", "Face Cream - Barrier Repair", Skincare, 3500),
        item("crm-peptide", "Face Cream - Peptide Firming", Skincare, 4400),
        item("crm-rich", "Face Cream - Rich Nourishing", Skincare, 3300),
        item("crm-oil-free", "Gel Moisturizer - Oil-Free Matte", Skincare, 2800),
        item("crm-gel-balance", "Gel Cream - Balancing", Skincare, 3000),
        item("crm-daily", "Face Cream - Daily Hydration", Skincare, 2700),
        item("spf-mineral-30", "Sunscreen - Mineral SPF 30", Skincare, 2600),
        item("spf-invisible-50", "Sunscreen - Invisible SPF 50", Skincare, 2800),
        item("spf-tinted-30", "Sunscreen - Tinted Mineral SPF 30", Skincare, 3000),
        item("msk-clay", "Mask - Clay Purifying", Skincare, 2500),
        item("msk-overnight", "Mask - Overnight Hydrating", Skincare, 3100),
        item("msk-oat", "Mask - Soothing Oat", Skincare, 2700),
        item("msk-enzyme", "Mask - Glow Enzyme", Skincare, 2900),
        item("scr-gentle", "Scrub - Gentle Exfoliating", Skincare, 1900),
        item("bdw-cream", "Body Wash - Hydrating Cream Wash", Bodycare, 1600),
        item("bdl-glow", "Body Moisturizer - Hydration Glow Lotion", Bodycare, 2200),
        item("bdw-aha", "Body Wash - AHA Smoothing", Bodycare, 1800),
        item("bdl-urea", "Body Moisturizer - Urea Smoothing Lotion", Bodycare, 2400),
        item("bdw-caffeine", "Body Wash - Caffeine Firming", Bodycare, 1800),
        item("bdl-butter", "Body Moisturizer - Firming Body Butter", Bodycare, 2600),
        item("bdw-bright", "Body Wash - Brightening Gel", Bodycare, 1800),
        item("bdl-even", "Body Moisturizer - Even Tone Lotion", Bodycare, 2400),
        item("lip-repair", "Lip Balm - Overnight Repair", Lipcare, 1400),
        item("lip-plump", "Lip Balm - Plumping Peptide", Lipcare, 1600),
        item("shp-hairfall", "Shampoo - Anti-Hair Fall Strengthening", Haircare, 2400),
        item("shp-zinc", "Shampoo - Anti-Dandruff Zinc", Haircare, 2000),
        item("shp-keratin", "Shampoo - Smoothing Keratin", Haircare, 2200),
        item("shp-color", "Shampoo - Color Care Sulfate-Free", Haircare, 2200),
        item("shp-bond", "Shampoo - Bond Repair", Haircare, 2600),
        item("hmk-protein", "Hair Mask - Strengthening Protein", Haircare, 2800),
        item("hmk-clay", "Hair Mask - Scalp Soothing Clay", Haircare, 2600),
        item("hmk-smooth", "Hair Mask - Deep Smoothing", Haircare, 2800),
        item("hmk-gloss", "Hair Mask - Color Gloss", Haircare, 2800),
        item("hmk-repair", "Hair Mask - Intensive Repair", Haircare, 3000),
        item("cnd-color", "Conditioner - Color Care", Haircare, 2200),
        item("cnd-rich", "Conditioner - Rich Repair", Haircare, 2600),
        item("cnd-light", "Conditioner - Lightweight Daily", Haircare, 2000),
        item("cnd-wave", "Conditioner - Wave Hydrating", Haircare, 2200),
        item("cnd-curl", "Conditioner - Curl Moisture", Haircare, 2400),
        item("trt-hairfall", "Scalp Serum - Anti-Hair Fall", Haircare, 3400),
        item("trt-dandruff", "Scalp Treatment - Anti-Dandruff Tonic", Haircare, 2800),
        item("lvi-curl", "Leave-In - Curl Defining Cream", Haircare, 2400),
        item("lvi-frizz", "Leave-In - Smoothing Anti-Frizz", Haircare, 2200),
        item("lvi-color", "Leave-In - Color Shield Mist", Haircare, 2200),
        item("lvi-bond", "Leave-In - Bond Repair", Haircare, 2800),
        ProductSeed {
            code: "srm-gold",
            name: "Serum - Limited Edition Gold",
            category: Skincare,
            price_cents: 9500,
            active: false,
        },
    ]
};

fn product_from_seed(seed: &ProductSeed) -> Product {
    Product {
        id: ProductId(format!("prod_{}", seed.code.replace('-', "_"))),
        sku: seed.code.to_ascii_uppercase(),
        name: seed.name.to_owned(),
        category: seed.category,
        price: Decimal::new(seed.price_cents, 2),
        active: seed.active,
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's mock product records.
    pub fn builtin() -> Self {
        Self::new(PRODUCT_SEEDS.iter().map(product_from_seed).collect())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    /// Name lookup used to resolve recommendations; trimmed and case-insensitive.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let name = name.trim();
        self.products.iter().find(|product| product.name.eq_ignore_ascii_case(name))
    }

    pub fn in_category(&self, category: ProductCategory) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |product| product.category == category)
    }
}
