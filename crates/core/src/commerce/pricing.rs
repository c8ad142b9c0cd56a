use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::cart::{Cart, CartId, LineSource};
use crate::domain::product::ProductId;

pub const DEFAULT_BUNDLE_DISCOUNT_PERCENT: u8 = 15;
pub const DEFAULT_CURRENCY: &str = "usd";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub currency: String,
    /// Flat percentage taken off every bundle-sourced unit.
    pub bundle_discount_percent: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY, DEFAULT_BUNDLE_DISCOUNT_PERCENT)
    }
}

impl PricingPolicy {
    pub fn new(currency: impl Into<String>, bundle_discount_percent: u8) -> Self {
        Self {
            currency: currency.into(),
            bundle_discount_percent: Decimal::from(bundle_discount_percent),
        }
    }

    /// Per-unit discount, rounded to cents half away from zero.
    pub fn unit_discount(&self, unit_price: Decimal, source: LineSource) -> Decimal {
        match source {
            LineSource::Catalog => Decimal::ZERO,
            LineSource::Bundle => {
                round_money(unit_price * self.bundle_discount_percent / Decimal::ONE_HUNDRED)
            }
        }
    }
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTraceStep {
    pub stage: String,
    pub detail: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTrace {
    pub cart_id: CartId,
    pub currency: String,
    pub steps: Vec<PricingTraceStep>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub name: String,
    pub source: LineSource,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub unit_discount: Decimal,
    pub line_total: Decimal,
}

impl PricedLine {
    pub fn discounted_unit_price(&self) -> Decimal {
        self.unit_price - self.unit_discount
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPricing {
    pub lines: Vec<PricedLine>,
    pub subtotal: Decimal,
    pub bundle_discount: Decimal,
    pub total: Decimal,
    pub trace: PricingTrace,
}

pub trait PricingEngine: Send + Sync {
    fn price(&self, cart: &Cart) -> CartPricing;
}

#[derive(Clone, Debug, Default)]
pub struct BundleDiscountPricingEngine {
    policy: PricingPolicy,
}

impl BundleDiscountPricingEngine {
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }
}

impl PricingEngine for BundleDiscountPricingEngine {
    fn price(&self, cart: &Cart) -> CartPricing {
        price_cart(cart, &self.policy)
    }
}

pub fn price_cart(cart: &Cart, policy: &PricingPolicy) -> CartPricing {
    let lines = cart
        .lines
        .iter()
        .map(|line| {
            let unit_discount = policy.unit_discount(line.unit_price, line.source);
            PricedLine {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                source: line.source,
                quantity: line.quantity,
                unit_price: line.unit_price,
                unit_discount,
                line_total: (line.unit_price - unit_discount) * Decimal::from(line.quantity),
            }
        })
        .collect::<Vec<_>>();

    let subtotal: Decimal =
        lines.iter().map(|line| line.unit_price * Decimal::from(line.quantity)).sum();
    let bundle_discount: Decimal =
        lines.iter().map(|line| line.unit_discount * Decimal::from(line.quantity)).sum();
    let total = subtotal - bundle_discount;

    CartPricing {
        lines,
        subtotal,
        bundle_discount,
        total,
        trace: PricingTrace {
            cart_id: cart.id.clone(),
            currency: policy.currency.clone(),
            steps: vec![
                PricingTraceStep {
                    stage: "subtotal".to_string(),
                    detail: "sum(unit_price * quantity)".to_string(),
                    amount: subtotal,
                },
                PricingTraceStep {
                    stage: "bundle_discount".to_string(),
                    detail: format!(
                        "{}% of each bundle unit, rounded to cents",
                        policy.bundle_discount_percent.normalize()
                    ),
                    amount: bundle_discount,
                },
                PricingTraceStep {
                    stage: "total".to_string(),
                    detail: "subtotal - bundle_discount".to_string(),
                    amount: total,
                },
            ],
        },
    }
}
