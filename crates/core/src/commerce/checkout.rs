use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commerce::pricing::{CartPricing, PricedLine};
use crate::domain::product::ProductId;

pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub success_url: String,
    pub cancel_url: String,
    pub session_ttl_minutes: u32,
}

/// One priced line in processor form; `unit_amount` is in minor currency units
/// after any bundle discount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    pub name: String,
    pub unit_amount: i64,
    pub quantity: u32,
}

impl CheckoutLineItem {
    pub fn amount(&self) -> i64 {
        self.unit_amount * i64::from(self.quantity)
    }
}

/// Request body for a hosted payment page session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    pub mode: String,
    pub client_reference_id: String,
    pub currency: String,
    pub line_items: Vec<CheckoutLineItem>,
    pub success_url: String,
    pub cancel_url: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl CheckoutSessionRequest {
    pub fn amount_total(&self) -> i64 {
        self.line_items.iter().map(CheckoutLineItem::amount).sum()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cannot start checkout for an empty cart")]
    EmptyCart,
    #[error("unit amount {amount} for product `{product_id}` cannot be sent to the processor")]
    AmountOutOfRange { product_id: ProductId, amount: Decimal },
}

pub fn build_checkout_session(
    pricing: &CartPricing,
    settings: &CheckoutSettings,
    now: DateTime<Utc>,
) -> Result<CheckoutSessionRequest, CheckoutError> {
    if pricing.lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let line_items = pricing.lines.iter().map(line_item).collect::<Result<Vec<_>, _>>()?;

    Ok(CheckoutSessionRequest {
        mode: "payment".to_string(),
        client_reference_id: pricing.trace.cart_id.to_string(),
        currency: pricing.trace.currency.to_ascii_lowercase(),
        line_items,
        success_url: settings.success_url.clone(),
        cancel_url: settings.cancel_url.clone(),
        expires_at: now + Duration::minutes(i64::from(settings.session_ttl_minutes)),
    })
}

fn line_item(line: &PricedLine) -> Result<CheckoutLineItem, CheckoutError> {
    let amount = line.discounted_unit_price();
    let unit_amount = (amount * Decimal::ONE_HUNDRED)
        .to_i64()
        .filter(|minor| *minor >= 0)
        .ok_or_else(|| CheckoutError::AmountOutOfRange {
            product_id: line.product_id.clone(),
            amount,
        })?;

    Ok(CheckoutLineItem { name: line.name.clone(), unit_amount, quantity: line.quantity })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{build_checkout_session, CheckoutError, CheckoutSettings};
    use crate::commerce::pricing::{price_cart, PricingPolicy};
    use crate::domain::cart::{Cart, LineSource};
    use crate::domain::product::{Product, ProductCategory, ProductId};

    fn settings() -> CheckoutSettings {
        CheckoutSettings {
            success_url: "https://shop.example/checkout/success".to_owned(),
            cancel_url: "https://shop.example/cart".to_owned(),
            session_ttl_minutes: 45,
        }
    }

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId(id.to_owned()),
            sku: id.to_ascii_uppercase(),
            name: format!("Product {id}"),
            category: ProductCategory::Skincare,
            price: Decimal::new(cents, 2),
            active: true,
        }
    }

    #[test]
    fn session_total_matches_cart_total() {
        let mut cart = Cart::new();
        cart.add_product(&product("serum", 3899), 1, LineSource::Bundle).expect("bundle");
        cart.add_product(&product("balm", 1450), 2, LineSource::Bundle).expect("bundle");
        cart.add_product(&product("mask", 2500), 1, LineSource::Catalog).expect("catalog");
        let pricing = price_cart(&cart, &PricingPolicy::default());
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("timestamp");

        let session = build_checkout_session(&pricing, &settings(), now).expect("session");

        assert_eq!(Decimal::new(session.amount_total(), 2), pricing.total);
        assert_eq!(session.client_reference_id, cart.id.to_string());
        assert_eq!(session.expires_at, now + Duration::minutes(45));
        // 38.99 less 5.85 discount.
        assert_eq!(session.line_items[0].unit_amount, 3314);
        assert_eq!(session.line_items[2].unit_amount, 2500);
    }

    #[test]
    fn empty_cart_is_rejected() {
        let pricing = price_cart(&Cart::new(), &PricingPolicy::default());
        let error = build_checkout_session(&pricing, &settings(), Utc::now()).expect_err("empty");
        assert_eq!(error, CheckoutError::EmptyCart);
    }

    #[test]
    fn expiry_serializes_as_unix_seconds() {
        let mut cart = Cart::new();
        cart.add_product(&product("serum", 1000), 1, LineSource::Catalog).expect("catalog");
        let pricing = price_cart(&cart, &PricingPolicy::default());
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("timestamp");

        let session = build_checkout_session(&pricing, &settings(), now).expect("session");
        let payload = serde_json::to_value(&session).expect("json");

        assert_eq!(payload["expires_at"], serde_json::json!(1_767_228_300_i64));
        assert_eq!(payload["line_items"][0]["unit_amount"], serde_json::json!(1000));
        assert_eq!(payload["mode"], "payment");
    }
}
