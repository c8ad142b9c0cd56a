pub mod bundle;
pub mod catalog;
pub mod checkout;
pub mod pricing;

pub use bundle::{add_bundle, BundleAddOutcome};
pub use catalog::Catalog;
pub use checkout::{
    build_checkout_session, CheckoutError, CheckoutLineItem, CheckoutSessionRequest,
    CheckoutSettings,
};
pub use pricing::{
    price_cart, BundleDiscountPricingEngine, CartPricing, PricedLine, PricingEngine, PricingPolicy,
    PricingTrace, PricingTraceStep,
};
