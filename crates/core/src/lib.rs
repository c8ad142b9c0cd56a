pub mod commerce;
pub mod config;
pub mod domain;
pub mod errors;
pub mod quiz;
pub mod recommend;
pub mod storefront;

pub use commerce::{
    add_bundle, build_checkout_session, price_cart, BundleAddOutcome, CartPricing, Catalog,
    CheckoutError, CheckoutSessionRequest, PricingEngine, PricingPolicy,
};
pub use domain::cart::{Cart, CartError, CartId, CartLine, LineSource};
pub use domain::product::{Product, ProductCategory, ProductId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use quiz::{AnswerSet, QuizError, QuizEvent, QuizSession, QuizVariant};
pub use recommend::{
    ProductMappingTable, Recommendation, RecommendationBundle, RecommendationEngine, RoutineSlot,
};
pub use storefront::Storefront;
