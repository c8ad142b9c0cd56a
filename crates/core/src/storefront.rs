use chrono::{DateTime, Utc};

use crate::commerce::bundle::{add_bundle, BundleAddOutcome};
use crate::commerce::catalog::Catalog;
use crate::commerce::checkout::{build_checkout_session, CheckoutSessionRequest, CheckoutSettings};
use crate::commerce::pricing::{BundleDiscountPricingEngine, CartPricing, PricingEngine};
use crate::config::AppConfig;
use crate::domain::cart::{Cart, CartError, CartLine, LineSource};
use crate::domain::product::ProductId;
use crate::errors::DomainError;
use crate::quiz::{QuizEvent, QuizSession, QuizTransition, QuizVariant};
use crate::recommend::RecommendationEngine;

/// Application state for one shopper: the active quiz, the cart, and the
/// read-only services both depend on.
pub struct Storefront {
    catalog: Catalog,
    engine: RecommendationEngine,
    pricing: Box<dyn PricingEngine>,
    checkout: CheckoutSettings,
    quiz: QuizSession,
    cart: Cart,
}

impl Storefront {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            catalog: Catalog::builtin(),
            engine: RecommendationEngine::default(),
            pricing: Box::new(BundleDiscountPricingEngine::new(config.pricing_policy())),
            checkout: config.checkout_settings(),
            quiz: QuizSession::new(config.quiz.default_variant),
            cart: Cart::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_engine(mut self, engine: RecommendationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_pricing_engine(mut self, pricing: impl PricingEngine + 'static) -> Self {
        self.pricing = Box::new(pricing);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Replaces the active quiz; earlier answers are discarded.
    pub fn start_quiz(&mut self, variant: QuizVariant) -> &QuizSession {
        self.quiz = QuizSession::new(variant);
        &self.quiz
    }

    pub fn answer(&mut self, option: usize) -> Result<QuizTransition, DomainError> {
        self.apply(QuizEvent::Answered { option })
    }

    pub fn go_back(&mut self) -> Result<QuizTransition, DomainError> {
        self.apply(QuizEvent::WentBack)
    }

    pub fn reset_quiz(&mut self) -> Result<QuizTransition, DomainError> {
        self.apply(QuizEvent::Reset)
    }

    fn apply(&mut self, event: QuizEvent) -> Result<QuizTransition, DomainError> {
        Ok(self.quiz.apply(event, &self.engine)?)
    }

    /// Moves the completed quiz's recommendations into the cart as bundle lines.
    pub fn add_recommendations_to_cart(&mut self) -> Result<BundleAddOutcome, DomainError> {
        let bundle = self.quiz.bundle()?;
        Ok(add_bundle(&mut self.cart, bundle, &self.catalog)?)
    }

    pub fn add_product(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<&CartLine, DomainError> {
        let product = self
            .catalog
            .find(product_id)
            .ok_or_else(|| CartError::UnknownProduct(product_id.clone()))?;
        Ok(self.cart.add_product(product, quantity, LineSource::Catalog)?)
    }

    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        source: LineSource,
        quantity: u32,
    ) -> Result<(), DomainError> {
        Ok(self.cart.set_quantity(product_id, source, quantity)?)
    }

    pub fn remove_line(
        &mut self,
        product_id: &ProductId,
        source: LineSource,
    ) -> Result<CartLine, DomainError> {
        Ok(self.cart.remove(product_id, source)?)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart_pricing(&self) -> CartPricing {
        self.pricing.price(&self.cart)
    }

    pub fn checkout_request(
        &self,
        now: DateTime<Utc>,
    ) -> Result<CheckoutSessionRequest, DomainError> {
        let pricing = self.cart_pricing();
        Ok(build_checkout_session(&pricing, &self.checkout, now)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::Storefront;
    use crate::commerce::checkout::CheckoutError;
    use crate::commerce::pricing::{BundleDiscountPricingEngine, PricingPolicy};
    use crate::config::AppConfig;
    use crate::domain::cart::{CartError, LineSource};
    use crate::domain::product::ProductId;
    use crate::errors::DomainError;
    use crate::quiz::{QuizError, QuizVariant};

    fn storefront() -> Storefront {
        Storefront::new(&AppConfig::default())
    }

    #[test]
    fn quiz_to_checkout_totals_agree() {
        let mut store = storefront();
        store.start_quiz(QuizVariant::Skincare);
        // Dry, Barrier Repair/Hydration, None, Mineral SPF 30, Hydration
        for option in [1, 3, 5, 0, 0] {
            store.answer(option).expect("valid answer");
        }

        let outcome = store.add_recommendations_to_cart().expect("completed quiz");
        assert!(outcome.is_complete());

        let spf = store
            .catalog()
            .find_by_name("Sunscreen - Mineral SPF 30")
            .map(|product| product.id.clone())
            .expect("spf");
        store.add_product(&spf, 1).expect("catalog add");

        let pricing = store.cart_pricing();
        assert!(pricing.bundle_discount > Decimal::ZERO);
        assert_eq!(pricing.total, pricing.subtotal - pricing.bundle_discount);

        let session = store.checkout_request(Utc::now()).expect("session");
        assert_eq!(Decimal::new(session.amount_total(), 2), pricing.total);
        assert_eq!(session.client_reference_id, store.cart().id.to_string());
        assert!(store.cart().line(&spf, LineSource::Catalog).is_some());
        assert!(store.cart().line(&spf, LineSource::Bundle).is_some());
    }

    #[test]
    fn recommendations_require_a_completed_quiz() {
        let mut store = storefront();
        store.answer(0).expect("first answer");

        let error = store.add_recommendations_to_cart().expect_err("quiz incomplete");
        assert_eq!(error, DomainError::Quiz(QuizError::NotCompleted { answered: 1, total: 5 }));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn going_back_past_the_first_question_is_an_error() {
        let mut store = storefront();
        assert_eq!(store.go_back(), Err(DomainError::Quiz(QuizError::AtFirstQuestion)));
    }

    #[test]
    fn unknown_products_cannot_be_added() {
        let mut store = storefront();
        let missing = ProductId("prod_missing".to_owned());

        let error = store.add_product(&missing, 1).expect_err("unknown product");
        assert_eq!(error, DomainError::Cart(CartError::UnknownProduct(missing)));
    }

    #[test]
    fn empty_cart_cannot_check_out() {
        let store = storefront();
        assert_eq!(
            store.checkout_request(Utc::now()),
            Err(DomainError::Checkout(CheckoutError::EmptyCart))
        );
    }

    #[test]
    fn injected_pricing_engine_is_used() {
        let mut store = storefront()
            .with_pricing_engine(BundleDiscountPricingEngine::new(PricingPolicy::new("usd", 0)));
        store.start_quiz(QuizVariant::Haircare);
        store.answer(2).expect("hair type");
        store.answer(4).expect("hair concern");
        store.add_recommendations_to_cart().expect("completed quiz");

        let pricing = store.cart_pricing();
        assert_eq!(pricing.bundle_discount, Decimal::ZERO);
        assert_eq!(pricing.total, pricing.subtotal);

        store.reset_quiz().expect("reset");
        assert!(!store.quiz().is_completed());
        assert_eq!(store.cart().item_count(), 4);
    }
}
