use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::commerce::catalog::Catalog;
use crate::domain::cart::{Cart, CartError, LineSource};
use crate::domain::product::ProductId;
use crate::recommend::RecommendationBundle;

/// What happened when a recommendation bundle was moved into a cart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleAddOutcome {
    pub added: Vec<ProductId>,
    /// Recommended names with no catalog record.
    pub unresolved: Vec<String>,
    /// Catalog records that exist but are not for sale.
    pub unavailable: Vec<ProductId>,
}

impl BundleAddOutcome {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && self.unavailable.is_empty()
    }
}

/// Adds one bundle-sourced unit for every distinct recommended product.
///
/// A product recommended for several slots (the AM and PM cleanser, say) is
/// added once. Names missing from the catalog and inactive products are
/// reported in the outcome; any other cart error stops the add.
pub fn add_bundle(
    cart: &mut Cart,
    bundle: &RecommendationBundle,
    catalog: &Catalog,
) -> Result<BundleAddOutcome, CartError> {
    let mut outcome = BundleAddOutcome::default();
    let mut seen = BTreeSet::new();

    for recommendation in bundle.iter() {
        if !seen.insert(recommendation.product.as_str()) {
            continue;
        }

        let Some(product) = catalog.find_by_name(&recommendation.product) else {
            warn!(
                event_name = "cart.bundle_product_unresolved",
                product = %recommendation.product,
                slot = %recommendation.slot,
                "recommended product has no catalog record"
            );
            outcome.unresolved.push(recommendation.product.clone());
            continue;
        };

        match cart.add_product(product, 1, LineSource::Bundle) {
            Ok(line) => outcome.added.push(line.product_id.clone()),
            Err(CartError::InactiveProduct(product_id)) => {
                warn!(
                    event_name = "cart.bundle_product_unavailable",
                    product_id = %product_id,
                    "recommended product is not for sale"
                );
                outcome.unavailable.push(product_id);
            }
            Err(error) => return Err(error),
        }
    }

    info!(
        event_name = "cart.bundle_added",
        cart_id = %cart.id,
        added = outcome.added.len(),
        unresolved = outcome.unresolved.len(),
        unavailable = outcome.unavailable.len(),
        "recommendation bundle added to cart"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::add_bundle;
    use crate::commerce::catalog::Catalog;
    use crate::domain::cart::{Cart, LineSource};
    use crate::domain::product::{Product, ProductCategory, ProductId};
    use crate::quiz::{AnswerSet, QuizVariant};
    use crate::recommend::{Recommendation, RecommendationBundle, RecommendationEngine, RoutineSlot};

    fn dry_skin_bundle() -> RecommendationBundle {
        let answers = AnswerSet::new()
            .with_tag(1, "Dry")
            .with_tag(2, "Barrier Repair/Hydration")
            .with_tag(3, "None")
            .with_tag(4, "Mineral SPF 30")
            .with_tag(5, "Hydration");
        RecommendationEngine::default().recommend(QuizVariant::Skincare, &answers)
    }

    #[test]
    fn products_shared_by_am_and_pm_are_added_once() {
        let catalog = Catalog::builtin();
        let bundle = dry_skin_bundle();
        let mut cart = Cart::new();

        let outcome = add_bundle(&mut cart, &bundle, &catalog).expect("bundle add");

        assert!(outcome.is_complete(), "{outcome:?}");
        assert!(cart.lines.iter().all(|line| line.source == LineSource::Bundle));
        assert!(cart.lines.iter().all(|line| line.quantity == 1));

        let cleanser = catalog.find_by_name("Cleanser - Gentle Sensitive Wash").expect("cleanser");
        assert!(cart.line(&cleanser.id, LineSource::Bundle).is_some());
        assert!(bundle.iter().count() > cart.lines.len());
        assert_eq!(outcome.added.len(), cart.lines.len());
    }

    #[test]
    fn unknown_names_are_reported_without_failing() {
        let mut bundle = RecommendationBundle::empty(QuizVariant::Haircare);
        bundle.haircare = Some(vec![
            Recommendation {
                product: "Shampoo - Bond Repair".to_owned(),
                slot: RoutineSlot::Shampoo,
                reason: "repair".to_owned(),
            },
            Recommendation {
                product: "Shampoo - Discontinued".to_owned(),
                slot: RoutineSlot::Shampoo,
                reason: "gone".to_owned(),
            },
        ]);
        let mut cart = Cart::new();

        let outcome = add_bundle(&mut cart, &bundle, &Catalog::builtin()).expect("bundle add");

        assert_eq!(outcome.added, vec![ProductId("prod_shp_bond".to_owned())]);
        assert_eq!(outcome.unresolved, vec!["Shampoo - Discontinued".to_owned()]);
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn inactive_products_are_flagged_unavailable() {
        let catalog = Catalog::new(vec![Product {
            id: ProductId("prod_old".to_owned()),
            sku: "OLD".to_owned(),
            name: "Lip Balm - Overnight Repair".to_owned(),
            category: ProductCategory::Lipcare,
            price: Decimal::new(1400, 2),
            active: false,
        }]);
        let mut bundle = RecommendationBundle::empty(QuizVariant::Skincare);
        bundle.lipcare = Some(vec![Recommendation {
            product: "Lip Balm - Overnight Repair".to_owned(),
            slot: RoutineSlot::LipCareNight,
            reason: "repair".to_owned(),
        }]);
        let mut cart = Cart::new();

        let outcome = add_bundle(&mut cart, &bundle, &catalog).expect("inactive is not fatal");

        assert_eq!(outcome.unavailable, vec![ProductId("prod_old".to_owned())]);
        assert!(outcome.added.is_empty());
        assert!(outcome.unresolved.is_empty());
        assert!(!outcome.is_complete());
        assert!(cart.is_empty());
    }
}
