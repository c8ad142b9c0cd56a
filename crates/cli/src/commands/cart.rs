use chrono::Utc;
use glowcart_core::domain::product::ProductId;
use glowcart_core::quiz::QuizVariant;
use glowcart_core::storefront::Storefront;
use serde_json::json;

use super::{load_config, to_data, CommandResult};

const COMMAND: &str = "cart";

/// Walks the quiz with the picked option indexes, moves the recommendations
/// into a fresh cart, adds any extra catalog products, then prices the cart
/// and builds the checkout payload.
pub fn run(variant: Option<QuizVariant>, picks: &[usize], extra: &[String]) -> CommandResult {
    let config = match load_config(COMMAND) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let mut store = Storefront::new(&config);
    store.start_quiz(variant.unwrap_or(config.quiz.default_variant));

    for option in picks {
        if let Err(error) = store.answer(*option) {
            return CommandResult::domain_failure(COMMAND, error);
        }
    }

    let outcome = match store.add_recommendations_to_cart() {
        Ok(outcome) => outcome,
        Err(error) => return CommandResult::domain_failure(COMMAND, error),
    };

    for product_id in extra {
        if let Err(error) = store.add_product(&ProductId(product_id.clone()), 1) {
            return CommandResult::domain_failure(COMMAND, error);
        }
    }

    let pricing = store.cart_pricing();
    let checkout = match store.checkout_request(Utc::now()) {
        Ok(checkout) => checkout,
        Err(error) => return CommandResult::domain_failure(COMMAND, error),
    };

    let data = match (
        to_data(COMMAND, &outcome),
        to_data(COMMAND, &pricing),
        to_data(COMMAND, &checkout),
    ) {
        (Ok(outcome), Ok(pricing), Ok(checkout)) => {
            json!({ "bundle": outcome, "pricing": pricing, "checkout": checkout })
        }
        (Err(failure), _, _) | (_, Err(failure), _) | (_, _, Err(failure)) => return failure,
    };

    let currency = pricing.trace.currency.to_ascii_uppercase();
    let mut lines =
        vec![format!("cart {} with {} items", store.cart().id, store.cart().item_count())];
    for line in &pricing.lines {
        lines.push(format!(
            "- {} x{} @ {} (-{}) = {}",
            line.name, line.quantity, line.unit_price, line.unit_discount, line.line_total
        ));
    }
    lines.push(format!("subtotal {} {currency}", pricing.subtotal));
    lines.push(format!("bundle discount -{} {currency}", pricing.bundle_discount));
    lines.push(format!("total {} {currency}", pricing.total));
    if !outcome.unresolved.is_empty() {
        lines.push(format!("not in catalog: {}", outcome.unresolved.join(", ")));
    }

    CommandResult::success_with_data(COMMAND, lines.join("\n"), data)
}
