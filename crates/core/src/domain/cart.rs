use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::product::{Product, ProductId};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub String);

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a line came from. Bundle lines were added from quiz recommendations
/// and receive the bundle discount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSource {
    Catalog,
    Bundle,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub source: LineSource,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("product `{0}` is not available for purchase")]
    InactiveProduct(ProductId),
    #[error("product `{0}` is not in the catalog")]
    UnknownProduct(ProductId),
    #[error("cart has no {origin:?} line for product `{product_id}`")]
    LineNotFound { product_id: ProductId, origin: LineSource },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub lines: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: CartId(Uuid::new_v4().to_string()),
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn line(&self, product_id: &ProductId, source: LineSource) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == product_id && line.source == source)
    }

    /// Adds `quantity` units, merging with an existing line of the same
    /// product and source.
    pub fn add_product(
        &mut self,
        product: &Product,
        quantity: u32,
        source: LineSource,
    ) -> Result<&CartLine, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if !product.active {
            return Err(CartError::InactiveProduct(product.id.clone()));
        }

        let position = self
            .lines
            .iter()
            .position(|line| line.product_id == product.id && line.source == source);
        let position = match position {
            Some(position) => {
                let line = &mut self.lines[position];
                line.quantity = line.quantity.saturating_add(quantity);
                position
            }
            None => {
                self.lines.push(CartLine {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity,
                    source,
                });
                self.lines.len() - 1
            }
        };

        self.touch();
        Ok(&self.lines[position])
    }

    /// Sets a line's quantity; zero removes the line.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        source: LineSource,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(product_id, source).map(|_| ());
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| &line.product_id == product_id && line.source == source)
            .ok_or_else(|| CartError::LineNotFound {
                product_id: product_id.clone(),
                origin: source,
            })?;
        line.quantity = quantity;
        self.touch();
        Ok(())
    }

    pub fn remove(
        &mut self,
        product_id: &ProductId,
        source: LineSource,
    ) -> Result<CartLine, CartError> {
        let position = self
            .lines
            .iter()
            .position(|line| &line.product_id == product_id && line.source == source)
            .ok_or_else(|| CartError::LineNotFound {
                product_id: product_id.clone(),
                origin: source,
            })?;
        let removed = self.lines.remove(position);
        self.touch();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Cart, CartError, LineSource};
    use crate::domain::product::{Product, ProductCategory, ProductId};

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
    fn adding_the_same_product_twice_merges_quantity() {
        let mut cart = Cart::new();
        let serum = product("serum", 3800);

        cart.add_product(&serum, 1, LineSource::Catalog).expect("first add");
        let line = cart.add_product(&serum, 2, LineSource::Catalog).expect("second add");

        assert_eq!(line.quantity, 3);
        assert_eq!(line.line_total(), Decimal::new(11_400, 2));
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn catalog_and_bundle_lines_stay_separate() {
        let mut cart = Cart::new();
        let serum = product("serum", 3800);

        cart.add_product(&serum, 1, LineSource::Catalog).expect("catalog add");
        cart.add_product(&serum, 1, LineSource::Bundle).expect("bundle add");

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn zero_quantity_and_inactive_products_are_rejected() {
        let mut cart = Cart::new();
        let mut retired = product("retired", 1000);

        assert_eq!(
            cart.add_product(&retired, 0, LineSource::Catalog).map(|_| ()),
            Err(CartError::ZeroQuantity)
        );

        retired.active = false;
        assert_eq!(
            cart.add_product(&retired, 1, LineSource::Catalog).map(|_| ()),
            Err(CartError::InactiveProduct(ProductId("retired".to_owned())))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn setting_quantity_to_zero_removes_the_line() {
        let mut cart = Cart::new();
        let balm = product("balm", 1400);
        cart.add_product(&balm, 2, LineSource::Bundle).expect("add");

        cart.set_quantity(&balm.id, LineSource::Bundle, 5).expect("update");
        assert_eq!(cart.line(&balm.id, LineSource::Bundle).map(|line| line.quantity), Some(5));

        cart.set_quantity(&balm.id, LineSource::Bundle, 0).expect("remove via zero");
        assert!(cart.is_empty());
    }

    #[test]
    fn updating_a_missing_line_fails() {
        let mut cart = Cart::new();
        let error = cart
            .set_quantity(&ProductId("ghost".to_owned()), LineSource::Catalog, 1)
            .expect_err("no such line");
        assert!(matches!(error, CartError::LineNotFound { .. }));
    }
}
