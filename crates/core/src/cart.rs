//! Cart
//!
//! An ordered collection of [`CartLine`]s keyed by product id. A line's quantity
//! is a [`NonZeroU32`], so a cart can never hold an empty line: setting a
//! quantity to zero or below removes the line instead.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    pricing::{Price, PricingError, find_currency, line_total, total_price},
    products::{Product, ProductId},
};

/// Version written into every [`CartSnapshot`].
pub const CART_SNAPSHOT_VERSION: u32 = 1;

/// Errors related to cart mutation or restoration.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A product's currency differs from the cart currency.
    #[error("product {product} has currency {found}, but cart has currency {expected}")]
    CurrencyMismatch {
        /// Offending product
        product: ProductId,
        /// Product currency
        found: &'static str,
        /// Cart currency
        expected: &'static str,
    },

    /// Unit prices must not be negative.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// Quantity left the `u32` range.
    #[error("quantity overflow for product {0}")]
    QuantityOverflow(ProductId),

    /// Snapshot was written by an incompatible version.
    #[error("unsupported cart snapshot version {0}")]
    UnsupportedVersion(u32),

    /// Snapshot currency could not be resolved.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A single product line in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product_id: ProductId,
    name: String,
    unit_price: Price,
    quantity: NonZeroU32,
    image: String,
}

impl CartLine {
    /// Product this line is for.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Product display name at the time it was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price at the time the product was added.
    pub fn unit_price(&self) -> &Price {
        &self.unit_price
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Image reference.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the line total leaves the minor-unit range.
    pub fn total(&self) -> Result<Price, PricingError> {
        line_total(&self.unit_price, self.quantity.get())
    }
}

/// Shopping cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    currency: &'static Currency,
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            lines: Vec::new(),
        }
    }

    /// Add one unit of `product`, returning the line's new quantity.
    ///
    /// Adding a product that is already in the cart increments its quantity
    /// rather than creating a second line.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::NegativePrice`]: the product price is below zero.
    /// - [`CartError::QuantityOverflow`]: the line is already at `u32::MAX`.
    pub fn add_item(&mut self, product: &Product) -> Result<NonZeroU32, CartError> {
        let price_currency = product.price.currency();

        if price_currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                product: product.id,
                found: price_currency.iso_alpha_code,
                expected: self.currency.iso_alpha_code,
            });
        }

        if product.price.to_minor_units() < 0 {
            return Err(CartError::NegativePrice(product.id));
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line
                .quantity
                .checked_add(1)
                .ok_or(CartError::QuantityOverflow(product.id))?;

            return Ok(line.quantity);
        }

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: NonZeroU32::MIN,
            image: product.image.clone(),
        });

        Ok(NonZeroU32::MIN)
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or below removes the line. Unknown products are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if `quantity` exceeds `u32::MAX`.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        let Ok(quantity) = u32::try_from(quantity.max(0)) else {
            return Err(CartError::QuantityOverflow(product_id));
        };

        let Some(quantity) = NonZeroU32::new(quantity) else {
            self.remove_item(product_id);

            return Ok(());
        };

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = quantity;
        }

        Ok(())
    }

    /// Remove the line for `product_id`, returning it if it was present.
    pub fn remove_item(&mut self, product_id: ProductId) -> Option<CartLine> {
        let index = self.position(product_id)?;

        Some(self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Sum of `unit_price × quantity` across all lines. An empty cart totals zero.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total leaves the minor-unit range.
    pub fn total_price(&self) -> Result<Price, PricingError> {
        let totals = self
            .lines
            .iter()
            .map(CartLine::total)
            .collect::<Result<Vec<_>, _>>()?;

        total_price(&totals, self.currency)
    }

    /// Line for `product_id`, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Lines in display (insertion) order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Whole-document persisted form of the cart.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            version: CART_SNAPSHOT_VERSION,
            currency: self.currency.iso_alpha_code.to_string(),
            items: self
                .lines
                .iter()
                .map(|line| CartLineSnapshot {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    unit_price: line.unit_price.to_minor_units(),
                    quantity: line.quantity,
                    image: line.image.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild a cart from a persisted snapshot.
    ///
    /// Duplicate product ids are merged into one line.
    ///
    /// # Errors
    ///
    /// - [`CartError::UnsupportedVersion`]: the snapshot version is not understood.
    /// - [`CartError::Pricing`]: the snapshot currency is unknown.
    /// - [`CartError::NegativePrice`] / [`CartError::QuantityOverflow`]: a line is invalid.
    pub fn from_snapshot(snapshot: CartSnapshot) -> Result<Self, CartError> {
        if snapshot.version != CART_SNAPSHOT_VERSION {
            return Err(CartError::UnsupportedVersion(snapshot.version));
        }

        let currency = find_currency(&snapshot.currency)?;
        let mut cart = Self::new(currency);

        for item in snapshot.items {
            if item.unit_price < 0 {
                return Err(CartError::NegativePrice(item.product_id));
            }

            if let Some(index) = cart.position(item.product_id)
                && let Some(line) = cart.lines.get_mut(index)
            {
                line.quantity = line
                    .quantity
                    .checked_add(item.quantity.get())
                    .ok_or(CartError::QuantityOverflow(item.product_id))?;

                continue;
            }

            cart.lines.push(CartLine {
                product_id: item.product_id,
                name: item.name,
                unit_price: Money::from_minor(item.unit_price, currency),
                quantity: item.quantity,
                image: item.image,
            });
        }

        Ok(cart)
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_id == product_id)
    }
}

/// Persisted cart document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// ISO alpha code of the cart currency
    pub currency: String,

    /// Lines in display order
    pub items: Vec<CartLineSnapshot>,
}

/// Persisted cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineSnapshot {
    /// Menu item id
    pub product_id: ProductId,

    /// Display name
    pub name: String,

    /// Unit price in minor units
    pub unit_price: i64,

    /// Quantity, never zero
    pub quantity: NonZeroU32,

    /// Image reference
    pub image: String,
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn cake(id: u64, minor: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Cake {id}"),
            price: Money::from_minor(minor, GBP),
            image: format!("/uploads/cake-{id}.jpg"),
        }
    }

    #[test]
    fn add_item_inserts_line_with_quantity_one() -> TestResult {
        let mut cart = Cart::new(GBP);

        let quantity = cart.add_item(&cake(1, 1299))?;

        assert_eq!(quantity.get(), 1);
        assert_eq!(cart.lines().first().map(CartLine::name), Some("Cake 1"));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn adding_same_product_twice_increments_quantity() -> TestResult {
        let mut cart = Cart::new(GBP);
        let product = cake(1, 1299);

        cart.add_item(&product)?;
        let quantity = cart.add_item(&product)?;

        assert_eq!(quantity.get(), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.line(product.id).map(|line| line.quantity().get()),
            Some(2)
        );

        Ok(())
    }

    #[test]
    fn add_item_currency_mismatch_errors() {
        let mut cart = Cart::new(GBP);
        let product = Product {
            price: Money::from_minor(100, USD),
            ..cake(1, 100)
        };

        let result = cart.add_item(&product);

        assert_eq!(
            result,
            Err(CartError::CurrencyMismatch {
                product: ProductId::new(1),
                found: "USD",
                expected: "GBP",
            })
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn add_item_negative_price_errors() {
        let mut cart = Cart::new(GBP);

        let result = cart.add_item(&cake(1, -1));

        assert_eq!(result, Err(CartError::NegativePrice(ProductId::new(1))));
    }

    #[test]
    fn update_quantity_sets_quantity() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(&cake(1, 1299))?;
        cart.update_quantity(ProductId::new(1), 5)?;

        assert_eq!(cart.total_items(), 5);

        Ok(())
    }

    #[test]
    fn update_quantity_zero_removes_line() -> TestResult {
        let mut with_update = Cart::new(GBP);
        let mut with_remove = Cart::new(GBP);

        for cart in [&mut with_update, &mut with_remove] {
            cart.add_item(&cake(1, 1299))?;
            cart.add_item(&cake(2, 500))?;
        }

        with_update.update_quantity(ProductId::new(1), 0)?;
        with_remove.remove_item(ProductId::new(1));

        assert_eq!(with_update, with_remove);
        assert!(with_update.line(ProductId::new(1)).is_none());

        Ok(())
    }

    #[test]
    fn update_quantity_negative_removes_line() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(&cake(1, 1299))?;
        cart.update_quantity(ProductId::new(1), -3)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_unknown_product_is_ignored() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.update_quantity(ProductId::new(9), 3)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_beyond_u32_errors() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(&cake(1, 100))?;

        let result = cart.update_quantity(ProductId::new(1), i64::from(u32::MAX) + 1);

        assert_eq!(result, Err(CartError::QuantityOverflow(ProductId::new(1))));

        Ok(())
    }

    #[test]
    fn remove_unknown_item_is_noop() {
        let mut cart = Cart::new(GBP);

        assert!(cart.remove_item(ProductId::new(1)).is_none());
    }

    #[test]
    fn totals_follow_lines() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(&cake(1, 1299))?;
        cart.add_item(&cake(1, 1299))?;
        cart.add_item(&cake(2, 450))?;

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price()?, Money::from_minor(3048, GBP));

        Ok(())
    }

    #[test]
    fn empty_cart_totals_zero() -> TestResult {
        let cart = Cart::new(GBP);

        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price()?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(&cake(1, 1299))?;
        cart.clear();

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn lines_keep_insertion_order() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(&cake(3, 100))?;
        cart.add_item(&cake(1, 100))?;
        cart.add_item(&cake(3, 100))?;

        let ids: Vec<u64> = cart
            .lines()
            .iter()
            .map(|line| line.product_id().get())
            .collect();

        assert_eq!(ids, vec![3, 1]);

        Ok(())
    }

    #[test]
    fn snapshot_restores_identical_cart() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(&cake(1, 1299))?;
        cart.add_item(&cake(2, 450))?;
        cart.update_quantity(ProductId::new(2), 4)?;

        let restored = Cart::from_snapshot(cart.snapshot())?;

        assert_eq!(restored, cart);

        Ok(())
    }

    #[test]
    fn from_snapshot_merges_duplicate_products() -> TestResult {
        let line = CartLineSnapshot {
            product_id: ProductId::new(1),
            name: "Cake 1".to_string(),
            unit_price: 1299,
            quantity: NonZeroU32::MIN,
            image: String::new(),
        };

        let cart = Cart::from_snapshot(CartSnapshot {
            version: CART_SNAPSHOT_VERSION,
            currency: "GBP".to_string(),
            items: vec![line.clone(), line],
        })?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 2);

        Ok(())
    }

    #[test]
    fn from_snapshot_rejects_unknown_version() {
        let result = Cart::from_snapshot(CartSnapshot {
            version: 99,
            currency: "GBP".to_string(),
            items: Vec::new(),
        });

        assert_eq!(result, Err(CartError::UnsupportedVersion(99)));
    }

    #[test]
    fn from_snapshot_rejects_unknown_currency() {
        let result = Cart::from_snapshot(CartSnapshot {
            version: CART_SNAPSHOT_VERSION,
            currency: "???".to_string(),
            items: Vec::new(),
        });

        assert!(matches!(result, Err(CartError::Pricing(_))));
    }
}
