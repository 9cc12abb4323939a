//! Product Fixtures

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    pricing::{Price, find_currency, price_from_decimal},
    products::{Product, ProductId},
};

/// Wrapper for a menu in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Store currency code (e.g. "NGN")
    pub currency: String,

    /// Map of product key -> product fixture
    pub products: BTreeMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Menu item id
    pub id: u64,

    /// Product name
    pub name: String,

    /// Product price (e.g., "12.99 NGN")
    pub price: String,

    /// Image reference
    #[serde(default)]
    pub image: String,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId::new(fixture.id),
            name: fixture.name,
            price: parse_price(&fixture.price)?,
            image: fixture.image,
        })
    }
}

/// Parse price string (e.g., "12.99 NGN") into a [`Price`]
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<Price, FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = find_currency(currency_code)
        .map_err(|_err| FixtureError::UnknownCurrency(currency_code.to_string()))?;

    price_from_decimal(amount, currency).map_err(|_err| FixtureError::InvalidPrice(s.to_string()))
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{GBP, NGN},
    };

    use super::*;

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("12.99NGN");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_trailing_tokens() {
        let result = parse_price("12.99 NGN extra");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_accepts_any_iso_currency() -> Result<(), FixtureError> {
        assert_eq!(parse_price("12.99 NGN")?, Money::from_minor(1299, NGN));
        assert_eq!(parse_price("2.50 GBP")?, Money::from_minor(250, GBP));

        Ok(())
    }

    #[test]
    fn product_fixture_converts_to_product() -> Result<(), FixtureError> {
        let product = Product::try_from(ProductFixture {
            id: 7,
            name: "Sourdough Loaf".to_string(),
            price: "12.99 NGN".to_string(),
            image: "/uploads/sourdough.jpg".to_string(),
        })?;

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.price, Money::from_minor(1299, NGN));

        Ok(())
    }
}
