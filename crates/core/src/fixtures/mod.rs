//! Fixtures
//!
//! YAML menus and carts used by tests and the command-line demo data.
//!
//! ```yaml
//! currency: NGN
//! products:
//!   sourdough:
//!     id: 1
//!     name: Sourdough Loaf
//!     price: 12.99 NGN
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    pricing::find_currency,
    products::Product,
};

pub mod items;
pub mod products;

pub use items::ItemsFixture;
pub use products::{MenuFixture, ProductFixture, parse_price};

/// Errors raised while loading fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture file could not be read.
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    /// Fixture YAML was malformed.
    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_norway::Error),

    /// Price string was not "AMOUNT CURRENCY".
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Currency code is not a known ISO currency.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// Item refers to a product key missing from the menu.
    #[error("unknown product key: {0}")]
    UnknownProduct(String),

    /// Product could not be added to the cart.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// A loaded menu, keyed by fixture product key.
#[derive(Debug, Clone)]
pub struct Fixture {
    currency: &'static Currency,
    products: BTreeMap<String, Product>,
}

impl Fixture {
    /// Load a menu from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the YAML or any product in it is invalid.
    pub fn from_menu_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let menu: MenuFixture = serde_norway::from_str(yaml)?;

        let currency = find_currency(&menu.currency)
            .map_err(|_err| FixtureError::UnknownCurrency(menu.currency.clone()))?;

        let products = menu
            .products
            .into_iter()
            .map(|(key, fixture)| Ok((key, Product::try_from(fixture)?)))
            .collect::<Result<_, FixtureError>>()?;

        Ok(Self { currency, products })
    }

    /// Load a menu from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed.
    pub fn from_menu_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Self::from_menu_yaml(&fs::read_to_string(path)?)
    }

    /// Store currency of the menu.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Look up a product by fixture key.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownProduct`] if the key is not on the menu.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::UnknownProduct(key.to_string()))
    }

    /// All products, ordered by key.
    pub fn products(&self) -> impl Iterator<Item = (&str, &Product)> {
        self.products
            .iter()
            .map(|(key, product)| (key.as_str(), product))
    }

    /// Build a cart by adding each listed product once per entry.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if a key is unknown or the cart rejects a product.
    pub fn cart(&self, items: &ItemsFixture) -> Result<Cart, FixtureError> {
        let mut cart = Cart::new(self.currency);

        for key in &items.items {
            cart.add_item(self.product(key)?)?;
        }

        Ok(cart)
    }

    /// Build a cart from an items YAML document.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the YAML is malformed or a key is unknown.
    pub fn cart_from_yaml(&self, yaml: &str) -> Result<Cart, FixtureError> {
        let items: ItemsFixture = serde_norway::from_str(yaml)?;

        self.cart(&items)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rusty_money::{Money, iso::NGN};
    use testresult::TestResult;

    use super::*;

    const MENU: &str = r"
currency: NGN
products:
  sourdough:
    id: 1
    name: Sourdough Loaf
    price: 12.99 NGN
    image: /uploads/sourdough.jpg
  croissant:
    id: 2
    name: Butter Croissant
    price: 3.50 NGN
";

    #[test]
    fn menu_yaml_loads_products() -> TestResult {
        let fixture = Fixture::from_menu_yaml(MENU)?;

        assert_eq!(fixture.currency(), NGN);
        assert_eq!(fixture.products().count(), 2);
        assert_eq!(
            fixture.product("croissant")?.price,
            Money::from_minor(350, NGN)
        );
        assert_eq!(fixture.product("croissant")?.image, "");

        Ok(())
    }

    #[test]
    fn unknown_product_key_errors() -> TestResult {
        let fixture = Fixture::from_menu_yaml(MENU)?;

        assert!(matches!(
            fixture.product("baguette"),
            Err(FixtureError::UnknownProduct(key)) if key == "baguette"
        ));

        Ok(())
    }

    #[test]
    fn repeated_items_collapse_into_one_line() -> TestResult {
        let fixture = Fixture::from_menu_yaml(MENU)?;
        let cart = fixture.cart_from_yaml("items: [sourdough, croissant, sourdough]")?;

        assert_eq!(cart.len(), 2);
        assert_eq!(
            cart.lines().first().map(|line| line.quantity()),
            NonZeroU32::new(2)
        );

        Ok(())
    }

    #[test]
    fn unknown_menu_currency_errors() {
        let result = Fixture::from_menu_yaml("currency: ZZZ\nproducts: {}\n");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ZZZ"));
    }
}
