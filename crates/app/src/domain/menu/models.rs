//! Menu Models

use crumb::{
    pricing::{PricingError, price_from_decimal},
    products::{Product, ProductId},
};
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::Deserialize;

/// Image shown for items without one.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Menu item as listed by the storefront.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuItem {
    pub id: ProductId,
    pub name: String,

    /// Unit price in major units
    pub price: Decimal,

    #[serde(default = "placeholder_image", deserialize_with = "image_or_placeholder")]
    pub image: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<MenuCategory>,
}

impl MenuItem {
    /// Convert into a cart product priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the price is negative or does not fit in minor units.
    pub fn to_product(&self, currency: &'static Currency) -> Result<Product, PricingError> {
        if self.price.is_sign_negative() {
            return Err(PricingError::InvalidAmount(self.price));
        }

        Ok(Product {
            id: self.id,
            name: self.name.clone(),
            price: price_from_decimal(self.price, currency)?,
            image: self.image.clone(),
        })
    }

    /// Category name, if the item has one.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuCategory {
    pub name: String,
}

fn placeholder_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

fn image_or_placeholder<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let image = Option::<String>::deserialize(deserializer)?;

    Ok(image
        .filter(|image| !image.trim().is_empty())
        .unwrap_or_else(placeholder_image))
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::NGN};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn item_converts_to_product() -> TestResult {
        let item: MenuItem = serde_json::from_value(json!({
            "id": 3,
            "name": "Cinnamon Roll",
            "price": 4.25,
            "image": "/uploads/menu/roll.jpg",
            "category": { "name": "Pastries" },
            "description": "Glazed"
        }))?;

        let product = item.to_product(NGN)?;

        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Money::from_minor(425, NGN));
        assert_eq!(item.category_name(), Some("Pastries"));

        Ok(())
    }

    #[test]
    fn missing_or_null_image_uses_placeholder() -> TestResult {
        let missing: MenuItem =
            serde_json::from_value(json!({ "id": 1, "name": "Loaf", "price": 1 }))?;
        let null: MenuItem =
            serde_json::from_value(json!({ "id": 1, "name": "Loaf", "price": 1, "image": null }))?;

        assert_eq!(missing.image, PLACEHOLDER_IMAGE);
        assert_eq!(null.image, PLACEHOLDER_IMAGE);

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() -> TestResult {
        let item: MenuItem =
            serde_json::from_value(json!({ "id": 1, "name": "Loaf", "price": -1 }))?;

        assert!(matches!(
            item.to_product(NGN),
            Err(PricingError::InvalidAmount(_))
        ));

        Ok(())
    }
}
