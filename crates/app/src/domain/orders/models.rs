//! Order Models

use std::fmt;

use crumb::{
    checkout::{CheckoutContext, GatewayReference, OrderId},
    pricing::major_units,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order creation payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    /// Cart subtotal in major units
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,

    /// Amount charged through the gateway
    #[serde(with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,

    pub payment_reference: GatewayReference,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    /// Build the payload for a priced checkout paid under `reference`.
    pub fn from_checkout(context: &CheckoutContext, reference: &GatewayReference) -> Self {
        let customer = context.customer.trimmed();
        let totals = &context.totals;

        Self {
            amount: major_units(&totals.subtotal),
            delivery_fee: major_units(&totals.delivery_fee),
            final_amount: major_units(&totals.final_amount),
            payment_reference: reference.clone(),
            email: customer.email,
            name: customer.name,
            phone: customer.phone,
            address: customer.address,
            items: context
                .cart
                .lines()
                .iter()
                .map(|line| NewOrderItem {
                    menu_item_id: line.product_id().get(),
                    name: line.name().to_string(),
                    quantity: line.quantity().get(),
                    price: major_units(line.unit_price()),
                    image: line.image().to_string(),
                })
                .collect(),
        }
    }
}

/// Order line item payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderItem {
    pub menu_item_id: u64,
    pub name: String,
    pub quantity: u32,

    /// Unit price in major units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    pub image: String,
}

/// Order creation response. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderReceipt {
    pub id: OrderId,
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Delivered,
    Cancelled,

    /// A status this client does not know about
    #[serde(other)]
    Unknown,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        })
    }
}

/// Order as reported for tracking.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    pub is_paid: bool,

    #[serde(default)]
    pub payment_reference: Option<String>,

    #[serde(default)]
    pub final_amount: Option<Decimal>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub items: Vec<OrderRecordItem>,
}

/// Line item of a tracked order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecordItem {
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use crumb::{cart::Cart, checkout::CustomerDetails};
    use rusty_money::{Money, iso::NGN};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;
    use crate::test::{croissant, customer, loaf};

    #[test]
    fn payload_matches_wire_shape() -> TestResult {
        let mut cart = Cart::new(NGN);
        cart.add_item(&loaf())?;
        cart.add_item(&loaf())?;
        cart.add_item(&croissant())?;

        let context = CheckoutContext::new(
            CustomerDetails {
                name: "  Ada Obi ".to_string(),
                ..customer()
            },
            cart,
            Money::from_minor(500, NGN),
            None,
        )?;

        let reference = GatewayReference::new("crumb_1700000000000");
        let order = NewOrder::from_checkout(&context, &reference);

        assert_eq!(
            serde_json::to_value(&order)?,
            json!({
                "amount": 29.48,
                "delivery_fee": 5.0,
                "final_amount": 34.48,
                "payment_reference": "crumb_1700000000000",
                "email": "ada@example.com",
                "name": "Ada Obi",
                "phone": "08012345678",
                "address": "12 Bakers Row, Ikeja",
                "items": [
                    { "menu_item_id": 1, "name": "Sourdough Loaf", "quantity": 2, "price": 12.99, "image": "/uploads/menu/sourdough.jpg" },
                    { "menu_item_id": 2, "name": "Butter Croissant", "quantity": 1, "price": 3.5, "image": "/uploads/menu/croissant.jpg" }
                ]
            })
        );

        Ok(())
    }

    #[test]
    fn unknown_status_is_tolerated() -> TestResult {
        let record: OrderRecord = serde_json::from_value(json!({
            "id": 42,
            "status": "on_the_way",
            "final_amount": 30.98
        }))?;

        assert_eq!(record.id.as_str(), "42");
        assert_eq!(record.status, OrderStatus::Unknown);
        assert!(record.items.is_empty());

        Ok(())
    }
}
