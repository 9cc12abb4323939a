//! Test Helpers

use crumb::{
    checkout::CustomerDetails,
    products::{Product, ProductId},
};
use rusty_money::{Money, iso::NGN};

pub(crate) fn loaf() -> Product {
    Product {
        id: ProductId::new(1),
        name: "Sourdough Loaf".to_string(),
        price: Money::from_minor(1299, NGN),
        image: "/uploads/menu/sourdough.jpg".to_string(),
    }
}

pub(crate) fn croissant() -> Product {
    Product {
        id: ProductId::new(2),
        name: "Butter Croissant".to_string(),
        price: Money::from_minor(350, NGN),
        image: "/uploads/menu/croissant.jpg".to_string(),
    }
}

pub(crate) fn customer() -> CustomerDetails {
    CustomerDetails {
        email: "ada@example.com".to_string(),
        name: "Ada Obi".to_string(),
        phone: "08012345678".to_string(),
        address: "12 Bakers Row, Ikeja".to_string(),
    }
}
