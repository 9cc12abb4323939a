//! Products

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pricing::Price;

/// Menu item identifier as assigned by the storefront API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw menu item id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw menu item id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A product that can be placed in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Menu item id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Image reference (URL or upload path)
    pub image: String,
}
