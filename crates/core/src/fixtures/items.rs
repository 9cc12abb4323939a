//! Item Fixtures

use serde::Deserialize;

/// Wrapper for cart items in YAML
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// Product keys, one entry per unit added to the cart
    pub items: Vec<String>,
}
