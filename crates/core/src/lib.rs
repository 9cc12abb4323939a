//! Crumb
//!
//! Cart, promo-code and two-phase checkout domain for the Crumb bakery storefront.
//!
//! Everything in this crate is synchronous and free of I/O (apart from fixture
//! loading); the network and persistence side lives in `crumb-app`.

pub mod cart;
pub mod checkout;
pub mod discounts;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
