//! Promotions

mod errors;
pub mod models;
pub mod service;

pub use errors::{INVALID_PROMO_MESSAGE, PromoServiceError};
pub use service::*;
