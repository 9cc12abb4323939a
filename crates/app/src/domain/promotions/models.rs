//! Promo Models

use crumb::promotions::RawDiscount;
use serde::{Deserialize, Serialize};

/// Promo validation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoValidation<'a> {
    pub code: &'a str,
}

/// Promo validation response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromoValidated {
    pub code: String,
    pub discount: RawDiscount,
}
