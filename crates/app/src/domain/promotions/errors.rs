//! Promo service errors.

use crumb::promotions::PromoError;
use thiserror::Error;

use crate::api::ApiError;

/// Message shown when the promo authority rejects a code without detail.
pub const INVALID_PROMO_MESSAGE: &str = "Invalid promo code";

/// Promo service error variants.
#[derive(Debug, Error)]
pub enum PromoServiceError {
    /// Code was empty; no request was made.
    #[error("promo code cannot be empty")]
    EmptyCode,

    /// The promo authority rejected the code.
    #[error("{0}")]
    Rejected(String),

    /// The accepted code carried a discount that could not be interpreted.
    #[error("promo response had an invalid discount")]
    InvalidDiscount(#[from] PromoError),

    /// The promo authority could not be reached.
    #[error("promo request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for PromoServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_rejection() {
            return Self::Rejected(error.detail_or(INVALID_PROMO_MESSAGE));
        }

        Self::Api(error)
    }
}
