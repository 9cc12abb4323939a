//! Menu service errors.

use crumb::pricing::PricingError;
use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum MenuServiceError {
    #[error("menu item not found")]
    NotFound,

    #[error("menu item has an invalid price")]
    InvalidPrice(#[from] PricingError),

    #[error("menu request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for MenuServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
