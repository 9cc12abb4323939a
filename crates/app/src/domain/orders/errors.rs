//! Orders service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    /// The backend answered with a non-2xx status.
    #[error("order request rejected")]
    Rejected { detail: Option<String> },

    #[error("order request failed")]
    Api(#[source] ApiError),
}

impl OrdersServiceError {
    /// Backend detail text, or `fallback` when there is none.
    pub fn detail_or(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                detail: Some(detail),
            } => detail.clone(),
            Self::NotFound | Self::Rejected { detail: None } | Self::Api(_) => {
                fallback.to_string()
            }
        }
    }
}

impl From<ApiError> for OrdersServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        if error.is_rejection() {
            return Self::Rejected {
                detail: error.detail().map(str::to_string),
            };
        }

        Self::Api(error)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn backend_detail_wins_over_fallback() {
        let error = OrdersServiceError::from(ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: Some("Payment reference already used".to_string()),
        });

        assert_eq!(
            error.detail_or("Failed to create order"),
            "Payment reference already used"
        );
    }

    #[test]
    fn missing_detail_falls_back() {
        let error = OrdersServiceError::from(ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        });

        assert_eq!(error.detail_or("Failed to create order"), "Failed to create order");
    }

    #[test]
    fn not_found_is_distinguished() {
        let error = OrdersServiceError::from(ApiError::Status {
            status: StatusCode::NOT_FOUND,
            detail: Some("Order not found".to_string()),
        });

        assert!(matches!(error, OrdersServiceError::NotFound));
    }
}
