//! Storefront API errors.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be configured.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// An HTTP transport or decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the session; the stored session has been cleared.
    #[error("unauthorized")]
    Unauthorized {
        /// Backend-supplied detail, if any
        detail: Option<String>,
    },

    /// The API returned a non-2xx status.
    #[error("request failed with status {status}")]
    Status {
        /// Response status
        status: StatusCode,

        /// Backend-supplied detail, if any
        detail: Option<String>,
    },
}

impl ApiError {
    /// Backend-supplied detail text, if the API sent any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Status { detail, .. } => detail.as_deref(),
            Self::Client(_) | Self::Http(_) => None,
        }
    }

    /// Backend detail text, or `fallback` when there is none.
    pub fn detail_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    /// Check if the API answered with a non-2xx status.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::Status { .. })
    }

    /// Check if the API answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Pull a representative message out of an error body.
///
/// `{"detail": "text"}` yields the text; `{"detail": [{"msg": "..."}, ...]}`
/// yields the first message. Anything else yields `None`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail")? {
        Value::String(text) => non_blank(text),
        Value::Array(entries) => entries
            .first()?
            .get("msg")
            .and_then(Value::as_str)
            .and_then(non_blank),
        _ => None,
    }
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_extracted() {
        assert_eq!(
            extract_detail(r#"{"detail": "Promo code has expired"}"#).as_deref(),
            Some("Promo code has expired")
        );
    }

    #[test]
    fn first_validation_message_is_extracted() {
        let body = r#"{"detail": [{"loc": ["body", "phone"], "msg": "phone is too short"}, {"msg": "second"}]}"#;

        assert_eq!(extract_detail(body).as_deref(), Some("phone is too short"));
    }

    #[test]
    fn unstructured_bodies_have_no_detail() {
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": []}"#), None);
        assert_eq!(extract_detail(r#"{"detail": "  "}"#), None);
    }

    #[test]
    fn detail_or_prefers_backend_text() {
        let with_detail = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: Some("Cart is empty".to_string()),
        };
        let without_detail = ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            detail: None,
        };

        assert_eq!(with_detail.detail_or("Failed"), "Cart is empty");
        assert_eq!(without_detail.detail_or("Failed"), "Failed");
    }
}
