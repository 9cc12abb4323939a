//! Checkout errors.

use crumb::{
    checkout::{SettlementError, TransitionError, ValidationError},
    promotions::PromoError,
};
use thiserror::Error;

use crate::{
    checkout::{Notice, Route},
    domain::promotions::{INVALID_PROMO_MESSAGE, PromoServiceError},
    gateway::GatewayError,
    stores::CartStoreError,
};

/// Fallback when order creation fails without backend detail.
pub const ORDER_CREATION_FAILED: &str = "Failed to create order. Please try again.";

/// Fallback when verification fails without backend detail.
pub const VERIFICATION_FAILED: &str = "We could not verify your payment. Please try again.";

/// Failure recorded for a settlement that was dropped before it resolved.
pub const SETTLEMENT_ABANDONED: &str = "Checkout was interrupted. Please try again.";

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("a payment is already in progress")]
    AlreadyProcessing,

    #[error("cart is empty")]
    EmptyCart,

    #[error("payment gateway is not configured")]
    GatewayNotConfigured,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Promo(#[from] PromoServiceError),

    #[error("checkout totals could not be computed")]
    Pricing(#[from] PromoError),

    #[error("payment was cancelled")]
    PaymentCancelled,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("order creation failed: {0}")]
    OrderCreation(String),

    #[error("payment verification failed: {0}")]
    Verification(String),

    #[error(transparent)]
    Cart(#[from] CartStoreError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

impl CheckoutError {
    /// The one notice a front end should show for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            Self::AlreadyProcessing => Notice::info(
                "Payment in progress",
                "Please wait for the current payment to finish.",
            ),
            Self::EmptyCart => {
                Notice::error("Your cart is empty", "Add items before checking out.")
            }
            Self::GatewayNotConfigured => Notice::error(
                "Payment unavailable",
                "Payment is not configured. Please try again later.",
            ),
            Self::Validation(error) => {
                Notice::error("Check your details", capitalize(&error.to_string()))
            }
            Self::Promo(error) => Notice::error("Invalid promo code", promo_message(error)),
            Self::PaymentCancelled => Notice::error(
                "Payment cancelled",
                "You closed the payment window. Your cart has been kept.",
            ),
            Self::Gateway(error) => {
                Notice::error("Payment failed", capitalize(&error.to_string()))
            }
            Self::OrderCreation(message) => Notice::error("Order failed", message.clone()),
            Self::Verification(message) => {
                Notice::error("Payment verification failed", message.clone())
            }
            Self::Pricing(_) | Self::Cart(_) | Self::Transition(_) | Self::Settlement(_) => {
                Notice::error("Checkout failed", "Something went wrong. Please try again.")
            }
        }
    }

    /// Navigation the failure calls for, if any.
    pub fn route(&self) -> Option<Route> {
        matches!(self, Self::EmptyCart).then_some(Route::Cart)
    }
}

fn promo_message(error: &PromoServiceError) -> String {
    match error {
        PromoServiceError::EmptyCode => "Enter a promo code.".to_string(),
        PromoServiceError::Rejected(message) => message.clone(),
        PromoServiceError::InvalidDiscount(_) | PromoServiceError::Api(_) => {
            INVALID_PROMO_MESSAGE.to_string()
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
