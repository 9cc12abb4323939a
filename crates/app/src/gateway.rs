//! Payment Gateway
//!
//! Boundary to the hosted payment widget. The widget either reports a charge
//! reference on success or reports that the customer closed it.

use async_trait::async_trait;
use crumb::checkout::GatewayReference;
use mockall::automock;
use serde::Serialize;
use thiserror::Error;

/// Metadata shown to the customer and recorded with the charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeMetadata {
    /// Delivery address
    pub delivery_address: String,

    /// Customer name
    pub customer_name: String,

    /// Contact phone number
    pub phone: String,
}

/// A charge handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeRequest {
    /// Payer email
    pub email: String,

    /// Amount in the currency's smallest unit
    pub amount_minor: i64,

    /// Merchant public key
    pub public_key: String,

    /// ISO alpha code of the charge currency
    pub currency: String,

    /// Client-minted reference for this attempt
    pub reference: GatewayReference,

    /// Customer-facing metadata
    pub metadata: ChargeMetadata,
}

/// How the gateway widget finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOutcome {
    /// Charge authorized; carries the reference echoed by the gateway.
    Success {
        /// Echoed reference
        reference: GatewayReference,
    },

    /// Customer closed the widget without paying.
    Closed,
}

/// Gateway-internal failures.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The widget could not be opened or failed mid-charge.
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),

    /// The gateway reported success for a different attempt.
    #[error("gateway returned reference {found}, expected {expected}")]
    ReferenceMismatch {
        /// Reference minted for this attempt
        expected: GatewayReference,

        /// Reference the gateway reported
        found: GatewayReference,
    },
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open the gateway for `charge` and wait for it to finish.
    async fn collect(&self, charge: ChargeRequest) -> Result<GatewayOutcome, GatewayError>;
}
