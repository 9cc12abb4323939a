//! Settlement
//!
//! A settlement attempt correlates one payment across the gateway, order creation
//! and payment verification by a client-minted [`GatewayReference`]. Attempts are
//! never reused: every checkout mints a fresh reference.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for every minted gateway reference.
pub const REFERENCE_PREFIX: &str = "crumb";

/// Opaque token correlating a single payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayReference(String);

impl GatewayReference {
    /// Wrap an existing reference, e.g. one echoed back by the gateway.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GatewayReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mints timestamp-based gateway references that are unique per minter.
///
/// References are `crumb_<unix millis>`. Two mints within the same millisecond
/// (or after the clock steps backwards) still yield distinct, increasing values.
#[derive(Debug, Default)]
pub struct ReferenceMinter {
    last: Option<i64>,
}

impl ReferenceMinter {
    /// Create a minter with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a reference for the current time.
    pub fn mint(&mut self) -> GatewayReference {
        self.mint_at(Timestamp::now())
    }

    /// Mint a reference for `now`.
    pub fn mint_at(&mut self, now: Timestamp) -> GatewayReference {
        let millis = now.as_millisecond();

        let millis = match self.last {
            Some(last) if millis <= last => last.saturating_add(1),
            _ => millis,
        };

        self.last = Some(millis);

        GatewayReference(format!("{REFERENCE_PREFIX}_{millis}"))
    }
}

/// Order identifier assigned by the backend.
///
/// The backend may send ids as JSON numbers or strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireOrderId", into = "String")]
pub struct OrderId(String);

impl OrderId {
    /// Wrap a raw order id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireOrderId {
    Number(u64),
    Text(String),
}

impl From<WireOrderId> for OrderId {
    fn from(id: WireOrderId) -> Self {
        match id {
            WireOrderId::Number(number) => Self(number.to_string()),
            WireOrderId::Text(text) => Self(text),
        }
    }
}

/// Lifecycle of a settlement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Gateway has been opened with the reference
    Initiated,

    /// Backend accepted the pending order
    OrderCreated,

    /// Backend confirmed the payment
    Verified,

    /// Attempt ended without settling
    Failed,
}

impl SettlementStatus {
    /// Check if no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Verified | Self::Failed)
    }
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Initiated => "initiated",
            Self::OrderCreated => "order_created",
            Self::Verified => "verified",
            Self::Failed => "failed",
        })
    }
}

/// Errors raised by illegal settlement transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettlementError {
    /// The requested status cannot follow the current one.
    #[error("settlement {reference} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Attempt reference
        reference: GatewayReference,
        /// Current status
        from: SettlementStatus,
        /// Requested status
        to: SettlementStatus,
    },
}

/// One attempt to settle a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementAttempt {
    reference: GatewayReference,
    order_id: Option<OrderId>,
    status: SettlementStatus,
    failure: Option<String>,
}

impl SettlementAttempt {
    /// Start an attempt for a freshly minted reference.
    pub fn initiate(reference: GatewayReference) -> Self {
        Self {
            reference,
            order_id: None,
            status: SettlementStatus::Initiated,
            failure: None,
        }
    }

    /// Reference correlating this attempt.
    pub fn reference(&self) -> &GatewayReference {
        &self.reference
    }

    /// Backend order id, once the order has been created.
    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    /// Current status.
    pub fn status(&self) -> SettlementStatus {
        self.status
    }

    /// Failure message, if the attempt failed.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Record that the backend accepted the pending order.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::InvalidTransition`] unless the attempt is `Initiated`.
    pub fn order_created(&mut self, order_id: OrderId) -> Result<(), SettlementError> {
        self.advance(SettlementStatus::Initiated, SettlementStatus::OrderCreated)?;
        self.order_id = Some(order_id);

        Ok(())
    }

    /// Record that the backend verified the payment.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::InvalidTransition`] unless the order has been created.
    pub fn verified(&mut self) -> Result<(), SettlementError> {
        self.advance(SettlementStatus::OrderCreated, SettlementStatus::Verified)
    }

    /// Mark the attempt failed with a user-facing message.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::InvalidTransition`] if the attempt already ended.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), SettlementError> {
        if self.status.is_terminal() {
            return Err(self.invalid(SettlementStatus::Failed));
        }

        self.status = SettlementStatus::Failed;
        self.failure = Some(message.into());

        Ok(())
    }

    fn advance(
        &mut self,
        from: SettlementStatus,
        to: SettlementStatus,
    ) -> Result<(), SettlementError> {
        if self.status != from {
            return Err(self.invalid(to));
        }

        self.status = to;

        Ok(())
    }

    fn invalid(&self, to: SettlementStatus) -> SettlementError {
        SettlementError::InvalidTransition {
            reference: self.reference.clone(),
            from: self.status,
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn minted_references_use_millisecond_timestamp() -> TestResult {
        let mut minter = ReferenceMinter::new();
        let now = Timestamp::from_millisecond(1_700_000_000_123)?;

        assert_eq!(minter.mint_at(now).as_str(), "crumb_1700000000123");

        Ok(())
    }

    #[test]
    fn minted_references_are_unique_within_a_millisecond() -> TestResult {
        let mut minter = ReferenceMinter::new();
        let now = Timestamp::from_millisecond(1_700_000_000_000)?;

        let first = minter.mint_at(now);
        let second = minter.mint_at(now);
        let earlier = minter.mint_at(Timestamp::from_millisecond(1_600_000_000_000)?);

        assert_ne!(first, second);
        assert_eq!(second.as_str(), "crumb_1700000000001");
        assert_eq!(earlier.as_str(), "crumb_1700000000002");

        Ok(())
    }

    #[test]
    fn attempt_walks_to_verified() -> TestResult {
        let mut attempt = SettlementAttempt::initiate(GatewayReference::new("crumb_1"));

        attempt.order_created(OrderId::new("42"))?;
        attempt.verified()?;

        assert_eq!(attempt.status(), SettlementStatus::Verified);
        assert_eq!(attempt.order_id(), Some(&OrderId::new("42")));
        assert_eq!(attempt.failure(), None);

        Ok(())
    }

    #[test]
    fn verify_before_order_is_rejected() {
        let mut attempt = SettlementAttempt::initiate(GatewayReference::new("crumb_1"));

        assert_eq!(
            attempt.verified(),
            Err(SettlementError::InvalidTransition {
                reference: GatewayReference::new("crumb_1"),
                from: SettlementStatus::Initiated,
                to: SettlementStatus::Verified,
            })
        );
    }

    #[test]
    fn failed_attempt_is_terminal() -> TestResult {
        let mut attempt = SettlementAttempt::initiate(GatewayReference::new("crumb_1"));

        attempt.order_created(OrderId::new("7"))?;
        attempt.fail("Payment verification failed")?;

        assert_eq!(attempt.status(), SettlementStatus::Failed);
        assert_eq!(attempt.failure(), Some("Payment verification failed"));
        assert!(attempt.verified().is_err());
        assert!(attempt.fail("again").is_err());

        Ok(())
    }

    #[test]
    fn order_id_accepts_numbers_and_strings() -> TestResult {
        let number: OrderId = serde_norway::from_str("17")?;
        let text: OrderId = serde_norway::from_str("\"ord_17\"")?;

        assert_eq!(number, OrderId::new("17"));
        assert_eq!(text, OrderId::new("ord_17"));

        Ok(())
    }
}
