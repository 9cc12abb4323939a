//! Checkout State Machine

use std::fmt;

use thiserror::Error;

/// Where a checkout session currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutState {
    /// Collecting contact and delivery details
    #[default]
    CollectingInfo,

    /// Details being collected with a promo applied
    PromoApplied,

    /// Waiting for the payment gateway to report back
    AwaitingGatewayResult,

    /// Creating the pending order on the backend
    CreatingOrder,

    /// Asking the backend to verify the payment
    VerifyingPayment,

    /// Payment verified and order recorded
    Settled,

    /// The last attempt failed
    Failed,
}

/// Something that happened during checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// Promo authority accepted a code
    PromoAccepted,

    /// Promo authority rejected a code
    PromoRejected,

    /// Customer removed the applied promo
    PromoRemoved,

    /// Gateway was opened with a fresh reference
    GatewayOpened,

    /// Gateway reported a successful charge
    GatewaySucceeded,

    /// Customer closed the gateway without paying
    GatewayClosed,

    /// Backend accepted the pending order
    OrderCreated,

    /// Backend verified the payment
    PaymentVerified,

    /// Gateway, order creation or verification failed
    StepFailed,

    /// Return to collecting details after an attempt ended
    Reset,
}

/// An event that is not valid in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot apply {event:?} while {from}")]
pub struct TransitionError {
    /// State the event was applied in
    pub from: CheckoutState,

    /// Rejected event
    pub event: CheckoutEvent,
}

impl CheckoutState {
    /// Next state after `event`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when `event` is not valid in this state.
    pub fn apply(self, event: CheckoutEvent) -> Result<Self, TransitionError> {
        use CheckoutEvent as E;
        use CheckoutState as S;

        let next = match (self, event) {
            (S::CollectingInfo | S::PromoApplied, E::PromoAccepted) => S::PromoApplied,
            (S::CollectingInfo | S::PromoApplied, E::PromoRejected | E::PromoRemoved) => {
                S::CollectingInfo
            }
            (S::CollectingInfo | S::PromoApplied, E::GatewayOpened) => S::AwaitingGatewayResult,
            (S::AwaitingGatewayResult, E::GatewaySucceeded) => S::CreatingOrder,
            (S::CreatingOrder, E::OrderCreated) => S::VerifyingPayment,
            (S::VerifyingPayment, E::PaymentVerified) => S::Settled,
            (S::AwaitingGatewayResult, E::GatewayClosed)
            | (
                S::AwaitingGatewayResult | S::CreatingOrder | S::VerifyingPayment,
                E::StepFailed,
            ) => S::Failed,
            (S::Failed | S::Settled, E::Reset) => S::CollectingInfo,
            (from, event) => return Err(TransitionError { from, event }),
        };

        Ok(next)
    }

    /// Check if a settlement is in flight and re-submission must be blocked.
    pub fn is_processing(self) -> bool {
        matches!(
            self,
            Self::AwaitingGatewayResult | Self::CreatingOrder | Self::VerifyingPayment
        )
    }

    /// Check if details and promos can still be edited.
    pub fn is_collecting(self) -> bool {
        matches!(self, Self::CollectingInfo | Self::PromoApplied)
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CollectingInfo => "collecting info",
            Self::PromoApplied => "promo applied",
            Self::AwaitingGatewayResult => "awaiting gateway result",
            Self::CreatingOrder => "creating order",
            Self::VerifyingPayment => "verifying payment",
            Self::Settled => "settled",
            Self::Failed => "failed",
        })
    }
}
