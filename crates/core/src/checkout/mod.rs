//! Checkout
//!
//! Pure checkout building blocks: customer detail validation, totals, the
//! settlement attempt lifecycle and the checkout state machine. Network calls
//! and persistence live in the application crate.

mod details;
mod settlement;
mod state;
mod totals;

pub use details::{
    CustomerDetails, Field, MIN_ADDRESS_LENGTH, MIN_PHONE_LENGTH, Reason, ValidationError,
};
pub use settlement::{
    GatewayReference, OrderId, REFERENCE_PREFIX, ReferenceMinter, SettlementAttempt,
    SettlementError, SettlementStatus,
};
pub use state::{CheckoutEvent, CheckoutState, TransitionError};
pub use totals::{CheckoutContext, CheckoutTotals};
