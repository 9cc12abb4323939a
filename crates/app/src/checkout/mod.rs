//! Checkout
//!
//! Drives one checkout session from collected details through the two-phase
//! settlement: gateway charge, pending order, then backend payment verification.

mod errors;
mod notifications;
mod orchestrator;

pub use errors::*;
pub use notifications::*;
pub use orchestrator::*;
