//! Crumb prelude.
//!
//! Use this when driving a checkout from an application crate.

pub use crate::{
    cart::{Cart, CartError, CartLine, CartSnapshot},
    checkout::{
        CheckoutContext, CheckoutEvent, CheckoutState, CheckoutTotals, CustomerDetails,
        GatewayReference, OrderId, ReferenceMinter, SettlementAttempt, SettlementStatus,
        ValidationError,
    },
    pricing::{Price, PricingError},
    products::{Product, ProductId},
    promotions::{PromoDescriptor, PromoDiscount, PromoError, RawDiscount},
};
