//! Checkout Config

use clap::Args;
use rust_decimal::Decimal;

/// Checkout and payment settings.
#[derive(Debug, Args)]
pub(crate) struct CheckoutConfig {
    /// Payment gateway public key; checkout is refused without one
    #[arg(long, env = "CRUMB_GATEWAY_PUBLIC_KEY", hide_env_values = true)]
    pub gateway_public_key: Option<String>,

    /// Store currency (ISO 4217 alpha code)
    #[arg(long, env = "CRUMB_CURRENCY", default_value = "GHS")]
    pub currency: String,

    /// Flat delivery fee in major units
    #[arg(long, env = "CRUMB_DELIVERY_FEE", default_value = "5.00")]
    pub delivery_fee: Decimal,
}
