//! CLI configuration module

use std::time::Duration;

use clap::Args;
use crumb::pricing::{PricingError, find_currency, price_from_decimal};
use crumb_app::{api::ApiConfig, context::AppSettings};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::{
    api::ApiSettingsConfig, checkout::CheckoutConfig, observability::LoggingConfig,
    storage::StorageConfig,
};

pub(crate) mod api;
pub(crate) mod checkout;
pub(crate) mod observability;
pub(crate) mod storage;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid store currency: {0}")]
    Currency(#[source] PricingError),

    #[error("invalid delivery fee: {0}")]
    DeliveryFee(Decimal),
}

/// Crumb CLI configuration
#[derive(Debug, Args)]
pub(crate) struct AppConfig {
    /// Storefront API settings.
    #[command(flatten)]
    pub api: ApiSettingsConfig,

    /// Checkout and payment settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Client storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Resolve into application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency is unknown or the delivery fee is
    /// negative or unrepresentable.
    pub(crate) fn settings(&self) -> Result<AppSettings, ConfigError> {
        let currency = find_currency(&self.checkout.currency).map_err(ConfigError::Currency)?;
        let fee = self.checkout.delivery_fee;

        if fee.is_sign_negative() {
            return Err(ConfigError::DeliveryFee(fee));
        }

        let delivery_fee =
            price_from_decimal(fee, currency).map_err(|_err| ConfigError::DeliveryFee(fee))?;

        Ok(AppSettings {
            api: ApiConfig {
                base_url: self.api.api_url.clone(),
                timeout: Duration::from_secs(self.api.api_timeout_seconds),
            },
            storage_dir: self.storage.storage_dir.clone(),
            currency,
            delivery_fee,
            gateway_public_key: self
                .checkout
                .gateway_public_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
        })
    }
}
