//! Storefront API Config

use clap::Args;

/// Storefront API settings.
#[derive(Debug, Args)]
pub(crate) struct ApiSettingsConfig {
    /// Storefront API base URL
    #[arg(long, env = "CRUMB_API_URL")]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "CRUMB_API_TIMEOUT_SECONDS", default_value_t = 30)]
    pub api_timeout_seconds: u64,
}
