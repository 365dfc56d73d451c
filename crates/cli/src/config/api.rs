//! Storefront server settings.

use std::time::Duration;

use clap::Args;
use storefront_app::api::ApiConfig;

/// Storefront server settings.
#[derive(Debug, Args)]
pub struct ApiArgs {
    /// Storefront server address
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:3000")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "STOREFRONT_API_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub api_timeout_seconds: u64,
}

impl ApiArgs {
    /// Client configuration for these settings.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.api_timeout_seconds),
        }
    }
}
