//! CLI configuration module

use clap::Parser;

use crate::{
    commands::Command,
    config::{api::ApiArgs, observability::LoggingConfig, storage::StorageArgs},
};

pub(crate) mod api;
pub(crate) mod observability;
pub(crate) mod storage;

/// Storefront terminal client
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront terminal client", long_about = None)]
pub struct CliConfig {
    /// Storefront server settings.
    #[command(flatten)]
    pub api: ApiArgs,

    /// Local state settings.
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Screen or action to run.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
