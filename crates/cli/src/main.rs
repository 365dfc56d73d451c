//! Storefront terminal client

use std::{io, process::ExitCode, sync::Arc};

use storefront::{
    cart::{CartStorage, CartStore, JsonFileStorage, MemoryStorage},
    catalog::{Catalog, CatalogError},
};
use storefront_app::{
    api::{ApiError, HttpStorefrontApi},
    context::AppContext,
};
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    config::CliConfig,
    state::{StateDir, StateError},
};

mod commands;
mod config;
mod observability;
mod render;
mod state;

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to build storefront client: {0}")]
    Api(#[from] ApiError),

    #[error("failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Storefront terminal client entry point
#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(error) => error.exit(),
    };

    if let Err(error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for its own errors"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");

            ExitCode::FAILURE
        }
    }
}

async fn run(config: CliConfig) -> Result<(), CliError> {
    let state = StateDir::new(config.storage.state_dir.clone());
    let api = HttpStorefrontApi::new(config.api.api_config())?;

    debug!(api = api.base_url(), "storefront client ready");

    let catalog = match &config.storage.catalog {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::bundled()?,
    };

    let storage: Box<dyn CartStorage> = if config.storage.ephemeral_cart {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(JsonFileStorage::new(state.cart_path()))
    };

    let mut ctx = AppContext::new(Arc::new(api), CartStore::open(storage), catalog)
        .with_session(state.load_session());

    let mut out = io::stdout().lock();

    commands::run(&mut ctx, config.command, &mut out).await?;

    state.save_session(ctx.session())?;

    Ok(())
}
