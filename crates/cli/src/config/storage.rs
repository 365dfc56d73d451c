//! Local state settings.

use std::path::PathBuf;

use clap::Args;

/// Where the cart, the session and the catalog live.
#[derive(Debug, Args)]
pub struct StorageArgs {
    /// Directory holding the cart snapshot and the session
    #[arg(long, env = "STOREFRONT_STATE_DIR", default_value = ".storefront")]
    pub state_dir: PathBuf,

    /// YAML product catalog
    #[arg(long, env = "STOREFRONT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Keep the cart in memory for this run only
    #[arg(long, env = "STOREFRONT_EPHEMERAL_CART", default_value_t = false)]
    pub ephemeral_cart: bool,
}
