use std::io;

use clap::Subcommand;
use storefront::{cart::CartStorage, fetch::Fetch};
use storefront_app::{
    context::AppContext,
    pages::{cart, product},
};

use crate::render;

/// Cart actions.
#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart
    Show,

    /// Add one unit of a product
    Add {
        /// Product slug
        slug: String,
    },

    /// Set the quantity of a line
    Update {
        /// Product slug
        slug: String,

        /// New quantity
        quantity: u32,
    },

    /// Remove a line
    Remove {
        /// Product slug
        slug: String,
    },

    /// Start checkout
    Checkout,
}

pub(crate) async fn show_product<S: CartStorage>(
    ctx: &AppContext<S>,
    slug: &str,
    out: &mut impl io::Write,
) -> io::Result<()> {
    match product::view(ctx, slug).await {
        Fetch::Success(view) => render::write_product(out, &view),
        Fetch::Failure(message) => writeln!(out, "{message}"),
        Fetch::Idle | Fetch::Loading => Ok(()),
    }
}

pub(crate) async fn run<S: CartStorage>(
    ctx: &mut AppContext<S>,
    command: CartCommand,
    out: &mut impl io::Write,
) -> io::Result<()> {
    let outcome = match command {
        CartCommand::Show => return render::write_cart(out, &cart::view(ctx)),
        CartCommand::Add { slug } => product::add_to_cart(ctx, &slug).await,
        CartCommand::Update { slug, quantity } => cart::update_quantity(ctx, &slug, quantity),
        CartCommand::Remove { slug } => cart::remove_item(ctx, &slug),
        CartCommand::Checkout => cart::checkout(ctx),
    };

    render::write_outcome(out, &outcome)?;

    if outcome.notice.as_ref().is_none_or(|notice| !notice.is_error()) {
        render::write_cart(out, &cart::view(ctx))?;
    }

    Ok(())
}
