//! Product detail.

use storefront::{
    cart::{CartStorage, CartStoreError},
    catalog::Product,
    checkout::Route,
    fetch::Fetch,
    messages,
    money::format_brl,
};
use tracing::warn;

use crate::{
    api::ApiError,
    context::AppContext,
    pages::{Notice, PageOutcome},
};

/// What the product detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    /// The product
    pub product: Product,

    /// Formatted price
    pub price: String,

    /// Stock label
    pub availability: &'static str,

    /// Units of this product already in the cart
    pub in_cart: u32,
}

/// Look a product up in the catalog, then on the server.
async fn find<S: CartStorage>(ctx: &AppContext<S>, slug: &str) -> Result<Option<Product>, ApiError> {
    if let Some(product) = ctx.catalog.find_by_slug(slug) {
        return Ok(Some(product.clone()));
    }

    match ctx.api.product_by_slug(slug).await {
        Ok(product) => Ok(Some(product)),
        Err(ApiError::NotFound(_)) => Ok(None),
        Err(error) => Err(error),
    }
}

/// Load the detail page for `slug`.
pub async fn view<S: CartStorage>(ctx: &AppContext<S>, slug: &str) -> Fetch<ProductView> {
    match find(ctx, slug).await {
        Ok(Some(product)) => Fetch::Success(ProductView {
            price: format_brl(product.price),
            availability: if product.is_in_stock() {
                messages::IN_STOCK
            } else {
                messages::UNAVAILABLE
            },
            in_cart: ctx.cart.cart().item(slug).map_or(0, |item| item.quantity),
            product,
        }),
        Ok(None) => Fetch::Failure(messages::PRODUCT_NOT_FOUND.to_string()),
        Err(error) => Fetch::Failure(error.user_message()),
    }
}

/// Add one unit of `slug` to the cart and open the cart.
///
/// Stock is re-read from the server when the product has a server id, so a
/// stale catalog cannot oversell.
pub async fn add_to_cart<S: CartStorage>(ctx: &mut AppContext<S>, slug: &str) -> PageOutcome {
    let product = match find(ctx, slug).await {
        Ok(Some(product)) => product,
        Ok(None) => return PageOutcome::notify(Notice::error(messages::PRODUCT_NOT_FOUND)),
        Err(error) => return PageOutcome::notify(Notice::error(error.user_message())),
    };

    let product = match &product.id {
        Some(id) => match ctx.api.product_by_id(id).await {
            Ok(fresh) => fresh,
            Err(error) => return PageOutcome::notify(Notice::error(error.user_message())),
        },
        None => product,
    };

    match ctx.cart.add_product(&product) {
        Ok(_) => PageOutcome::navigate(Route::Cart),
        Err(error @ CartStoreError::Storage(_)) => {
            warn!("cart saved in memory only: {error}");

            PageOutcome::navigate(Route::Cart).with_notice(Notice::error(error.to_string()))
        }
        Err(error) => PageOutcome::notify(Notice::error(error.to_string())),
    }
}
