//! Cart page.

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use storefront::{
    cart::{CartItem, CartStorage},
    checkout::Route,
    messages,
};

use crate::{
    context::AppContext,
    pages::{Notice, PageOutcome},
};

/// A row of the cart table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Product slug
    pub slug: String,

    /// Product name
    pub name: String,

    /// Image reference
    pub image: String,

    /// Unit price
    pub price: Decimal,

    /// Units in the cart
    pub quantity: u32,

    /// Quantities the selector offers
    pub quantity_options: RangeInclusive<u32>,

    /// Unit price times quantity
    pub line_total: Decimal,
}

impl From<&CartItem> for CartLine {
    fn from(item: &CartItem) -> Self {
        Self {
            slug: item.slug.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            price: item.price,
            quantity: item.quantity,
            quantity_options: 1..=item.count_in_stock,
            line_total: item.line_total(),
        }
    }
}

/// What the cart page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Cart rows, in insertion order
    pub lines: Vec<CartLine>,

    /// Total units
    pub item_count: u32,

    /// Sum of line totals
    pub subtotal: Decimal,

    /// Text shown instead of the table when the cart is empty
    pub empty_message: Option<&'static str>,
}

/// Build the cart page.
pub fn view<S: CartStorage>(ctx: &AppContext<S>) -> CartView {
    let cart = ctx.cart.cart();

    CartView {
        lines: cart.cart_items.iter().map(CartLine::from).collect(),
        item_count: cart.item_count(),
        subtotal: cart.subtotal(),
        empty_message: cart.is_empty().then_some(messages::CART_EMPTY),
    }
}

/// Change the quantity of a line.
pub fn update_quantity<S: CartStorage>(
    ctx: &mut AppContext<S>,
    slug: &str,
    quantity: u32,
) -> PageOutcome {
    match ctx.cart.update_quantity(slug, quantity) {
        Ok(_) => PageOutcome::stay(),
        Err(error) => PageOutcome::notify(Notice::error(error.to_string())),
    }
}

/// Drop a line.
pub fn remove_item<S: CartStorage>(ctx: &mut AppContext<S>, slug: &str) -> PageOutcome {
    match ctx.cart.remove_item(slug) {
        Ok(_) => PageOutcome::stay(),
        Err(error) => PageOutcome::notify(Notice::error(error.to_string())),
    }
}

/// Start checkout.
///
/// Checkout always passes through sign-in, which forwards signed-in
/// customers straight to the shipping step.
pub fn checkout<S: CartStorage>(_ctx: &AppContext<S>) -> PageOutcome {
    PageOutcome::navigate(Route::login_then(Route::Shipping))
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use storefront::cart::MemoryStorage;
    use testresult::TestResult;

    use crate::{api::MockStorefrontApi, test::context};

    use super::*;

    fn filled() -> Result<AppContext<MemoryStorage>, Box<dyn Error>> {
        let mut ctx = context(MockStorefrontApi::new());
        let polo = ctx.catalog.find_by_slug("camisa-polo").cloned().ok_or("missing polo")?;
        let jeans = ctx.catalog.find_by_slug("calca-jeans").cloned().ok_or("missing jeans")?;

        ctx.cart.add_item(polo.to_cart_item(2))?;
        ctx.cart.add_item(jeans.to_cart_item(1))?;

        Ok(ctx)
    }

    #[test]
    fn empty_cart_shows_message() {
        let page = view(&context(MockStorefrontApi::new()));

        assert!(page.lines.is_empty());
        assert_eq!(page.empty_message, Some(messages::CART_EMPTY));
        assert_eq!(page.subtotal, Decimal::ZERO);
    }

    #[test]
    fn view_lists_lines_and_totals() -> TestResult {
        let page = view(&filled()?);

        assert_eq!(page.lines.len(), 2);
        assert_eq!(page.item_count, 3);
        assert_eq!(page.subtotal, Decimal::new(2_699, 1));
        assert_eq!(page.lines[0].quantity_options, 1..=3);
        assert_eq!(page.lines[0].line_total, Decimal::from(140));
        assert!(page.empty_message.is_none());

        Ok(())
    }

    #[test]
    fn quantity_above_stock_is_rejected() -> TestResult {
        let mut ctx = filled()?;

        let outcome = update_quantity(&mut ctx, "calca-jeans", 2);

        assert!(outcome.notice.as_ref().is_some_and(Notice::is_error));
        assert_eq!(ctx.cart.cart().item("calca-jeans").map(|i| i.quantity), Some(1));

        assert_eq!(update_quantity(&mut ctx, "camisa-polo", 3), PageOutcome::stay());
        assert_eq!(ctx.cart.cart().item_count(), 4);

        Ok(())
    }

    #[test]
    fn remove_and_checkout() -> TestResult {
        let mut ctx = filled()?;

        remove_item(&mut ctx, "camisa-polo");

        assert!(ctx.cart.cart().item("camisa-polo").is_none());
        assert_eq!(
            checkout(&ctx).navigation.map(|route| route.path()),
            Some("/login?redirect=/shipping".to_string())
        );

        Ok(())
    }
}
