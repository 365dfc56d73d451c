//! Shipping step.

use storefront::{
    cart::CartStorage,
    checkout::{CheckoutStep, Route},
    forms::{FormErrors, ShippingForm},
};
use tracing::warn;

use crate::{
    context::AppContext,
    pages::{Gated, Notice, PageOutcome},
};

/// The shipping form, prefilled with the saved address.
///
/// # Errors
///
/// Returns the sign-in route when no customer is signed in.
pub fn view<S: CartStorage>(ctx: &AppContext<S>) -> Gated<ShippingForm> {
    let cart = ctx.cart.cart();

    CheckoutStep::Shipping.enter(ctx.user(), cart)?;

    Ok(ShippingForm::from_address(&cart.shipping_address))
}

/// Save the address and continue to the payment step.
///
/// # Errors
///
/// Returns the per-field messages when the form is invalid; nothing is saved.
pub fn submit<S: CartStorage>(
    ctx: &mut AppContext<S>,
    form: ShippingForm,
) -> Result<PageOutcome, FormErrors> {
    if let Err(route) = CheckoutStep::Shipping.enter(ctx.user(), ctx.cart.cart()) {
        return Ok(PageOutcome::navigate(route));
    }

    let address = form.into_address()?;
    let outcome = PageOutcome::navigate(Route::Payment);

    match ctx.cart.save_shipping_address(address) {
        Ok(_) => Ok(outcome),
        Err(error) => {
            warn!("shipping address saved in memory only: {error}");

            Ok(outcome.with_notice(Notice::error(error.to_string())))
        }
    }
}
