//! Payment step.

use storefront::{
    cart::{CartStorage, PaymentMethod},
    checkout::{CheckoutStep, Route},
    forms::select_payment_method,
};
use tracing::warn;

use crate::{
    context::AppContext,
    pages::{Gated, Notice, PageOutcome},
};

/// What the payment page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentView {
    /// Methods to choose from
    pub methods: [PaymentMethod; 2],

    /// Method chosen earlier, if any
    pub selected: Option<PaymentMethod>,
}

/// The payment method choice.
///
/// # Errors
///
/// Returns the route of an earlier incomplete step.
pub fn view<S: CartStorage>(ctx: &AppContext<S>) -> Gated<PaymentView> {
    let cart = ctx.cart.cart();

    CheckoutStep::Payment.enter(ctx.user(), cart)?;

    Ok(PaymentView {
        methods: PaymentMethod::ALL,
        selected: cart.payment_method,
    })
}

/// Save the chosen method and continue to the review step.
pub fn submit<S: CartStorage>(
    ctx: &mut AppContext<S>,
    selection: Option<PaymentMethod>,
) -> PageOutcome {
    if let Err(route) = CheckoutStep::Payment.enter(ctx.user(), ctx.cart.cart()) {
        return PageOutcome::navigate(route);
    }

    let method = match select_payment_method(selection) {
        Ok(method) => method,
        Err(message) => return PageOutcome::notify(Notice::error(message)),
    };

    let outcome = PageOutcome::navigate(Route::PlaceOrder);

    match ctx.cart.save_payment_method(method) {
        Ok(_) => outcome,
        Err(error) => {
            warn!("payment method saved in memory only: {error}");

            outcome.with_notice(Notice::error(error.to_string()))
        }
    }
}

/// Go back to the shipping step.
pub fn back<S: CartStorage>(_ctx: &AppContext<S>) -> PageOutcome {
    PageOutcome::navigate(Route::Shipping)
}

#[cfg(test)]
mod tests {
    use storefront::messages;
    use testresult::TestResult;

    use crate::{
        api::MockStorefrontApi,
        test::{address, signed_in},
    };

    use super::*;

    #[test]
    fn missing_address_redirects_to_shipping() {
        let ctx = signed_in(MockStorefrontApi::new());

        assert_eq!(view(&ctx), Err(Route::Shipping));
    }

    #[test]
    fn no_selection_shows_notice() -> TestResult {
        let mut ctx = signed_in(MockStorefrontApi::new());

        ctx.cart.save_shipping_address(address())?;

        let outcome = submit(&mut ctx, None);

        assert_eq!(
            outcome,
            PageOutcome::notify(Notice::error(messages::SELECT_PAYMENT_METHOD))
        );
        assert!(ctx.cart.cart().payment_method.is_none());

        Ok(())
    }

    #[test]
    fn selection_is_saved() -> TestResult {
        let mut ctx = signed_in(MockStorefrontApi::new());

        ctx.cart.save_shipping_address(address())?;

        let outcome = submit(&mut ctx, Some(PaymentMethod::Pagseguro));

        assert_eq!(outcome, PageOutcome::navigate(Route::PlaceOrder));
        assert_eq!(view(&ctx)?.selected, Some(PaymentMethod::Pagseguro));
        assert_eq!(back(&ctx), PageOutcome::navigate(Route::Shipping));

        Ok(())
    }
}
