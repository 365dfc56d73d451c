//! Review and place-order step.

use storefront::{
    cart::{CartStorage, PaymentMethod, ShippingAddress},
    checkout::{CheckoutStep, Route},
    fetch::Fetch,
    messages,
    orders::{NewOrder, Order, OrderDraftError},
    pricing::OrderPrices,
};
use tracing::{info, warn};

use crate::{
    context::AppContext,
    pages::{Gated, Notice, PageOutcome, cart::CartLine},
};

/// What the review page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrderView {
    /// Delivery address
    pub shipping_address: ShippingAddress,

    /// Chosen method
    pub payment_method: PaymentMethod,

    /// Cart rows
    pub lines: Vec<CartLine>,

    /// Order summary
    pub prices: OrderPrices,

    /// Text shown instead of the rows when the cart is empty
    pub empty_message: Option<&'static str>,
}

/// The order review.
///
/// # Errors
///
/// Returns the route of an earlier incomplete step.
pub fn view<S: CartStorage>(ctx: &AppContext<S>) -> Gated<PlaceOrderView> {
    let cart = ctx.cart.cart();

    CheckoutStep::PlaceOrder.enter(ctx.user(), cart)?;

    let payment_method = cart.payment_method.ok_or(Route::Payment)?;

    Ok(PlaceOrderView {
        shipping_address: cart.shipping_address.clone(),
        payment_method,
        lines: cart.cart_items.iter().map(CartLine::from).collect(),
        prices: ctx.prices.derive(&cart.cart_items),
        empty_message: cart.is_empty().then_some(messages::PLACE_ORDER_CART_EMPTY),
    })
}

/// Order submission, guarded against double submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceOrderPage {
    submission: Fetch<Order>,
}

impl PlaceOrderPage {
    /// A page with nothing submitted yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of the last submission.
    pub fn submission(&self) -> &Fetch<Order> {
        &self.submission
    }

    /// Whether a submission is in flight.
    pub fn is_placing(&self) -> bool {
        self.submission.is_loading()
    }

    /// Submit the cart as an order.
    ///
    /// On success the cart lines are cleared and the order page opens. On
    /// failure the cart is kept as it was and the server's message is shown.
    pub async fn place<S: CartStorage>(&mut self, ctx: &mut AppContext<S>) -> PageOutcome {
        if self.is_placing() {
            return PageOutcome::stay();
        }

        if let Err(route) = CheckoutStep::PlaceOrder.enter(ctx.user(), ctx.cart.cart()) {
            return PageOutcome::navigate(route);
        }

        let Some(token) = ctx.token().map(ToString::to_string) else {
            return PageOutcome::navigate(Route::login_then(Route::PlaceOrder));
        };

        let draft = match NewOrder::from_cart(ctx.cart.cart(), &ctx.prices) {
            Ok(draft) => draft,
            Err(OrderDraftError::EmptyCart) => {
                return PageOutcome::notify(Notice::error(messages::PLACE_ORDER_CART_EMPTY));
            }
            Err(OrderDraftError::MissingShippingAddress) => {
                return PageOutcome::navigate(Route::Shipping);
            }
            Err(OrderDraftError::MissingPaymentMethod) => {
                return PageOutcome::navigate(Route::Payment);
            }
        };

        self.submission.request();

        match ctx.api.create_order(&token, draft).await {
            Ok(order) => {
                info!(order = %order.id, total = %order.prices.total_price, "order placed");

                let outcome = PageOutcome::navigate(Route::Order(order.id.clone()));

                self.submission.succeed(order);

                match ctx.cart.clear_items() {
                    Ok(_) => outcome,
                    Err(error) => {
                        warn!("cleared cart saved in memory only: {error}");

                        outcome.with_notice(Notice::error(error.to_string()))
                    }
                }
            }
            Err(error) => {
                let message = error.user_message();

                self.submission.fail(message.clone());

                PageOutcome::notify(Notice::error(message))
            }
        }
    }
}
