//! Order detail page.
//!
//! The page tracks three requests independently: loading the order,
//! capturing its payment and confirming its delivery. The order is fetched
//! again only when the requested id changes or after a payment or delivery
//! succeeded; a failed load is shown, not retried.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use storefront::{
    cart::CartStorage,
    checkout::Route,
    fetch::{Fetch, OrderPageState},
    messages,
    orders::{Order, PaymentResult},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    context::AppContext,
    pages::{Notice, PageOutcome},
};

/// Failure reported by a payment provider's button.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PaymentError(pub String);

/// A payment provider's checkout button.
#[automock]
#[async_trait]
pub trait PaymentButton: Send + Sync {
    /// Open a provider order for `amount` and return the provider's id.
    async fn create_order(&self, amount: Decimal) -> Result<String, PaymentError>;

    /// Wait for the buyer to approve provider order `provider_order_id`.
    async fn approve(&self, provider_order_id: &str) -> Result<PaymentResult, PaymentError>;
}

/// State of one order detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPage {
    id: String,
    requested: Option<String>,
    state: OrderPageState,
    paypal_client_id: Fetch<String>,
}

impl OrderPage {
    /// A page for order `id`, nothing loaded yet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Id of the order shown.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Point the page at another order.
    pub fn open(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Request trackers.
    pub fn state(&self) -> &OrderPageState {
        &self.state
    }

    /// The loaded order, if any.
    pub fn order(&self) -> Option<&Order> {
        self.state.order()
    }

    /// Client id for the `PayPal` button, once loaded.
    pub fn paypal_client_id(&self) -> &Fetch<String> {
        &self.paypal_client_id
    }

    /// Whether the order must be (re)fetched before rendering.
    pub fn needs_fetch(&self) -> bool {
        if self.state.order.is_loading() {
            return false;
        }

        self.requested.as_deref() != Some(self.id.as_str())
            || self.state.pay.is_success()
            || self.state.deliver.is_success()
    }

    /// Fetch the order when [`needs_fetch`](Self::needs_fetch) says so.
    pub async fn load<S: CartStorage>(&mut self, ctx: &AppContext<S>) -> PageOutcome {
        let Some(token) = ctx.token() else {
            return PageOutcome::navigate(Route::login_then(Route::Order(self.id.clone())));
        };

        if !self.needs_fetch() {
            return PageOutcome::stay();
        }

        debug!(order = %self.id, "fetching order");

        self.state.pay.reset();
        self.state.deliver.reset();
        self.state.order.request();
        self.requested = Some(self.id.clone());

        match ctx.api.order(token, &self.id).await {
            Ok(order) => self.state.order.succeed(order),
            Err(error) => self.state.order.fail(error.user_message()),
        }

        PageOutcome::stay()
    }

    /// Fetch the `PayPal` client id for an unpaid order's button.
    pub async fn load_payment_button<S: CartStorage>(&mut self, ctx: &AppContext<S>) {
        let Some(token) = ctx.token() else {
            return;
        };

        if self.order().is_none_or(|order| order.is_paid) || self.paypal_client_id.is_success() {
            return;
        }

        self.paypal_client_id.request();

        match ctx.api.paypal_client_id(token).await {
            Ok(client_id) => self.paypal_client_id.succeed(client_id),
            Err(error) => self.paypal_client_id.fail(error.user_message()),
        }
    }

    /// Record the provider's approval as the order's payment.
    pub async fn pay<S: CartStorage>(
        &mut self,
        ctx: &AppContext<S>,
        payment: PaymentResult,
    ) -> PageOutcome {
        let Some(token) = ctx.token() else {
            return PageOutcome::navigate(Route::login_then(Route::Order(self.id.clone())));
        };

        self.state.pay.request();

        match ctx.api.pay_order(token, &self.id, payment).await {
            Ok(order) => {
                info!(order = %order.id, "order paid");

                self.state.pay.succeed(());

                PageOutcome::notify(Notice::success(messages::ORDER_PAID))
            }
            Err(error) => {
                let message = error.user_message();

                self.state.pay.fail(message.clone());

                PageOutcome::notify(Notice::error(message))
            }
        }
    }

    /// Run the provider's checkout for the loaded order's total, then record
    /// the payment.
    pub async fn pay_with<S: CartStorage>(
        &mut self,
        ctx: &AppContext<S>,
        button: &dyn PaymentButton,
    ) -> PageOutcome {
        let Some(total) = self.order().map(|order| order.prices.total_price) else {
            return PageOutcome::stay();
        };

        let approval = match button.create_order(total).await {
            Ok(provider_order_id) => button.approve(&provider_order_id).await,
            Err(error) => Err(error),
        };

        match approval {
            Ok(payment) => self.pay(ctx, payment).await,
            Err(error) => {
                self.state.pay.fail(error.to_string());

                PageOutcome::notify(Notice::error(error.to_string()))
            }
        }
    }

    /// Confirm delivery. Administrators only.
    pub async fn deliver<S: CartStorage>(&mut self, ctx: &AppContext<S>) -> PageOutcome {
        let Some(session) = ctx.session() else {
            return PageOutcome::navigate(Route::login_then(Route::Order(self.id.clone())));
        };

        if !session.is_admin() {
            return PageOutcome::navigate(Route::Unauthorized(messages::ADMIN_REQUIRED.to_string()));
        }

        self.state.deliver.request();

        match ctx.api.deliver_order(&session.token, &self.id).await {
            Ok(order) => {
                info!(order = %order.id, "order delivered");

                self.state.deliver.succeed(());

                PageOutcome::notify(Notice::success(messages::ORDER_DELIVERED))
            }
            Err(error) => {
                let message = error.user_message();

                self.state.deliver.fail(message.clone());

                PageOutcome::notify(Notice::error(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockStorefrontApi},
        test::{ORDER_ID, TOKEN, context, order, session, signed_in},
    };

    use super::*;

    fn approval() -> PaymentResult {
        PaymentResult {
            id: "PAYID-1".to_string(),
            status: "COMPLETED".to_string(),
            email_address: "maria@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn signed_out_visitor_is_sent_to_login() {
        let mut api = MockStorefrontApi::new();

        api.expect_order().never();

        let ctx = context(api);
        let mut page = OrderPage::new(ORDER_ID);

        assert_eq!(
            page.load(&ctx).await.navigation,
            Some(Route::login_then(Route::Order(ORDER_ID.to_string())))
        );
    }

    #[tokio::test]
    async fn loaded_order_is_not_fetched_again() {
        let mut api = MockStorefrontApi::new();

        api.expect_order()
            .once()
            .withf(|token, id| token == TOKEN && id == ORDER_ID)
            .return_once(|_, id| Ok(order(id, false, false)));

        let ctx = signed_in(api);
        let mut page = OrderPage::new(ORDER_ID);

        assert!(page.needs_fetch());

        page.load(&ctx).await;
        page.load(&ctx).await;

        assert!(!page.needs_fetch());
        assert_eq!(page.order().map(|order| order.id.as_str()), Some(ORDER_ID));
    }

    #[tokio::test]
    async fn failed_load_is_not_retried() {
        let mut api = MockStorefrontApi::new();

        api.expect_order()
            .once()
            .return_once(|_, _| Err(ApiError::NotFound("Pedido não encontrado".to_string())));

        let ctx = signed_in(api);
        let mut page = OrderPage::new(ORDER_ID);

        page.load(&ctx).await;
        page.load(&ctx).await;

        assert_eq!(page.state().order.error(), Some("Pedido não encontrado"));
    }

    #[tokio::test]
    async fn changing_id_fetches_again() {
        let mut api = MockStorefrontApi::new();

        api.expect_order()
            .times(2)
            .returning(|_, id| Ok(order(id, false, false)));

        let ctx = signed_in(api);
        let mut page = OrderPage::new(ORDER_ID);

        page.load(&ctx).await;
        page.open("6272a1f0c2b1e4a5d6f70000");

        assert!(page.needs_fetch());

        page.load(&ctx).await;

        assert_eq!(page.order().map(Order::short_id), Some("0000"));
    }

    #[tokio::test]
    async fn payment_success_triggers_one_refetch() -> TestResult {
        let mut api = MockStorefrontApi::new();
        let mut sequence = mockall::Sequence::new();

        api.expect_order()
            .once()
            .in_sequence(&mut sequence)
            .return_once(|_, id| Ok(order(id, false, false)));
        api.expect_pay_order()
            .once()
            .in_sequence(&mut sequence)
            .withf(|token, id, payment| {
                token == TOKEN && id == ORDER_ID && payment.status == "COMPLETED"
            })
            .return_once(|_, id, _| Ok(order(id, true, false)));
        api.expect_order()
            .once()
            .in_sequence(&mut sequence)
            .return_once(|_, id| Ok(order(id, true, false)));

        let ctx = signed_in(api);
        let mut page = OrderPage::new(ORDER_ID);

        page.load(&ctx).await;

        let outcome = page.pay(&ctx, approval()).await;

        assert_eq!(outcome, PageOutcome::notify(Notice::success(messages::ORDER_PAID)));
        assert!(page.needs_fetch());

        page.load(&ctx).await;

        assert!(!page.needs_fetch());
        assert!(page.order().is_some_and(|order| order.is_paid));
        assert_eq!(page.state().pay, Fetch::Idle);

        page.load(&ctx).await;

        Ok(())
    }

    #[tokio::test]
    async fn payment_failure_is_tracked_separately() {
        let mut api = MockStorefrontApi::new();

        api.expect_order()
            .once()
            .return_once(|_, id| Ok(order(id, false, false)));
        api.expect_pay_order().once().return_once(|_, _, _| {
            Err(ApiError::Status {
                status: 400,
                message: "Pedido já foi pago".to_string(),
            })
        });

        let ctx = signed_in(api);
        let mut page = OrderPage::new(ORDER_ID);

        page.load(&ctx).await;

        let outcome = page.pay(&ctx, approval()).await;

        assert_eq!(outcome.notice, Some(Notice::error("Pedido já foi pago")));
        assert!(page.order().is_some());
        assert!(!page.needs_fetch());
    }

    #[tokio::test]
    async fn deliver_requires_admin() {
        let mut api = MockStorefrontApi::new();

        api.expect_deliver_order().never();

        let ctx = signed_in(api);
        let mut page = OrderPage::new(ORDER_ID);

        assert_eq!(
            page.deliver(&ctx).await.navigation,
            Some(Route::Unauthorized(messages::ADMIN_REQUIRED.to_string()))
        );
    }

    #[tokio::test]
    async fn admin_confirms_delivery() {
        let mut api = MockStorefrontApi::new();

        api.expect_deliver_order()
            .once()
            .withf(|token, id| token == TOKEN && id == ORDER_ID)
            .return_once(|_, id| Ok(order(id, true, true)));

        let ctx = context(api).with_session(Some(session(true)));
        let mut page = OrderPage::new(ORDER_ID);

        let outcome = page.deliver(&ctx).await;

        assert_eq!(outcome.notice, Some(Notice::success(messages::ORDER_DELIVERED)));
        assert!(page.state().deliver.is_success());
        assert!(page.needs_fetch());
    }

    #[tokio::test]
    async fn payment_button_flow() {
        let mut api = MockStorefrontApi::new();
        let mut button = MockPaymentButton::new();

        api.expect_order()
            .once()
            .return_once(|_, id| Ok(order(id, false, false)));
        api.expect_paypal_client_id()
            .once()
            .return_once(|_| Ok("sb".to_string()));
        api.expect_pay_order()
            .once()
            .withf(|_, _, payment| payment.id == "PAYID-1")
            .return_once(|_, id, _| Ok(order(id, true, false)));

        button
            .expect_create_order()
            .once()
            .withf(|amount| *amount == Decimal::from(161))
            .return_once(|_| Ok("PROVIDER-1".to_string()));
        button
            .expect_approve()
            .once()
            .withf(|provider_order_id| provider_order_id == "PROVIDER-1")
            .return_once(|_| Ok(approval()));

        let ctx = signed_in(api);
        let mut page = OrderPage::new(ORDER_ID);

        page.load(&ctx).await;
        page.load_payment_button(&ctx).await;

        assert_eq!(page.paypal_client_id().data().map(String::as_str), Some("sb"));

        let outcome = page.pay_with(&ctx, &button).await;

        assert_eq!(outcome.notice, Some(Notice::success(messages::ORDER_PAID)));
    }

    #[tokio::test]
    async fn cancelled_payment_is_reported() {
        let mut api = MockStorefrontApi::new();
        let mut button = MockPaymentButton::new();

        api.expect_order()
            .once()
            .return_once(|_, id| Ok(order(id, false, false)));
        api.expect_pay_order().never();

        button
            .expect_create_order()
            .once()
            .return_once(|_| Err(PaymentError("Pagamento cancelado".to_string())));
        button.expect_approve().never();

        let ctx = signed_in(api);
        let mut page = OrderPage::new(ORDER_ID);

        page.load(&ctx).await;

        let outcome = page.pay_with(&ctx, &button).await;

        assert_eq!(outcome.notice, Some(Notice::error("Pagamento cancelado")));
        assert_eq!(page.state().pay.error(), Some("Pagamento cancelado"));
    }
}
