use std::io;

use async_trait::async_trait;
use clap::Subcommand;
use rust_decimal::Decimal;
use storefront::{
    cart::CartStorage,
    fetch::Fetch,
    money::format_brl,
    orders::PaymentResult,
};
use storefront_app::{
    context::AppContext,
    pages::{
        PageOutcome,
        order::{OrderPage, PaymentButton, PaymentError},
        orders_history,
    },
};
use tracing::debug;

use crate::render;

/// Order actions.
#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List past orders
    History,

    /// Show one order
    Show {
        /// Order id
        id: String,
    },

    /// Record a payment the provider already approved
    Pay {
        /// Order id
        id: String,

        /// Provider transaction id
        #[arg(long)]
        transaction_id: String,

        /// Payer e-mail
        #[arg(long)]
        email: String,
    },

    /// Mark an order as delivered (administrators)
    Deliver {
        /// Order id
        id: String,
    },
}

/// Payment approved outside the terminal, replayed as a button approval.
#[derive(Debug)]
struct ApprovedPayment {
    transaction_id: String,
    email: String,
}

#[async_trait]
impl PaymentButton for ApprovedPayment {
    async fn create_order(&self, amount: Decimal) -> Result<String, PaymentError> {
        debug!(amount = %format_brl(amount), "paying order");

        Ok(self.transaction_id.clone())
    }

    async fn approve(&self, provider_order_id: &str) -> Result<PaymentResult, PaymentError> {
        if provider_order_id.trim().is_empty() {
            return Err(PaymentError("transação sem identificador".to_string()));
        }

        Ok(PaymentResult {
            id: provider_order_id.to_string(),
            status: "COMPLETED".to_string(),
            email_address: self.email.clone(),
        })
    }
}

async fn load<S: CartStorage>(
    page: &mut OrderPage,
    ctx: &AppContext<S>,
    out: &mut impl io::Write,
) -> io::Result<bool> {
    if !page.needs_fetch() {
        return Ok(true);
    }

    let outcome = page.load(ctx).await;

    if outcome.navigation.is_some() {
        render::write_outcome(out, &outcome)?;

        return Ok(false);
    }

    Ok(true)
}

async fn show<S: CartStorage>(
    page: &mut OrderPage,
    ctx: &AppContext<S>,
    out: &mut impl io::Write,
) -> io::Result<()> {
    if !load(page, ctx, out).await? {
        return Ok(());
    }

    page.load_payment_button(ctx).await;

    render::write_order(out, page)
}

async fn act<S: CartStorage>(
    page: &mut OrderPage,
    ctx: &AppContext<S>,
    outcome: PageOutcome,
    out: &mut impl io::Write,
) -> io::Result<()> {
    render::write_outcome(out, &outcome)?;

    if outcome.navigation.is_some() {
        return Ok(());
    }

    show(page, ctx, out).await
}

pub(crate) async fn run<S: CartStorage>(
    ctx: &AppContext<S>,
    command: OrdersCommand,
    out: &mut impl io::Write,
) -> io::Result<()> {
    match command {
        OrdersCommand::History => match orders_history::load(ctx).await {
            Ok(Fetch::Success(rows)) => render::write_history(out, &rows),
            Ok(Fetch::Failure(message)) => writeln!(out, "{message}"),
            Ok(Fetch::Idle | Fetch::Loading) => Ok(()),
            Err(route) => render::write_outcome(out, &PageOutcome::navigate(route)),
        },
        OrdersCommand::Show { id } => show(&mut OrderPage::new(id), ctx, out).await,
        OrdersCommand::Pay {
            id,
            transaction_id,
            email,
        } => {
            let mut page = OrderPage::new(id);

            if !load(&mut page, ctx, out).await? {
                return Ok(());
            }

            let button = ApprovedPayment {
                transaction_id,
                email,
            };

            let outcome = page.pay_with(ctx, &button).await;

            act(&mut page, ctx, outcome, out).await
        }
        OrdersCommand::Deliver { id } => {
            let mut page = OrderPage::new(id);

            let outcome = page.deliver(ctx).await;

            act(&mut page, ctx, outcome, out).await
        }
    }
}
