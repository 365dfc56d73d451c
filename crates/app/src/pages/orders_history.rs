//! Order history page.

use storefront::{
    cart::CartStorage, checkout::Route, fetch::Fetch, money::format_brl, orders::Order,
};

use crate::{context::AppContext, pages::Gated};

/// A row of the order history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    /// Full order id, for the details link
    pub id: String,

    /// Abbreviated id shown in the table
    pub short_id: String,

    /// Date placed
    pub date: String,

    /// Formatted total
    pub total: String,

    /// Payment date or status
    pub paid: String,

    /// Delivery date or status
    pub delivered: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            short_id: order.short_id().to_string(),
            date: order.created_on().unwrap_or_default(),
            total: format_brl(order.prices.total_price),
            paid: order.history_payment_cell(),
            delivered: order.history_delivery_cell(),
        }
    }
}

/// Fetch the signed-in customer's orders.
///
/// # Errors
///
/// Returns the sign-in route when no customer is signed in.
pub async fn load<S: CartStorage>(ctx: &AppContext<S>) -> Gated<Fetch<Vec<OrderRow>>> {
    let token = ctx
        .token()
        .ok_or_else(|| Route::login_then(Route::OrderHistory))?;

    let rows = match ctx.api.order_history(token).await {
        Ok(orders) => Fetch::Success(orders.iter().map(OrderRow::from).collect()),
        Err(error) => Fetch::Failure(error.user_message()),
    };

    Ok(rows)
}
