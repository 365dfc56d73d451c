//! Orders

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartItem, PaymentMethod, ShippingAddress},
    messages,
    pricing::{OrderPrices, PriceSchedule},
};

/// Reasons a cart cannot be turned into an order yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderDraftError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// No shipping address was saved.
    #[error("shipping address is missing")]
    MissingShippingAddress,

    /// No payment method was saved.
    #[error("payment method is missing")]
    MissingPaymentMethod,
}

/// A line of a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Server identifier of the line
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Product slug
    pub slug: String,

    /// Product name
    pub name: String,

    /// Image reference
    pub image: String,

    /// Unit price at submission time
    pub price: Decimal,

    /// Units ordered
    pub quantity: u32,
}

impl OrderItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            id: None,
            slug: item.slug.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Payload posted when the customer places an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Snapshot of the cart lines
    pub order_items: Vec<OrderItem>,

    /// Delivery address
    pub shipping_address: ShippingAddress,

    /// Chosen payment provider
    pub payment_method: PaymentMethod,

    /// Derived prices
    #[serde(flatten)]
    pub prices: OrderPrices,
}

impl NewOrder {
    /// Compose the submission payload from the current cart.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderDraftError`] when the cart is empty or a checkout
    /// step has not been completed.
    pub fn from_cart(cart: &Cart, schedule: &PriceSchedule) -> Result<Self, OrderDraftError> {
        if cart.is_empty() {
            return Err(OrderDraftError::EmptyCart);
        }

        if cart.shipping_address.is_empty() {
            return Err(OrderDraftError::MissingShippingAddress);
        }

        let payment_method = cart
            .payment_method
            .ok_or(OrderDraftError::MissingPaymentMethod)?;

        Ok(Self {
            order_items: cart.cart_items.iter().map(OrderItem::from).collect(),
            shipping_address: cart.shipping_address.clone(),
            payment_method,
            prices: schedule.derive(&cart.cart_items),
        })
    }
}

/// An order as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server identifier
    #[serde(rename = "_id")]
    pub id: String,

    /// Ordered lines
    pub order_items: Vec<OrderItem>,

    /// Delivery address
    pub shipping_address: ShippingAddress,

    /// Payment provider
    pub payment_method: PaymentMethod,

    /// Prices as computed at submission
    #[serde(flatten)]
    pub prices: OrderPrices,

    /// Whether payment was captured
    #[serde(default)]
    pub is_paid: bool,

    /// When payment was captured
    #[serde(default)]
    pub paid_at: Option<Timestamp>,

    /// Whether the order was delivered
    #[serde(default)]
    pub is_delivered: bool,

    /// When the order was delivered
    #[serde(default)]
    pub delivered_at: Option<Timestamp>,

    /// When the order was placed
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Order {
    /// Abbreviated identifier shown in the order history.
    pub fn short_id(&self) -> &str {
        self.id.get(20..24).unwrap_or(&self.id)
    }

    /// Date the order was placed, as `YYYY-MM-DD`.
    pub fn created_on(&self) -> Option<String> {
        self.created_at.map(date_of)
    }

    /// Payment status for the detail page.
    pub fn payment_status_label(&self) -> String {
        match (self.is_paid, self.paid_at) {
            (true, Some(at)) => format!("Pago em {}", date_of(at)),
            (true, None) => "Pago".to_string(),
            (false, _) => messages::PAYMENT_PENDING.to_string(),
        }
    }

    /// Delivery status for the detail page.
    pub fn delivery_status_label(&self) -> String {
        match (self.is_delivered, self.delivered_at) {
            (true, Some(at)) => format!("Seu pedido foi enviado {}", date_of(at)),
            (true, None) => "Seu pedido foi enviado".to_string(),
            (false, _) => messages::DELIVERY_PENDING.to_string(),
        }
    }

    /// Payment column of the history table.
    pub fn history_payment_cell(&self) -> String {
        match (self.is_paid, self.paid_at) {
            (true, Some(at)) => date_of(at),
            (true, None) => "Pago".to_string(),
            (false, _) => messages::PAYMENT_NOT_MADE.to_string(),
        }
    }

    /// Delivery column of the history table.
    pub fn history_delivery_cell(&self) -> String {
        match (self.is_delivered, self.delivered_at) {
            (true, Some(at)) => date_of(at),
            (true, None) => "Enviado".to_string(),
            (false, _) => messages::NOT_SHIPPED.to_string(),
        }
    }
}

fn date_of(at: Timestamp) -> String {
    at.strftime("%Y-%m-%d").to_string()
}

/// Result reported by the payment provider's button when the buyer approves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    /// Provider transaction identifier
    pub id: String,

    /// Provider status, e.g. `COMPLETED`
    pub status: String,

    /// Payer e-mail reported by the provider
    #[serde(default)]
    pub email_address: String,
}
