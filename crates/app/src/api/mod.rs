//! Storefront API
//!
//! The server the storefront talks to: products, orders, payment keys and
//! accounts. [`StorefrontApi`] is the seam page controllers depend on;
//! [`HttpStorefrontApi`] is the network implementation.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use storefront::{
    catalog::Product,
    orders::{NewOrder, Order, PaymentResult},
    session::Session,
};

mod errors;
mod http;

pub use errors::ApiError;
pub use http::{ApiConfig, HttpStorefrontApi};

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    /// Full name
    pub name: String,

    /// Sign-in e-mail
    pub email: String,

    /// Password
    pub password: String,
}

/// Sign-in payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Sign-in e-mail
    pub email: String,

    /// Password
    pub password: String,
}

/// Storefront server operations used by the page controllers.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Fetch a product by server id, with current stock.
    async fn product_by_id(&self, id: &str) -> Result<Product, ApiError>;

    /// Fetch a product by slug.
    async fn product_by_slug(&self, slug: &str) -> Result<Product, ApiError>;

    /// Submit an order built from the cart.
    async fn create_order(&self, token: &str, order: NewOrder) -> Result<Order, ApiError>;

    /// Fetch one of the customer's orders.
    async fn order(&self, token: &str, id: &str) -> Result<Order, ApiError>;

    /// Fetch the customer's past orders.
    async fn order_history(&self, token: &str) -> Result<Vec<Order>, ApiError>;

    /// Fetch the `PayPal` client id used to render the payment button.
    async fn paypal_client_id(&self, token: &str) -> Result<String, ApiError>;

    /// Record a captured payment against an order.
    async fn pay_order(
        &self,
        token: &str,
        id: &str,
        payment: PaymentResult,
    ) -> Result<Order, ApiError>;

    /// Mark an order as delivered. Administrators only.
    async fn deliver_order(&self, token: &str, id: &str) -> Result<Order, ApiError>;

    /// Create a customer account.
    async fn sign_up(&self, account: NewAccount) -> Result<(), ApiError>;

    /// Exchange credentials for a session.
    async fn sign_in(&self, credentials: Credentials) -> Result<Session, ApiError>;
}
