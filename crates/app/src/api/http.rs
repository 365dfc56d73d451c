//! HTTP client for the storefront server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use storefront::{
    catalog::Product,
    orders::{NewOrder, Order, PaymentResult},
    session::Session,
};
use tracing::{debug, error};
use urlencoding::encode;

use super::{ApiError, Credentials, NewAccount, StorefrontApi};

/// Configuration for connecting to the storefront server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server address, e.g. `"http://localhost:3000"`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// [`StorefrontApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    config: ApiConfig,
    http: Client,
}

impl HttpStorefrontApi {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    /// The configured server address.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status, &body);

        error!(%status, "storefront request failed: {error}");

        Err(error)
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        Ok(Self::send(request).await?.json().await?)
    }
}

/// Pay and deliver answer with either the order or `{ message, order }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrderUpdateResponse {
    Wrapped { order: Order },
    Bare(Order),
}

impl From<OrderUpdateResponse> for Order {
    fn from(response: OrderUpdateResponse) -> Self {
        match response {
            OrderUpdateResponse::Wrapped { order } | OrderUpdateResponse::Bare(order) => order,
        }
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn product_by_id(&self, id: &str) -> Result<Product, ApiError> {
        debug!(id, "fetching product");

        Self::json(self.http.get(self.url(&format!("/api/products/{}", encode(id))))).await
    }

    async fn product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        debug!(slug, "fetching product");

        Self::json(self.http.get(self.url(&format!("/api/products/slug/{}", encode(slug))))).await
    }

    async fn create_order(&self, token: &str, order: NewOrder) -> Result<Order, ApiError> {
        let request = self
            .http
            .post(self.url("/api/orders"))
            .bearer_auth(token)
            .json(&order);

        Self::json(request).await
    }

    async fn order(&self, token: &str, id: &str) -> Result<Order, ApiError> {
        let request = self
            .http
            .get(self.url(&format!("/api/orders/{}", encode(id))))
            .bearer_auth(token);

        Self::json(request).await
    }

    async fn order_history(&self, token: &str) -> Result<Vec<Order>, ApiError> {
        let request = self
            .http
            .get(self.url("/api/orders/history"))
            .bearer_auth(token);

        Self::json(request).await
    }

    async fn paypal_client_id(&self, token: &str) -> Result<String, ApiError> {
        let request = self
            .http
            .get(self.url("/api/keys/paypal"))
            .bearer_auth(token);

        let body = Self::send(request).await?.text().await?;

        Ok(body.trim().to_string())
    }

    async fn pay_order(
        &self,
        token: &str,
        id: &str,
        payment: PaymentResult,
    ) -> Result<Order, ApiError> {
        let request = self
            .http
            .put(self.url(&format!("/api/orders/{}/pay", encode(id))))
            .bearer_auth(token)
            .json(&payment);

        Self::json::<OrderUpdateResponse>(request).await.map(Order::from)
    }

    async fn deliver_order(&self, token: &str, id: &str) -> Result<Order, ApiError> {
        let request = self
            .http
            .put(self.url(&format!("/api/admin/orders/{}/deliver", encode(id))))
            .bearer_auth(token);

        Self::json::<OrderUpdateResponse>(request).await.map(Order::from)
    }

    async fn sign_up(&self, account: NewAccount) -> Result<(), ApiError> {
        Self::send(self.http.post(self.url("/api/auth/signup")).json(&account)).await?;

        Ok(())
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<Session, ApiError> {
        Self::json(self.http.post(self.url("/api/auth/signin")).json(&credentials)).await
    }
}
