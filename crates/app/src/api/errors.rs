//! API errors.

use reqwest::StatusCode;
use serde_json::Value;
use storefront::messages;
use thiserror::Error;

/// Errors returned by [`StorefrontApi`](super::StorefrontApi) calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or an unreadable response body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,

        /// Message extracted from the response body
        message: String,
    },

    /// The request needs a signed-in session.
    #[error("unauthorized")]
    Unauthorized,

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Build the error for a failed response from its status and raw body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body);

        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Message to show the customer.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Http(error) => error.to_string(),
            Self::Status { message, .. } | Self::NotFound(message) => message.clone(),
            Self::Unauthorized => messages::SIGN_IN_REQUIRED.to_string(),
        };

        if message.trim().is_empty() {
            return messages::UNKNOWN_ERROR.to_string();
        }

        message
    }
}

/// The `message` field of a JSON error body, else the body itself.
pub(crate) fn extract_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(ToString::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
