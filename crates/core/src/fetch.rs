//! Fetch State
//!
//! Tracks one asynchronous request from a screen: nothing asked yet, in
//! flight, answered, or failed. A screen with several independent requests
//! keeps one [`Fetch`] per request.

use crate::orders::Order;

/// Events that move a [`Fetch`] between states.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent<T> {
    /// The request was sent.
    Request,

    /// The request succeeded with a payload.
    Success(T),

    /// The request failed with a user-facing message.
    Fail(String),
}

/// State of one asynchronous request.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    /// Nothing requested yet.
    Idle,

    /// Waiting for a response.
    Loading,

    /// Response received.
    Success(T),

    /// Request failed; holds the message to show.
    Failure(String),
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Fetch::Idle
    }
}

impl<T> Fetch<T> {
    /// Apply an event and return the next state.
    #[must_use]
    pub fn apply(self, event: FetchEvent<T>) -> Self {
        match event {
            FetchEvent::Request => Fetch::Loading,
            FetchEvent::Success(data) => Fetch::Success(data),
            FetchEvent::Fail(message) => Fetch::Failure(message),
        }
    }

    /// Mark the request as sent.
    pub fn request(&mut self) {
        *self = Fetch::Loading;
    }

    /// Record a successful response.
    pub fn succeed(&mut self, data: T) {
        *self = Fetch::Success(data);
    }

    /// Record a failure.
    pub fn fail(&mut self, message: impl Into<String>) {
        *self = Fetch::Failure(message.into());
    }

    /// Forget any outcome.
    pub fn reset(&mut self) {
        *self = Fetch::Idle;
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Fetch::Loading)
    }

    /// Whether the last request succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Fetch::Success(_))
    }

    /// Payload of a successful request.
    pub fn data(&self) -> Option<&T> {
        match self {
            Fetch::Success(data) => Some(data),
            Fetch::Idle | Fetch::Loading | Fetch::Failure(_) => None,
        }
    }

    /// Message of a failed request.
    pub fn error(&self) -> Option<&str> {
        match self {
            Fetch::Failure(message) => Some(message),
            Fetch::Idle | Fetch::Loading | Fetch::Success(_) => None,
        }
    }
}

/// Request trackers for the order detail screen.
///
/// Loading the order, capturing its payment and confirming its delivery are
/// tracked separately so each shows its own progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPageState {
    /// The order itself
    pub order: Fetch<Order>,

    /// Payment capture
    pub pay: Fetch<()>,

    /// Delivery confirmation
    pub deliver: Fetch<()>,
}

impl OrderPageState {
    /// The loaded order, if any.
    pub fn order(&self) -> Option<&Order> {
        self.order.data()
    }
}
