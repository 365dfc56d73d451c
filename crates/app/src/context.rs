//! App Context

use std::{fmt, sync::Arc};

use storefront::{
    cart::{CartStorage, CartStore},
    catalog::Catalog,
    pricing::PriceSchedule,
    session::{Session, User},
};
use tracing::info;

use crate::api::StorefrontApi;

/// Everything a page controller reads or changes.
pub struct AppContext<S: CartStorage> {
    /// Storefront server
    pub api: Arc<dyn StorefrontApi>,

    /// Cart state and its persistence
    pub cart: CartStore<S>,

    /// Products on sale
    pub catalog: Catalog,

    /// Shipping and tax rules
    pub prices: PriceSchedule,

    session: Option<Session>,
}

impl<S: CartStorage> AppContext<S> {
    /// Build a signed-out context with the default price schedule.
    pub fn new(api: Arc<dyn StorefrontApi>, cart: CartStore<S>, catalog: Catalog) -> Self {
        Self {
            api,
            cart,
            catalog,
            prices: PriceSchedule::default(),
            session: None,
        }
    }

    /// Replace the price schedule.
    #[must_use]
    pub fn with_prices(mut self, prices: PriceSchedule) -> Self {
        self.prices = prices;
        self
    }

    /// Start with a restored session.
    #[must_use]
    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    /// The current session, if signed in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    /// Bearer token of the current session.
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.token.as_str())
    }

    /// Store a freshly issued session.
    pub fn sign_in(&mut self, session: Session) {
        info!(user = %session.user.email, "signed in");

        self.session = Some(session);
    }

    /// Drop the current session, if any.
    pub fn sign_out(&mut self) -> Option<Session> {
        let session = self.session.take();

        if let Some(session) = &session {
            info!(user = %session.user.email, "signed out");
        }

        session
    }
}

impl<S: CartStorage> fmt::Debug for AppContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("cart", &self.cart)
            .field("catalog", &self.catalog.len())
            .field("prices", &self.prices)
            .field("user", &self.user())
            .finish_non_exhaustive()
    }
}
