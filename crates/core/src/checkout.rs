//! Checkout
//!
//! The checkout wizard runs shipping, payment and place-order in a fixed
//! order. Each step checks on entry that the earlier steps are complete and
//! names the page to go to instead when they are not. Going back is never
//! checked.

use std::fmt;

use urlencoding::encode;

use crate::{cart::Cart, session::User};

/// Pages the storefront can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Product listing
    Home,

    /// Product detail, by slug
    Product(String),

    /// Cart
    Cart,

    /// Sign-in, optionally returning somewhere afterwards
    Login {
        /// Page to open after signing in
        redirect: Option<Box<Route>>,
    },

    /// Account registration
    Register,

    /// Shipping address step
    Shipping,

    /// Payment method step
    Payment,

    /// Review and place-order step
    PlaceOrder,

    /// Order detail, by id
    Order(String),

    /// Order history
    OrderHistory,

    /// Access denied, with a reason
    Unauthorized(String),
}

impl Route {
    /// Sign-in page that returns to `target` afterwards.
    pub fn login_then(target: Route) -> Self {
        Route::Login {
            redirect: Some(Box::new(target)),
        }
    }

    /// URL path of the page. Query values are percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Product(slug) => format!("/product/{slug}"),
            Route::Cart => "/cart".to_string(),
            Route::Login { redirect: None } => "/login".to_string(),
            Route::Login {
                redirect: Some(target),
            } => format!("/login?redirect={}", target.path()),
            Route::Register => "/register".to_string(),
            Route::Shipping => "/shipping".to_string(),
            Route::Payment => "/payment".to_string(),
            Route::PlaceOrder => "/placeorder".to_string(),
            Route::Order(id) => format!("/order/{id}"),
            Route::OrderHistory => "/orders-history".to_string(),
            Route::Unauthorized(message) => format!("/unauthorized?message={}", encode(message)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Steps of the checkout wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutStep {
    /// Customer is signed in
    SignIn,

    /// Shipping address entered
    Shipping,

    /// Payment method chosen
    Payment,

    /// Order reviewed and placed
    PlaceOrder,
}

impl CheckoutStep {
    /// Every step, in wizard order.
    pub const ALL: [CheckoutStep; 4] = [
        CheckoutStep::SignIn,
        CheckoutStep::Shipping,
        CheckoutStep::Payment,
        CheckoutStep::PlaceOrder,
    ];

    /// Wizard label.
    pub fn label(self) -> &'static str {
        match self {
            CheckoutStep::SignIn => "Usuario logado",
            CheckoutStep::Shipping => "Cadastrar endereço",
            CheckoutStep::Payment => "Método de pagamento",
            CheckoutStep::PlaceOrder => "Finalizar compra",
        }
    }

    /// Page that hosts the step.
    pub fn route(self) -> Route {
        match self {
            CheckoutStep::SignIn => Route::Login { redirect: None },
            CheckoutStep::Shipping => Route::Shipping,
            CheckoutStep::Payment => Route::Payment,
            CheckoutStep::PlaceOrder => Route::PlaceOrder,
        }
    }

    /// Check whether `step` may be entered.
    ///
    /// # Errors
    ///
    /// Returns the [`Route`] of the earliest incomplete step: sign-in when no
    /// user is present, shipping when no address was saved, payment when no
    /// method was chosen.
    pub fn enter(self, user: Option<&User>, cart: &Cart) -> Result<(), Route> {
        if self == CheckoutStep::SignIn {
            return Ok(());
        }

        if user.is_none() {
            return Err(Route::login_then(self.route()));
        }

        if self >= CheckoutStep::Payment && cart.shipping_address.is_empty() {
            return Err(Route::Shipping);
        }

        if self >= CheckoutStep::PlaceOrder && cart.payment_method.is_none() {
            return Err(Route::Payment);
        }

        Ok(())
    }
}
