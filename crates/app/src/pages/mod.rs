//! Pages
//!
//! One controller per storefront screen. Views build what a screen shows;
//! actions change state and report where to go next and what to tell the
//! customer.

use std::fmt;

use storefront::checkout::Route;

pub mod auth;
pub mod cart;
pub mod home;
pub mod order;
pub mod orders_history;
pub mod payment;
pub mod place_order;
pub mod product;
pub mod shipping;

/// Transient message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The action worked.
    Success(String),

    /// The action failed.
    Error(String),
}

impl Notice {
    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    /// Text of the notice.
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }

    /// Whether this notice reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a page action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOutcome {
    /// Page to open next, if the action navigates
    pub navigation: Option<Route>,

    /// Message to show, if any
    pub notice: Option<Notice>,
}

impl PageOutcome {
    /// Stay on the current page without a message.
    pub fn stay() -> Self {
        Self::default()
    }

    /// Navigate to `route`.
    pub fn navigate(route: Route) -> Self {
        Self {
            navigation: Some(route),
            notice: None,
        }
    }

    /// Stay and show `notice`.
    pub fn notify(notice: Notice) -> Self {
        Self {
            navigation: None,
            notice: Some(notice),
        }
    }

    /// Add a notice to this outcome.
    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// A gated view: the page contents, or the page to open instead.
pub type Gated<T> = Result<T, Route>;
