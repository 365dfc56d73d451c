//! Storefront application layer: the server API, the application context and
//! the page controllers that drive each screen.

pub mod api;
pub mod context;
pub mod pages;
