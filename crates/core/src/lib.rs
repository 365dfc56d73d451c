//! Storefront
//!
//! Client-side domain of the storefront: the catalog, the cart store and its
//! persisted snapshot, price derivation, the checkout gate, order models and
//! the per-screen fetch state machine.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fetch;
pub mod forms;
pub mod messages;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod session;
