//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartAction, CartItem, CartStorage, CartStore, CartStoreError, JsonFileStorage,
        MemoryStorage, PaymentMethod, ShippingAddress, StorageError,
    },
    catalog::{Catalog, CatalogError, Product},
    checkout::{CheckoutStep, Route},
    fetch::{Fetch, FetchEvent, OrderPageState},
    forms::{FormErrors, LoginForm, RegisterForm, ShippingForm, select_payment_method},
    money::{format_brl, round2},
    orders::{NewOrder, Order, OrderDraftError, OrderItem, PaymentResult},
    pricing::{OrderPrices, PriceSchedule, derive_prices},
    session::{Session, User},
};
