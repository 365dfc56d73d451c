//! Cart Store
//!
//! The store owns the current [`Cart`] and its [`CartStorage`]. Every mutation
//! goes through [`CartStore::dispatch`], which reduces the cart and then writes
//! the snapshot before returning.

use std::mem;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{
        Cart, CartAction, CartItem, PaymentMethod, ShippingAddress,
        storage::{CartStorage, StorageError},
    },
    catalog::Product,
    messages,
};

/// Errors returned by cart store operations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The transition was applied but the snapshot could not be saved.
    #[error("failed to persist cart: {0}")]
    Storage(#[from] StorageError),

    /// The requested quantity exceeds the units in stock.
    #[error("{}", messages::OUT_OF_STOCK)]
    OutOfStock {
        /// Product slug
        slug: String,

        /// Quantity that would have been stored
        requested: u32,

        /// Units available
        available: u32,
    },

    /// A quantity outside `1..=count_in_stock` was requested.
    #[error("invalid quantity {quantity} for {slug}; choose between 1 and {available}")]
    InvalidQuantity {
        /// Product slug
        slug: String,

        /// Rejected quantity
        quantity: u32,

        /// Units available
        available: u32,
    },

    /// No cart line has this slug.
    #[error("item not in cart: {0}")]
    ItemNotFound(String),
}

/// Owns the cart state and persists it after every transition.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Open a store, restoring the last saved snapshot.
    ///
    /// An unreadable snapshot is discarded and the store starts empty. Lines
    /// whose quantity falls outside `1..=count_in_stock` are corrected.
    pub fn open(storage: S) -> Self {
        let cart = match storage.load() {
            Ok(Some(mut cart)) => {
                for slug in cart.clamp_to_stock() {
                    warn!(%slug, "correcting cart line outside available stock");
                }

                debug!(items = cart.cart_items.len(), "restored cart snapshot");

                cart
            }
            Ok(None) => Cart::default(),
            Err(error) => {
                warn!("discarding unreadable cart snapshot: {error}");

                Cart::default()
            }
        };

        Self { cart, storage }
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply an action and persist the resulting snapshot.
    ///
    /// The in-memory cart always reflects the action, even when saving fails.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] if the snapshot could not be written.
    pub fn dispatch(&mut self, action: CartAction) -> Result<&Cart, CartStoreError> {
        debug!(?action, "cart dispatch");

        let cart = mem::take(&mut self.cart);
        self.cart = cart.reduce(action);

        self.storage.save(&self.cart)?;

        Ok(&self.cart)
    }

    /// Insert an item or overwrite its quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written.
    pub fn add_item(&mut self, item: CartItem) -> Result<&Cart, CartStoreError> {
        self.dispatch(CartAction::AddItem(item))
    }

    /// Remove the line with `slug`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written.
    pub fn remove_item(&mut self, slug: impl Into<String>) -> Result<&Cart, CartStoreError> {
        self.dispatch(CartAction::RemoveItem { slug: slug.into() })
    }

    /// Empty the cart, keeping checkout progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written.
    pub fn clear_items(&mut self) -> Result<&Cart, CartStoreError> {
        self.dispatch(CartAction::ClearItems)
    }

    /// Replace the shipping address.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written.
    pub fn save_shipping_address(
        &mut self,
        address: ShippingAddress,
    ) -> Result<&Cart, CartStoreError> {
        self.dispatch(CartAction::SaveShippingAddress(address))
    }

    /// Replace the payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot could not be written.
    pub fn save_payment_method(&mut self, method: PaymentMethod) -> Result<&Cart, CartStoreError> {
        self.dispatch(CartAction::SavePaymentMethod(method))
    }

    /// Add one more unit of `product`, checking availability first.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::OutOfStock`] when the new quantity exceeds the
    /// product's stock, leaving the cart untouched.
    pub fn add_product(&mut self, product: &Product) -> Result<&Cart, CartStoreError> {
        let quantity = self
            .cart
            .item(&product.slug)
            .map_or(1, |item| item.quantity.saturating_add(1));

        if quantity > product.count_in_stock {
            return Err(CartStoreError::OutOfStock {
                slug: product.slug.clone(),
                requested: quantity,
                available: product.count_in_stock,
            });
        }

        self.add_item(product.to_cart_item(quantity))
    }

    /// Set the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::ItemNotFound`] for an unknown slug and
    /// [`CartStoreError::InvalidQuantity`] when `quantity` is zero or above the
    /// line's stock snapshot.
    pub fn update_quantity(&mut self, slug: &str, quantity: u32) -> Result<&Cart, CartStoreError> {
        let item = self
            .cart
            .item(slug)
            .ok_or_else(|| CartStoreError::ItemNotFound(slug.to_string()))?;

        if quantity == 0 || quantity > item.count_in_stock {
            return Err(CartStoreError::InvalidQuantity {
                slug: slug.to_string(),
                quantity,
                available: item.count_in_stock,
            });
        }

        let updated = CartItem {
            quantity,
            ..item.clone()
        };

        self.add_item(updated)
    }
}
