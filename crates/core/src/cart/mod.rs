//! Cart
//!
//! The cart snapshot, the actions that transition it, and the store that
//! persists each transition.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod storage;
pub mod store;

pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::{CartStore, CartStoreError};

/// A product line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product slug; unique within a cart
    pub slug: String,

    /// Product name
    pub name: String,

    /// Image reference
    pub image: String,

    /// Unit price
    pub price: Decimal,

    /// Units wanted
    pub quantity: u32,

    /// Availability reported by the server when the item was added
    pub count_in_stock: u32,
}

impl CartItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Delivery address collected at the shipping step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    /// Recipient name
    pub full_name: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Postal code (CEP)
    pub postal_code: String,

    /// Country
    pub country: String,
}

impl ShippingAddress {
    /// Whether no street address has been entered.
    pub fn is_empty(&self) -> bool {
        self.address.trim().is_empty()
    }
}

impl fmt::Display for ShippingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.full_name, self.address, self.city, self.postal_code, self.country
        )
    }
}

/// Unknown payment provider name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

/// Payment providers offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// `PayPal`
    Paypal,

    /// `PagSeguro`
    Pagseguro,
}

impl PaymentMethod {
    /// Every method, in the order the payment screen lists them.
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Paypal, PaymentMethod::Pagseguro];

    /// Provider name as shown and as sent to the server.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Paypal => "Paypal",
            PaymentMethod::Pagseguro => "Pagseguro",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}

/// Transitions applied to a [`Cart`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Insert the item, or overwrite the quantity of the line with the same slug.
    AddItem(CartItem),

    /// Drop the line with this slug, if any.
    RemoveItem {
        /// Slug of the line to drop
        slug: String,
    },

    /// Empty the item list.
    ClearItems,

    /// Replace the shipping address.
    SaveShippingAddress(ShippingAddress),

    /// Replace the payment method.
    SavePaymentMethod(PaymentMethod),
}

/// Cart contents and checkout progress, as persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cart {
    /// Lines in insertion order
    pub cart_items: Vec<CartItem>,

    /// Address from the shipping step
    pub shipping_address: ShippingAddress,

    /// Method from the payment step
    pub payment_method: Option<PaymentMethod>,
}

impl Cart {
    /// Apply an action and return the next cart.
    #[must_use]
    pub fn reduce(mut self, action: CartAction) -> Self {
        match action {
            CartAction::AddItem(item) => {
                match self.cart_items.iter_mut().find(|i| i.slug == item.slug) {
                    Some(existing) => *existing = item,
                    None => self.cart_items.push(item),
                }
            }
            CartAction::RemoveItem { slug } => {
                self.cart_items.retain(|item| item.slug != slug);
            }
            CartAction::ClearItems => self.cart_items.clear(),
            CartAction::SaveShippingAddress(address) => self.shipping_address = address,
            CartAction::SavePaymentMethod(method) => self.payment_method = Some(method),
        }

        self
    }

    /// Find the line for a slug.
    pub fn item(&self, slug: &str) -> Option<&CartItem> {
        self.cart_items.iter().find(|item| item.slug == slug)
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.cart_items
            .iter()
            .fold(0, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of line totals, unrounded.
    pub fn subtotal(&self) -> Decimal {
        self.cart_items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Bring every line back within `1..=count_in_stock`.
    ///
    /// Lines with a zero quantity or nothing in stock are dropped, larger
    /// quantities are lowered to the stock. Returns the slugs that changed.
    pub fn clamp_to_stock(&mut self) -> Vec<String> {
        let mut changed = Vec::new();

        self.cart_items.retain_mut(|item| {
            if item.quantity == 0 || item.count_in_stock == 0 {
                changed.push(item.slug.clone());

                return false;
            }

            if item.quantity > item.count_in_stock {
                item.quantity = item.count_in_stock;
                changed.push(item.slug.clone());
            }

            true
        });

        changed
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart_items.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rust_decimal::Decimal;

    use super::{CartItem, ShippingAddress};

    pub(crate) fn item(slug: &str, price: i64, quantity: u32) -> CartItem {
        CartItem {
            slug: slug.to_string(),
            name: format!("Produto {slug}"),
            image: format!("/images/{slug}.jpg"),
            price: Decimal::from(price),
            quantity,
            count_in_stock: 10,
        }
    }

    pub(crate) fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Maria Silva".to_string(),
            address: "Rua das Flores, 100".to_string(),
            city: "São Paulo".to_string(),
            postal_code: "01000-000".to_string(),
            country: "Brasil".to_string(),
        }
    }
}
