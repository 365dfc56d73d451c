//! Pricing
//!
//! Derives the order summary from cart lines. Prices are recomputed from the
//! lines every time they are shown; nothing here is cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{cart::CartItem, money::round2};

/// Prices shown on the order summary and submitted with an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPrices {
    /// Sum of line totals
    pub items_price: Decimal,

    /// Delivery fee
    pub shipping_price: Decimal,

    /// Tax on the items
    pub tax_price: Decimal,

    /// Items, shipping and tax together
    pub total_price: Decimal,
}

/// Shipping and tax rules.
#[derive(Debug, Clone, Copy)]
pub struct PriceSchedule {
    /// Items price from which the shipping fee is charged
    pub free_shipping_threshold: Decimal,

    /// Flat shipping fee
    pub shipping_fee: Decimal,

    /// Tax rate applied to the items price, as a fraction
    pub tax_rate: Decimal,
}

impl Default for PriceSchedule {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(200),
            shipping_fee: Decimal::from(15),
            tax_rate: Decimal::new(15, 2),
        }
    }
}

impl PriceSchedule {
    /// Shipping fee for a given items price.
    ///
    /// Orders below the threshold ship free; the flat fee applies from the
    /// threshold upwards.
    pub fn shipping_price(&self, items_price: Decimal) -> Decimal {
        if items_price < self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.shipping_fee
        }
    }

    /// Tax for a given items price, rounded to cents.
    pub fn tax_price(&self, items_price: Decimal) -> Decimal {
        round2(items_price * self.tax_rate)
    }

    /// Derive the order prices for `items`.
    pub fn derive(&self, items: &[CartItem]) -> OrderPrices {
        let items_price = round2(
            items
                .iter()
                .map(CartItem::line_total)
                .fold(Decimal::ZERO, Decimal::saturating_add),
        );
        let shipping_price = self.shipping_price(items_price);
        let tax_price = self.tax_price(items_price);
        let total_price = round2(
            items_price
                .saturating_add(shipping_price)
                .saturating_add(tax_price),
        );

        OrderPrices {
            items_price,
            shipping_price,
            tax_price,
            total_price,
        }
    }
}

/// Derive order prices with the default schedule.
pub fn derive_prices(items: &[CartItem]) -> OrderPrices {
    PriceSchedule::default().derive(items)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::cart::test_support::item;

    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap_or_default()
    }

    #[test]
    fn below_threshold_ships_free() {
        let prices = derive_prices(&[item("a", 50, 2), item("b", 30, 1)]);

        assert_eq!(prices.items_price, dec("130"));
        assert_eq!(prices.shipping_price, Decimal::ZERO);
        assert_eq!(prices.tax_price, dec("19.5"));
        assert_eq!(prices.total_price, dec("149.5"));
    }

    #[test]
    fn above_threshold_charges_flat_fee() {
        let prices = derive_prices(&[item("a", 125, 2)]);

        assert_eq!(prices.items_price, dec("250"));
        assert_eq!(prices.shipping_price, dec("15"));
        assert_eq!(prices.tax_price, dec("37.5"));
        assert_eq!(prices.total_price, dec("302.5"));
    }

    #[test]
    fn threshold_itself_charges_fee() {
        let schedule = PriceSchedule::default();

        assert_eq!(schedule.shipping_price(dec("199.99")), Decimal::ZERO);
        assert_eq!(schedule.shipping_price(dec("200")), dec("15"));
    }

    #[test]
    fn tax_rounds_half_up() {
        let schedule = PriceSchedule::default();

        // 0.15 * 0.1 = 0.015
        assert_eq!(schedule.tax_price(dec("0.1")), dec("0.02"));
        // 0.15 * 33.33 = 4.9995
        assert_eq!(schedule.tax_price(dec("33.33")), dec("5.00"));
    }

    #[test]
    fn items_price_ignores_order() {
        let forward = derive_prices(&[item("a", 10, 3), item("b", 7, 2), item("c", 99, 1)]);
        let reversed = derive_prices(&[item("c", 99, 1), item("b", 7, 2), item("a", 10, 3)]);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn total_is_rounded_sum() {
        let mut line = item("a", 0, 3);
        line.price = dec("33.337");

        let prices = derive_prices(&[line]);

        assert_eq!(prices.items_price, dec("100.01"));
        assert_eq!(
            prices.total_price,
            round2(prices.items_price + prices.shipping_price + prices.tax_price)
        );
    }

    #[test]
    fn empty_cart_costs_nothing() {
        assert_eq!(derive_prices(&[]), OrderPrices::default());
    }

    #[test]
    fn prices_serialize_as_numbers() -> testresult::TestResult {
        let prices = derive_prices(&[item("a", 50, 2), item("b", 30, 1)]);

        let json = serde_json::to_value(prices)?;

        assert_eq!(json["taxPrice"], serde_json::json!(19.5));

        Ok(())
    }
}
