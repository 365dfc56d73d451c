//! Money

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Currency every storefront price is quoted in.
pub fn store_currency() -> &'static Currency {
    iso::BRL
}

/// Round to two decimal places, half-up.
///
/// Storefront amounts are never negative, so rounding midpoints away from zero
/// is rounding half-up.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a decimal amount into store-currency money.
///
/// Returns `None` when the amount does not fit into minor units.
pub fn to_money(amount: Decimal) -> Option<Money<'static, Currency>> {
    let minor = round2(amount).checked_mul(Decimal::ONE_HUNDRED)?.to_i64()?;

    Some(Money::from_minor(minor, store_currency()))
}

/// Format an amount for display in the store currency.
pub fn format_brl(amount: Decimal) -> String {
    to_money(amount).map_or_else(|| format!("R${}", round2(amount)), |money| format!("{money}"))
}
