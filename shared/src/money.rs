//! Authoritative money formatting
//!
//! Every renderer formats monetary values through these two helpers. The
//! same record is rendered through several templates, so the output must
//! be byte-identical across render paths.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to two fraction digits.
///
/// Midpoints round away from zero (ordinary cash rounding).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a monetary amount with its currency symbol.
///
/// Always exactly two fraction digits: `format_currency(9.8, "$")` is
/// `"$9.80"`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, round_money(amount))
}

/// Format the quantity/unit-price line of a line item.
///
/// `format_quantity_line(2, 4.99, "$")` is `"2 x $4.99"`.
pub fn format_quantity_line(quantity: u32, unit_price: Decimal, symbol: &str) -> String {
    format!("{} x {}", quantity, format_currency(unit_price, symbol))
}
