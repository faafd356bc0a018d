//! Price display formatting using decimal arithmetic.
//!
//! All monetary amounts in the catalog are USD; amounts are carried as
//! [`rust_decimal::Decimal`] end to end so totals never pick up float error.

use rust_decimal::Decimal;

/// Format a decimal amount as a display price (e.g., "$19.99").
///
/// Negative amounts keep their sign after the currency symbol ("$-5.00");
/// the summary layer formats discounts itself.
#[must_use]
pub fn display_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}
