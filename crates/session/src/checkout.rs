//! Checkout routing and order drafts.
//!
//! A cart holding any custom or specialty line cannot be charged at
//! checkout; it routes into the inquiry flow for a sales quote instead.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use rosebud_core::CartItem;
use serde::{Deserialize, Serialize};

use crate::summary::CartSummary;

/// Where the checkout button sends the shopping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutMode {
    /// Standard paid checkout.
    Standard,
    /// Quote-request flow for custom/specialty goods.
    Inquiry,
}

impl CheckoutMode {
    /// Route a cart: any custom line forces the inquiry flow.
    #[must_use]
    pub fn route(items: &[CartItem]) -> Self {
        if items.iter().any(CartItem::is_custom_order) {
            Self::Inquiry
        } else {
            Self::Standard
        }
    }
}

/// Snapshot of a placed order, persisted under the `lastOrder` key for the
/// confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Confirmation code shown to the customer, e.g. "#K4ZTXQ2MP".
    pub code: String,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Item snapshot at placement time.
    pub items: Vec<CartItem>,
    /// Totals at placement time.
    pub summary: CartSummary,
}

/// Generate a confirmation code: `#` plus nine uppercase alphanumerics.
#[must_use]
pub fn generate_order_code() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|byte| char::from(byte).to_ascii_uppercase())
        .collect();
    format!("#{suffix}")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_route_standard_for_catalog_goods() {
        let items = vec![CartItem::new("RB-1", "Dinner Set", Decimal::from(450))];
        assert_eq!(CheckoutMode::route(&items), CheckoutMode::Standard);
    }

    #[test]
    fn test_route_inquiry_when_any_line_is_custom() {
        let items = vec![
            CartItem::new("RB-1", "Dinner Set", Decimal::from(450)),
            CartItem::new("RB-2", "Dyed Terry Towels", Decimal::ZERO)
                .with_category("Custom Gift Items"),
        ];
        assert_eq!(CheckoutMode::route(&items), CheckoutMode::Inquiry);
    }

    #[test]
    fn test_order_code_format() {
        let code = generate_order_code();
        assert_eq!(code.len(), 10);
        assert!(code.starts_with('#'));
        assert!(
            code.chars()
                .skip(1)
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}
