//! Coupon registry and discount arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a coupon's value applies to the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CouponKind {
    /// Value is a percentage of the subtotal.
    Percent,
    /// Value is a fixed USD amount.
    Fixed,
}

/// An applied coupon, persisted under the `coupon` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Normalized (uppercase) code.
    pub code: String,
    /// Percent or fixed.
    pub kind: CouponKind,
    /// Percentage points or USD amount, per `kind`.
    pub value: Decimal,
}

impl Coupon {
    /// Look up a code in the registry.
    ///
    /// Input is trimmed and matched case-insensitively, the way the
    /// storefront's coupon field treats it.
    #[must_use]
    pub fn lookup(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        let (kind, value) = match code.as_str() {
            "SAVE10" => (CouponKind::Percent, Decimal::from(10)),
            "SAVE20" => (CouponKind::Percent, Decimal::from(20)),
            "WELCOME15" => (CouponKind::Percent, Decimal::from(15)),
            "FLAT25" => (CouponKind::Fixed, Decimal::from(25)),
            _ => return None,
        };
        Some(Self { code, kind, value })
    }

    /// Discount this coupon takes off `subtotal`.
    #[must_use]
    pub fn discount(&self, subtotal: Decimal) -> Decimal {
        match self.kind {
            CouponKind::Percent => subtotal * self.value / Decimal::from(100),
            CouponKind::Fixed => self.value,
        }
    }
}
