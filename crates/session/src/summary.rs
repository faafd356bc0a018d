//! Shipping methods and order totals.

use core::fmt;
use std::str::FromStr;

use rosebud_core::CartItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coupon::Coupon;

/// Shipping options offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ShippingMethod {
    /// Standard shipping at no charge.
    #[default]
    Free,
    /// Expedited carrier delivery.
    Express,
    /// Warehouse pickup (palletized, wholesale orders).
    Pickup,
}

impl ShippingMethod {
    /// Flat cost of this method in USD.
    #[must_use]
    pub fn cost(self) -> Decimal {
        match self {
            Self::Free => Decimal::ZERO,
            Self::Express => Decimal::from(15),
            Self::Pickup => Decimal::from(21),
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Express => write!(f, "express"),
            Self::Pickup => write!(f, "pickup"),
        }
    }
}

impl FromStr for ShippingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "express" => Ok(Self::Express),
            "pickup" => Ok(Self::Pickup),
            other => Err(format!(
                "unknown shipping method: {other} (expected free, express, or pickup)"
            )),
        }
    }
}

/// Totals for the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Coupon discount taken off the subtotal.
    pub discount: Decimal,
    /// Flat shipping cost.
    pub shipping: Decimal,
    /// `subtotal - discount + shipping`.
    pub total: Decimal,
}

impl CartSummary {
    /// Compute totals for `items` with an optional coupon and the chosen
    /// shipping method.
    #[must_use]
    pub fn compute(items: &[CartItem], coupon: Option<&Coupon>, shipping: ShippingMethod) -> Self {
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let discount = coupon.map_or(Decimal::ZERO, |coupon| coupon.discount(subtotal));
        let shipping = shipping.cost();
        Self {
            subtotal,
            discount,
            shipping,
            total: subtotal - discount + shipping,
        }
    }
}
