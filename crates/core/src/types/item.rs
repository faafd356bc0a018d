//! Cart item type shared by the shopping and inquiry lists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{ItemId, Sku};

const fn default_quantity() -> u32 {
    1
}

/// A single line in either the shopping or the inquiry list.
///
/// The persisted JSON layout matches the web storefront's local storage,
/// so a session can pick up a store written by the browser client. Missing
/// fields fall back to sane defaults rather than failing the whole list.
///
/// ## Invariants
///
/// - `quantity >= 1`: a mutation that drives quantity to zero or below
///   removes the line instead of keeping it
/// - `price >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Identifier unique within its list. Falls back to the SKU when absent.
    #[serde(default)]
    pub id: ItemId,
    /// Stock-keeping unit. Falls back to the identifier when absent.
    #[serde(default)]
    pub sku: Sku,
    /// Display name. Lines without a name are dropped on load.
    pub name: String,
    /// Unit price in USD.
    #[serde(default)]
    pub price: Decimal,
    /// Line quantity.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Catalog image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Color variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Category tag, used for custom/specialty detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Explicit custom-order flag.
    #[serde(default)]
    pub is_custom: bool,
}

impl CartItem {
    /// Create an item with quantity 1 and no optional attributes.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Decimal) -> Self {
        let id = id.into();
        Self {
            sku: Sku::new(id.as_str()),
            id,
            name: name.into(),
            price,
            quantity: 1,
            image: None,
            color: None,
            category: None,
            is_custom: false,
        }
    }

    /// Set the SKU.
    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<Sku>) -> Self {
        self.sku = sku.into();
        self
    }

    /// Set the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the color variant.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the category tag.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Mark as an explicit custom order.
    #[must_use]
    pub const fn custom(mut self) -> Self {
        self.is_custom = true;
        self
    }

    /// Normalize a loaded item, returning `None` for lines that should be
    /// dropped.
    ///
    /// - empty display name drops the line
    /// - an absent identifier falls back to the SKU and vice versa
    /// - quantity is raised to at least 1
    /// - a negative price is clamped to zero
    #[must_use]
    pub fn normalized(mut self) -> Option<Self> {
        self.name = self.name.trim().to_owned();
        if self.name.is_empty() {
            return None;
        }
        if self.id.is_empty() {
            self.id = ItemId::new(self.sku.as_str());
        }
        if self.sku.is_empty() {
            self.sku = Sku::new(self.id.as_str());
        }
        self.quantity = self.quantity.max(1);
        if self.price < Decimal::ZERO {
            self.price = Decimal::ZERO;
        }
        Some(self)
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Whether this line routes checkout into the inquiry flow.
    ///
    /// Custom and specialty goods have no fixed price and are quoted by
    /// sales instead of being charged at checkout.
    #[must_use]
    pub fn is_custom_order(&self) -> bool {
        if self.is_custom {
            return true;
        }
        self.category.as_deref().is_some_and(|category| {
            let category = category.to_ascii_lowercase();
            category.contains("custom") || category.contains("specialty")
        })
    }
}
