//! View models recomputed after every mutation.
//!
//! The engine never touches a UI toolkit; it hands these plain structs to
//! whatever presentation layer subscribed (terminal renderer, template,
//! test harness) through [`crate::CartObserver`].

use rosebud_core::{CartItem, Mode, display_price};
use rust_decimal::Decimal;

/// Accent color for inquiry-mode controls.
pub const ACCENT_INQUIRY: &str = "#377DFF";

/// Accent color for shopping-mode controls.
pub const ACCENT_CART: &str = "#D63585";

/// Header count badge spanning both lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeView {
    /// Sum of quantities across the shopping and inquiry lists.
    pub count: u32,
    /// Badges are hidden entirely at zero rather than showing "0".
    pub visible: bool,
}

impl BadgeView {
    /// Compute the badge from both lists.
    #[must_use]
    pub fn compute(cart: &[CartItem], inquiry: &[CartItem]) -> Self {
        let count = cart
            .iter()
            .chain(inquiry)
            .map(|item| item.quantity)
            .fold(0u32, u32::saturating_add);
        Self {
            count,
            visible: count > 0,
        }
    }
}

/// One rendered line in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    /// Display name.
    pub name: String,
    /// SKU shown under the name.
    pub sku: String,
    /// Line quantity.
    pub quantity: u32,
    /// "Inquiry Item" in inquiry mode, a formatted unit price otherwise.
    pub price_label: String,
    /// Catalog image reference, if any.
    pub image: Option<String>,
}

/// Sidebar summary panel, themed by the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarView {
    /// Panel header ("Shopping Cart" or "Inquiry Cart").
    pub header: &'static str,
    /// Action button label ("Checkout" or "Make an Inquiry").
    pub action_label: &'static str,
    /// Action button accent color.
    pub accent: &'static str,
    /// Where the action button routes.
    pub action_href: &'static str,
    /// Rendered item rows.
    pub rows: Vec<SidebarRow>,
    /// Formatted running total; absent in inquiry mode, where items have no
    /// fixed price.
    pub total: Option<String>,
    /// Placeholder shown instead of rows when the active list is empty.
    pub empty_message: Option<&'static str>,
}

impl SidebarView {
    /// Build the sidebar for the current session state.
    #[must_use]
    pub fn compute(mode: Mode, cart: &[CartItem], inquiry: &[CartItem]) -> Self {
        if mode == Mode::Inquiry {
            return Self {
                header: "Inquiry Cart",
                action_label: "Make an Inquiry",
                accent: ACCENT_INQUIRY,
                action_href: "/contact?inquiry=cart",
                rows: inquiry
                    .iter()
                    .map(|item| row(item, "Inquiry Item".to_owned()))
                    .collect(),
                total: None,
                empty_message: None,
            };
        }

        let total: Decimal = cart.iter().map(CartItem::line_total).sum();
        Self {
            header: "Shopping Cart",
            action_label: "Checkout",
            accent: ACCENT_CART,
            action_href: "/cart",
            rows: cart
                .iter()
                .map(|item| row(item, display_price(item.price)))
                .collect(),
            total: Some(display_price(total)),
            empty_message: cart.is_empty().then_some("Your cart is empty"),
        }
    }
}

fn row(item: &CartItem, price_label: String) -> SidebarRow {
    SidebarRow {
        name: item.name.clone(),
        sku: item.sku.to_string(),
        quantity: item.quantity,
        price_label,
        image: item.image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, quantity: u32) -> CartItem {
        CartItem::new(id, format!("Item {id}"), Decimal::from(price)).with_quantity(quantity)
    }

    #[test]
    fn test_badge_spans_both_lists() {
        let badge = BadgeView::compute(&[item("RB-1", 10, 2)], &[item("RB-2", 0, 3)]);
        assert_eq!(badge.count, 5);
        assert!(badge.visible);
    }

    #[test]
    fn test_badge_hidden_at_zero() {
        let badge = BadgeView::compute(&[], &[]);
        assert_eq!(badge.count, 0);
        assert!(!badge.visible);
    }

    #[test]
    fn test_inquiry_sidebar_theme() {
        let sidebar = SidebarView::compute(Mode::Inquiry, &[], &[item("RB-2", 0, 1)]);
        assert_eq!(sidebar.header, "Inquiry Cart");
        assert_eq!(sidebar.action_label, "Make an Inquiry");
        assert_eq!(sidebar.accent, ACCENT_INQUIRY);
        assert_eq!(sidebar.action_href, "/contact?inquiry=cart");
        assert_eq!(sidebar.rows.len(), 1);
        let row = sidebar.rows.first().expect("one row");
        assert_eq!(row.price_label, "Inquiry Item");
        assert!(sidebar.total.is_none());
    }

    #[test]
    fn test_cart_sidebar_theme_and_total() {
        let sidebar = SidebarView::compute(Mode::Cart, &[item("RB-1", 120, 2)], &[]);
        assert_eq!(sidebar.header, "Shopping Cart");
        assert_eq!(sidebar.action_label, "Checkout");
        assert_eq!(sidebar.accent, ACCENT_CART);
        assert_eq!(sidebar.total.as_deref(), Some("$240.00"));
        assert!(sidebar.empty_message.is_none());
    }

    #[test]
    fn test_empty_sidebar_placeholder() {
        let sidebar = SidebarView::compute(Mode::None, &[], &[]);
        assert_eq!(sidebar.empty_message, Some("Your cart is empty"));
        assert_eq!(sidebar.total.as_deref(), Some("$0.00"));
        assert!(sidebar.rows.is_empty());
    }
}
