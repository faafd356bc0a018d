//! Session inspection command.

use rosebud_core::display_price;
use rosebud_session::{CartSession, FileStore, ShippingMethod};

/// Log the badge, sidebar, and totals for the current session.
pub fn state(session: &CartSession<FileStore>, shipping: ShippingMethod) {
    let badge = session.badge();
    if badge.visible {
        tracing::info!(mode = %session.mode(), count = badge.count, "badge");
    } else {
        tracing::info!(mode = %session.mode(), "badge hidden");
    }

    let sidebar = session.sidebar();
    tracing::info!("{} [{}]", sidebar.header, sidebar.accent);
    if let Some(empty) = sidebar.empty_message {
        tracing::info!("  {empty}");
    }
    for (index, row) in sidebar.rows.iter().enumerate() {
        tracing::info!(
            "  {index}. {} ({}) x{} - {}",
            row.name,
            row.sku,
            row.quantity,
            row.price_label
        );
    }
    tracing::info!("  [{}] -> {}", sidebar.action_label, sidebar.action_href);

    if sidebar.total.is_some() {
        let summary = session.summary(shipping);
        tracing::info!("Totals ({shipping} shipping)");
        tracing::info!("  Subtotal: {}", display_price(summary.subtotal));
        if let Some(coupon) = session.coupon() {
            tracing::info!(
                "  Discount ({}): -{}",
                coupon.code,
                display_price(summary.discount)
            );
        }
        tracing::info!("  Shipping: {}", display_price(summary.shipping));
        tracing::info!("  Total: {}", display_price(summary.total));
    }
}
