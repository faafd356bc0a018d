//! Terminal renderer for change events and notifications.

use rosebud_session::{CartChange, CartObserver, Notification, NotificationKind};

/// Renders engine events as log lines, the terminal's stand-in for the
/// storefront's badge, sidebar, and toast banners.
pub struct TermRenderer;

impl CartObserver for TermRenderer {
    fn on_change(&mut self, change: &CartChange) {
        if change.badge.visible {
            tracing::info!(mode = %change.mode, count = change.badge.count, "badge");
        } else {
            tracing::info!(mode = %change.mode, "badge hidden");
        }

        let sidebar = &change.sidebar;
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
        if let Some(total) = &sidebar.total {
            tracing::info!("  Total: {total}");
        }
        tracing::info!("  [{}] -> {}", sidebar.action_label, sidebar.action_href);
    }

    fn on_notification(&mut self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => tracing::info!("{}", notification.message),
            NotificationKind::Warning => tracing::warn!("{}", notification.message),
            NotificationKind::Error => tracing::error!("{}", notification.message),
        }
    }
}
