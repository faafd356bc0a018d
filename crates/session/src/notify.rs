//! Change events and transient notifications.
//!
//! The mutation API emits a [`CartChange`] after every state change and a
//! [`Notification`] wherever the storefront showed a toast; a presentation
//! layer subscribes through [`CartObserver`] and renders them however it
//! likes. Notifications are fire-and-forget: they carry no state and cannot
//! be queried afterward.

use std::time::Duration;

use rosebud_core::Mode;

use crate::view::{BadgeView, SidebarView};

/// How long a notification stays on screen before auto-dismissing.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Visual flavor of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
}

/// A transient banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message text.
    pub message: String,
    /// Visual flavor.
    pub kind: NotificationKind,
    /// Display duration before auto-dismissal.
    pub ttl: Duration,
}

impl Notification {
    /// Success banner.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    /// Error banner.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    /// Warning banner.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Warning)
    }

    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            ttl: NOTIFICATION_TTL,
        }
    }
}

/// Snapshot emitted after every mutation.
///
/// Carries everything a renderer needs to redraw the badge and sidebar
/// without reaching back into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartChange {
    /// Mode after the mutation.
    pub mode: Mode,
    /// Recomputed header badge.
    pub badge: BadgeView,
    /// Recomputed sidebar panel.
    pub sidebar: SidebarView,
}

/// Seam between the session engine and a presentation layer.
pub trait CartObserver {
    /// Called after every successful mutation.
    fn on_change(&mut self, change: &CartChange);

    /// Called for each transient banner, including rejection notices.
    fn on_notification(&mut self, notification: &Notification);
}
