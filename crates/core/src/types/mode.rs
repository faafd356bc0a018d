//! Session mode derived from the two item lists.
//!
//! A session is either shopping (checkout-bound cart) or inquiring (quote
//! request routed to the contact flow), never both. The mode is always
//! computed from list emptiness and never stored, so it cannot drift from
//! the underlying lists.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two item lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListKind {
    /// The checkout-bound shopping list.
    Cart,
    /// The quote-request list.
    Inquiry,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cart => write!(f, "cart"),
            Self::Inquiry => write!(f, "inquiry"),
        }
    }
}

/// Current session mode.
///
/// Inquiry takes priority when, abnormally, both lists are non-empty; the
/// mutual-exclusion guards in the session API keep that state unreachable
/// through normal use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Both lists are empty.
    #[default]
    None,
    /// The shopping list is active.
    Cart,
    /// The inquiry list is active.
    Inquiry,
}

impl Mode {
    /// Derive the mode from the emptiness of the two lists.
    #[must_use]
    pub const fn derive(cart_empty: bool, inquiry_empty: bool) -> Self {
        if !inquiry_empty {
            Self::Inquiry
        } else if !cart_empty {
            Self::Cart
        } else {
            Self::None
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Cart => write!(f, "cart"),
            Self::Inquiry => write!(f, "inquiry"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_empty_session() {
        assert_eq!(Mode::derive(true, true), Mode::None);
    }

    #[test]
    fn test_mode_cart_active() {
        assert_eq!(Mode::derive(false, true), Mode::Cart);
    }

    #[test]
    fn test_mode_inquiry_active() {
        assert_eq!(Mode::derive(true, false), Mode::Inquiry);
    }

    #[test]
    fn test_mode_inquiry_wins_when_both_populated() {
        assert_eq!(Mode::derive(false, false), Mode::Inquiry);
    }
}
