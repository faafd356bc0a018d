//! Session-level error type.
//!
//! Every variant except [`SessionError::Store`] is recovered locally by the
//! caller showing the paired notification; nothing in this engine is fatal.

use rosebud_core::Mode;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the mutation API.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Persisting state failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An add targeted the list the current mode disallows.
    #[error("cannot add to the {attempted} list while the {active} list is active")]
    ModeConflict {
        /// Mode of the list the add targeted.
        attempted: Mode,
        /// Mode currently holding the session.
        active: Mode,
    },

    /// Coupon code not in the registry.
    #[error("unknown coupon code: {0}")]
    UnknownCoupon(String),

    /// Checkout attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,
}
