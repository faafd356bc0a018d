//! Core types for Rosebud.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod item;
pub mod mode;
pub mod price;

pub use id::*;
pub use item::CartItem;
pub use mode::{ListKind, Mode};
pub use price::display_price;
