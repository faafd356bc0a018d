//! Rosebud Core - Shared types library.
//!
//! This crate provides common types used across all Rosebud components:
//! - `session` - Cart/session engine (dual-mode shopping and inquiry carts)
//! - `cli` - Command-line front end for driving a session
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no rendering.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, cart items, prices, and
//!   the session mode

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
