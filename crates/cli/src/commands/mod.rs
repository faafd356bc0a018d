//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod coupon;
pub mod show;
