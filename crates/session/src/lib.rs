//! Rosebud session engine.
//!
//! A browser session holds two parallel item lists - the checkout-bound
//! shopping cart and the quote-request inquiry cart - persisted as JSON in
//! a small key-value store. The two lists are mutually exclusive within one
//! session: while either is populated, adds to the other are rejected so a
//! checkout never mixes purchase and quote intents.
//!
//! # Modules
//!
//! - [`store`] - Key-value persistence ([`KvStore`] trait, memory and file
//!   backends, the persisted key layout)
//! - [`session`] - [`CartSession`]: expiry on load, the mode arbiter, and
//!   the mutation API
//! - [`coupon`] - Coupon registry and discount arithmetic
//! - [`summary`] - Shipping methods and order totals
//! - [`checkout`] - Checkout routing and order drafts
//! - [`view`] - Badge and sidebar view models recomputed after every
//!   mutation
//! - [`notify`] - Change events, transient notifications, and the
//!   [`CartObserver`] seam between the engine and any presentation layer
//! - [`config`] - Engine configuration from environment variables

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod clock;
pub mod config;
pub mod coupon;
pub mod error;
pub mod notify;
pub mod session;
pub mod store;
pub mod summary;
pub mod view;

pub use checkout::{CheckoutMode, OrderDraft};
pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, SessionConfig};
pub use coupon::{Coupon, CouponKind};
pub use error::SessionError;
pub use notify::{CartChange, CartObserver, Notification, NotificationKind};
pub use session::CartSession;
pub use store::{FileStore, KvStore, MemoryStore, StoreError};
pub use summary::{CartSummary, ShippingMethod};
pub use view::{BadgeView, SidebarRow, SidebarView};
