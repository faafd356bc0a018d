//! The cart session: expiry on load, the mode arbiter, and the mutation API.
//!
//! A [`CartSession`] owns the persisted store and the two in-memory lists.
//! Every mutation is synchronous: apply, persist, refresh the shared
//! timestamp, then emit a recomputed [`CartChange`] to subscribed
//! observers. There is no batching and no async queuing.

use chrono::{DateTime, Utc};
use rosebud_core::{CartItem, ListKind, Mode};

use crate::checkout::{CheckoutMode, OrderDraft, generate_order_code};
use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::coupon::Coupon;
use crate::error::SessionError;
use crate::notify::{CartChange, CartObserver, Notification};
use crate::store::{KvStore, StoreError, keys};
use crate::summary::{CartSummary, ShippingMethod};
use crate::view::{BadgeView, SidebarView};

/// A customer session over a persisted store.
pub struct CartSession<S: KvStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    config: SessionConfig,
    cart: Vec<CartItem>,
    inquiry: Vec<CartItem>,
    coupon: Option<Coupon>,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: KvStore> CartSession<S> {
    /// Load a session against the wall clock.
    ///
    /// # Errors
    ///
    /// Returns an error only if clearing an expired session fails to write
    /// through to the store.
    pub fn load(store: S, config: SessionConfig) -> Result<Self, StoreError> {
        Self::load_with_clock(store, SystemClock, config)
    }
}

impl<S: KvStore, C: Clock> CartSession<S, C> {
    /// Load a session with an injected time source.
    ///
    /// If the persisted timestamp is older than the configured expiry, both
    /// lists, the timestamp, and the coupon are cleared as one logical
    /// operation before the session starts. An absent timestamp means a
    /// first visit and never expires. Malformed persisted values are
    /// recovered by treating them as empty.
    ///
    /// # Errors
    ///
    /// Returns an error only if clearing an expired session fails to write
    /// through to the store.
    pub fn load_with_clock(
        mut store: S,
        clock: C,
        config: SessionConfig,
    ) -> Result<Self, StoreError> {
        if expired(&store, &clock, &config) {
            tracing::info!("session expired, clearing persisted state");
            store.remove(keys::CART)?;
            store.remove(keys::INQUIRY_CART)?;
            store.remove(keys::CART_TIMESTAMP)?;
            store.remove(keys::COUPON)?;
            return Ok(Self::empty(store, clock, config));
        }

        let cart = decode_items(store.get(keys::CART), keys::CART);
        let inquiry = decode_items(store.get(keys::INQUIRY_CART), keys::INQUIRY_CART);
        let coupon = decode_coupon(store.get(keys::COUPON));
        Ok(Self {
            cart,
            inquiry,
            coupon,
            ..Self::empty(store, clock, config)
        })
    }

    fn empty(store: S, clock: C, config: SessionConfig) -> Self {
        Self {
            store,
            clock,
            config,
            cart: Vec::new(),
            inquiry: Vec::new(),
            coupon: None,
            observers: Vec::new(),
        }
    }

    /// Subscribe a presentation layer to change events and notifications.
    pub fn subscribe(&mut self, observer: Box<dyn CartObserver>) {
        self.observers.push(observer);
    }

    // =========================================================================
    // Mode arbiter
    // =========================================================================

    /// Current mode, derived from list emptiness and never stored.
    #[must_use]
    pub fn mode(&self) -> Mode {
        Mode::derive(self.cart.is_empty(), self.inquiry.is_empty())
    }

    /// Whether a cart add is currently allowed.
    #[must_use]
    pub fn can_add_to_cart(&self) -> bool {
        self.inquiry.is_empty()
    }

    /// Whether an inquiry add is currently allowed.
    #[must_use]
    pub fn can_add_to_inquiry(&self) -> bool {
        self.cart.is_empty()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Shopping-cart lines.
    #[must_use]
    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart
    }

    /// Inquiry-cart lines.
    #[must_use]
    pub fn inquiry_items(&self) -> &[CartItem] {
        &self.inquiry
    }

    /// Currently applied coupon.
    #[must_use]
    pub const fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Underlying store, for inspection.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Configuration this session was loaded with.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Recompute the header badge.
    #[must_use]
    pub fn badge(&self) -> BadgeView {
        BadgeView::compute(&self.cart, &self.inquiry)
    }

    /// Recompute the sidebar panel.
    #[must_use]
    pub fn sidebar(&self) -> SidebarView {
        SidebarView::compute(self.mode(), &self.cart, &self.inquiry)
    }

    /// Totals for the shopping list.
    #[must_use]
    pub fn summary(&self, shipping: ShippingMethod) -> CartSummary {
        CartSummary::compute(&self.cart, self.coupon.as_ref(), shipping)
    }

    /// Where checkout routes the shopping list.
    #[must_use]
    pub fn checkout_mode(&self) -> CheckoutMode {
        CheckoutMode::route(&self.cart)
    }

    // =========================================================================
    // Mutation API
    // =========================================================================

    /// Add an item to the shopping cart, merging by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ModeConflict`] (after emitting a rejection
    /// notice) while the inquiry list is populated; the cart is left
    /// unchanged. Store failures propagate.
    pub fn add_to_cart(&mut self, item: CartItem) -> Result<(), SessionError> {
        if !self.can_add_to_cart() {
            return Err(self.reject(
                Mode::Cart,
                "To add an item to the cart, complete your inquiry first.",
            ));
        }
        let Some(item) = named(item).normalized() else {
            return Ok(());
        };
        let name = item.name.clone();
        merge(&mut self.cart, item);
        self.persist_and_render()?;
        self.emit_notification(Notification::success(format!("{name} added to cart!")));
        Ok(())
    }

    /// Add an item to the inquiry cart, merging by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ModeConflict`] (after emitting a rejection
    /// notice) while the shopping cart is populated; the inquiry list is
    /// left unchanged. Store failures propagate.
    pub fn add_to_inquiry(&mut self, item: CartItem) -> Result<(), SessionError> {
        if !self.can_add_to_inquiry() {
            return Err(self.reject(
                Mode::Inquiry,
                "To make an inquiry, complete your Cart transactions first.",
            ));
        }
        let Some(item) = named(item).normalized() else {
            return Ok(());
        };
        let name = item.name.clone();
        merge(&mut self.inquiry, item);
        self.persist_and_render()?;
        self.emit_notification(Notification::success(format!(
            "{name} added to inquiry cart!"
        )));
        Ok(())
    }

    /// Adjust the quantity of the line at `index` by `delta`.
    ///
    /// A resulting quantity of zero or below removes the line; an
    /// out-of-range index is a no-op.
    ///
    /// # Errors
    ///
    /// Store failures propagate.
    pub fn update_quantity(
        &mut self,
        list: ListKind,
        index: usize,
        delta: i64,
    ) -> Result<(), SessionError> {
        let items = self.list_mut(list);
        let Some(line) = items.get_mut(index) else {
            return Ok(());
        };
        let quantity = i64::from(line.quantity).saturating_add(delta);
        if quantity <= 0 {
            items.remove(index);
        } else {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        self.persist_and_render()
    }

    /// Remove the line at `index` unconditionally; out-of-range is a no-op.
    ///
    /// # Errors
    ///
    /// Store failures propagate.
    pub fn remove_item(&mut self, list: ListKind, index: usize) -> Result<(), SessionError> {
        let items = self.list_mut(list);
        if index >= items.len() {
            return Ok(());
        }
        items.remove(index);
        self.persist_and_render()
    }

    /// Empty the shopping cart and drop any coupon.
    ///
    /// # Errors
    ///
    /// Store failures propagate.
    pub fn clear_cart(&mut self) -> Result<(), SessionError> {
        self.cart.clear();
        self.coupon = None;
        self.store.remove(keys::CART)?;
        self.store.remove(keys::COUPON)?;
        self.emit_change();
        Ok(())
    }

    /// Empty the inquiry cart.
    ///
    /// # Errors
    ///
    /// Store failures propagate.
    pub fn clear_inquiry(&mut self) -> Result<(), SessionError> {
        self.inquiry.clear();
        self.store.remove(keys::INQUIRY_CART)?;
        self.emit_change();
        Ok(())
    }

    /// Empty both lists and remove the timestamp and coupon.
    ///
    /// # Errors
    ///
    /// Store failures propagate.
    pub fn reset_all(&mut self) -> Result<(), SessionError> {
        self.cart.clear();
        self.inquiry.clear();
        self.coupon = None;
        self.store.remove(keys::CART)?;
        self.store.remove(keys::INQUIRY_CART)?;
        self.store.remove(keys::CART_TIMESTAMP)?;
        self.store.remove(keys::COUPON)?;
        self.emit_change();
        Ok(())
    }

    /// Apply a coupon code to the shopping cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownCoupon`] (after emitting an error
    /// notice) for codes not in the registry. Store failures propagate.
    pub fn apply_coupon(&mut self, code: &str) -> Result<(), SessionError> {
        let Some(coupon) = Coupon::lookup(code) else {
            self.emit_notification(Notification::error("Invalid coupon code"));
            return Err(SessionError::UnknownCoupon(
                code.trim().to_ascii_uppercase(),
            ));
        };
        let raw = serde_json::to_string(&coupon).map_err(StoreError::from)?;
        self.store.set(keys::COUPON, raw)?;
        self.coupon = Some(coupon);
        self.emit_notification(Notification::success("Coupon applied successfully!"));
        Ok(())
    }

    /// Drop the applied coupon.
    ///
    /// # Errors
    ///
    /// Store failures propagate.
    pub fn remove_coupon(&mut self) -> Result<(), SessionError> {
        self.coupon = None;
        self.store.remove(keys::COUPON)?;
        self.emit_notification(Notification::success("Coupon removed"));
        Ok(())
    }

    /// Place an order for the shopping list: snapshot a draft under
    /// `lastOrder`, then clear the cart and coupon.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyCart`] (after emitting an error notice)
    /// when the cart is empty. Store failures propagate.
    pub fn place_order(&mut self, shipping: ShippingMethod) -> Result<OrderDraft, SessionError> {
        if self.cart.is_empty() {
            self.emit_notification(Notification::error("Your cart is empty"));
            return Err(SessionError::EmptyCart);
        }
        let draft = OrderDraft {
            code: generate_order_code(),
            placed_at: DateTime::from_timestamp_millis(self.clock.now_millis())
                .unwrap_or_else(Utc::now),
            items: self.cart.clone(),
            summary: self.summary(shipping),
        };
        let raw = serde_json::to_string(&draft).map_err(StoreError::from)?;
        self.store.set(keys::LAST_ORDER, raw)?;

        self.cart.clear();
        self.coupon = None;
        self.store.remove(keys::COUPON)?;
        self.persist_and_render()?;
        self.emit_notification(Notification::success(format!(
            "Order {} placed",
            draft.code
        )));
        Ok(draft)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn list_mut(&mut self, list: ListKind) -> &mut Vec<CartItem> {
        match list {
            ListKind::Cart => &mut self.cart,
            ListKind::Inquiry => &mut self.inquiry,
        }
    }

    fn reject(&mut self, attempted: Mode, message: &str) -> SessionError {
        let active = self.mode();
        tracing::warn!(%attempted, %active, "rejected add, session mode is exclusive");
        self.emit_notification(Notification::error(message));
        SessionError::ModeConflict { attempted, active }
    }

    fn persist_and_render(&mut self) -> Result<(), SessionError> {
        let cart = serde_json::to_string(&self.cart).map_err(StoreError::from)?;
        let inquiry = serde_json::to_string(&self.inquiry).map_err(StoreError::from)?;
        self.store.set(keys::CART, cart)?;
        self.store.set(keys::INQUIRY_CART, inquiry)?;
        self.store
            .set(keys::CART_TIMESTAMP, self.clock.now_millis().to_string())?;
        self.emit_change();
        Ok(())
    }

    fn emit_change(&mut self) {
        let change = CartChange {
            mode: self.mode(),
            badge: self.badge(),
            sidebar: self.sidebar(),
        };
        for observer in &mut self.observers {
            observer.on_change(&change);
        }
    }

    fn emit_notification(&mut self, notification: Notification) {
        for observer in &mut self.observers {
            observer.on_notification(&notification);
        }
    }
}

/// Fall back to a placeholder name for unnamed adds.
fn named(mut item: CartItem) -> CartItem {
    if item.name.trim().is_empty() {
        item.name = "Unknown Item".to_owned();
    }
    item
}

/// Merge by identifier: an existing line's quantity grows, otherwise append.
fn merge(items: &mut Vec<CartItem>, item: CartItem) {
    if let Some(existing) = items.iter_mut().find(|line| line.id == item.id) {
        existing.quantity = existing.quantity.saturating_add(item.quantity);
    } else {
        items.push(item);
    }
}

fn expired<S: KvStore, C: Clock>(store: &S, clock: &C, config: &SessionConfig) -> bool {
    let Some(raw) = store.get(keys::CART_TIMESTAMP) else {
        return false;
    };
    let Ok(timestamp) = raw.parse::<i64>() else {
        tracing::warn!(%raw, "unreadable session timestamp, treating as fresh");
        return false;
    };
    clock.now_millis() - timestamp > config.expiry.num_milliseconds()
}

/// Decode a persisted item list, dropping lines that fail to decode or
/// normalize. Never fails; corruption degrades to an empty list.
fn decode_items(raw: Option<String>, key: &str) -> Vec<CartItem> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(key, error = %e, "corrupt item list, treating as empty");
            return Vec::new();
        }
    };
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<CartItem>(value) {
            Ok(item) => item.normalized(),
            Err(e) => {
                tracing::warn!(key, error = %e, "dropping undecodable item");
                None
            }
        })
        .collect()
}

fn decode_coupon(raw: Option<String>) -> Option<Coupon> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(coupon) => Some(coupon),
        Err(e) => {
            tracing::warn!(error = %e, "corrupt coupon, dropping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::store::MemoryStore;

    use super::*;

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0
        }
    }

    fn session() -> CartSession<MemoryStore, FixedClock> {
        CartSession::load_with_clock(
            MemoryStore::new(),
            FixedClock(1_700_000_000_000),
            SessionConfig::default(),
        )
        .expect("load")
    }

    fn item(id: &str, price: i64) -> CartItem {
        CartItem::new(id, format!("Item {id}"), Decimal::from(price))
    }

    #[test]
    fn test_add_merges_by_identifier() {
        let mut session = session();
        session.add_to_cart(item("SKU1", 99)).expect("add");
        session
            .add_to_cart(item("SKU1", 99).with_quantity(2))
            .expect("add");

        assert_eq!(session.cart_items().len(), 1);
        assert_eq!(session.cart_items().first().map(|i| i.quantity), Some(3));
    }

    #[test]
    fn test_cart_add_rejected_in_inquiry_mode() {
        let mut session = session();
        session.add_to_inquiry(item("SKU1", 0)).expect("add");

        let err = session.add_to_cart(item("SKU2", 50)).expect_err("rejected");
        assert!(matches!(
            err,
            SessionError::ModeConflict {
                attempted: Mode::Cart,
                active: Mode::Inquiry,
            }
        ));
        assert!(session.cart_items().is_empty());
        assert_eq!(session.inquiry_items().len(), 1);
    }

    #[test]
    fn test_inquiry_add_rejected_in_cart_mode() {
        let mut session = session();
        session.add_to_cart(item("SKU1", 50)).expect("add");

        assert!(session.add_to_inquiry(item("SKU2", 0)).is_err());
        assert!(session.inquiry_items().is_empty());
    }

    #[test]
    fn test_decrement_to_zero_removes_line_and_empties_mode() {
        let mut session = session();
        session.add_to_cart(item("SKU1", 50)).expect("add");

        session
            .update_quantity(ListKind::Cart, 0, -1)
            .expect("update");
        assert!(session.cart_items().is_empty());
        assert_eq!(session.mode(), Mode::None);
    }

    #[test]
    fn test_out_of_range_mutations_are_noops() {
        let mut session = session();
        session.add_to_cart(item("SKU1", 50)).expect("add");

        session
            .update_quantity(ListKind::Cart, 7, -1)
            .expect("no-op");
        session.remove_item(ListKind::Cart, 7).expect("no-op");
        assert_eq!(session.cart_items().len(), 1);
    }

    #[test]
    fn test_reset_all_clears_every_key() {
        let mut session = session();
        session.add_to_cart(item("SKU1", 50)).expect("add");
        session.apply_coupon("SAVE10").expect("coupon");

        session.reset_all().expect("reset");
        assert_eq!(session.mode(), Mode::None);
        for key in [
            keys::CART,
            keys::INQUIRY_CART,
            keys::CART_TIMESTAMP,
            keys::COUPON,
        ] {
            assert_eq!(session.store().get(key), None, "{key} should be absent");
        }
    }

    #[test]
    fn test_unknown_coupon_rejected_without_state_change() {
        let mut session = session();
        let err = session.apply_coupon("SAVE99").expect_err("unknown");
        assert!(matches!(err, SessionError::UnknownCoupon(code) if code == "SAVE99"));
        assert!(session.coupon().is_none());
    }

    #[test]
    fn test_mutation_refreshes_shared_timestamp() {
        let mut session = session();
        session.add_to_inquiry(item("SKU1", 0)).expect("add");
        assert_eq!(
            session.store().get(keys::CART_TIMESTAMP).as_deref(),
            Some("1700000000000")
        );
    }

    #[test]
    fn test_place_order_snapshots_and_clears() {
        let mut session = session();
        session
            .add_to_cart(item("SKU1", 100).with_quantity(2))
            .expect("add");
        session.apply_coupon("FLAT25").expect("coupon");

        let draft = session.place_order(ShippingMethod::Express).expect("order");
        assert_eq!(draft.summary.total, Decimal::from(190));
        assert!(session.cart_items().is_empty());
        assert!(session.coupon().is_none());
        assert!(session.store().get(keys::LAST_ORDER).is_some());
    }

    #[test]
    fn test_place_order_on_empty_cart_rejected() {
        let mut session = session();
        assert!(matches!(
            session.place_order(ShippingMethod::Free),
            Err(SessionError::EmptyCart)
        ));
    }
}
