//! End-to-end session scenarios over an in-memory store.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rosebud_core::{CartItem, ListKind, Mode};
use rosebud_session::store::keys;
use rosebud_session::{
    CartChange, CartObserver, CartSession, Clock, KvStore, MemoryStore, Notification,
    NotificationKind, SessionConfig,
};
use rust_decimal::Decimal;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

const NOW: i64 = 1_700_000_000_000;
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Default)]
struct Recorded {
    changes: Vec<CartChange>,
    notifications: Vec<Notification>,
}

/// Test double standing in for the page-level renderer.
#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Recorded>>);

impl CartObserver for Recorder {
    fn on_change(&mut self, change: &CartChange) {
        self.0.borrow_mut().changes.push(change.clone());
    }

    fn on_notification(&mut self, notification: &Notification) {
        self.0.borrow_mut().notifications.push(notification.clone());
    }
}

fn load(store: MemoryStore) -> CartSession<MemoryStore, FixedClock> {
    CartSession::load_with_clock(store, FixedClock(NOW), SessionConfig::default()).expect("load")
}

fn item(id: &str, price: i64, quantity: u32) -> CartItem {
    CartItem::new(id, format!("Item {id}"), Decimal::from(price)).with_quantity(quantity)
}

#[test]
fn repeated_adds_merge_into_summed_quantity() {
    let mut session = load(MemoryStore::new());
    session.add_to_cart(item("SKU1", 99, 1)).expect("add");
    session.add_to_cart(item("SKU1", 99, 2)).expect("add");

    let lines = session.cart_items();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().map(|line| line.quantity), Some(3));
}

#[test]
fn inquiry_mode_blocks_cart_adds_and_leaves_both_lists_unchanged() {
    let mut session = load(MemoryStore::new());
    session.add_to_inquiry(item("SKU1", 0, 1)).expect("add");

    assert!(session.add_to_cart(item("SKU2", 50, 1)).is_err());
    assert!(session.cart_items().is_empty());
    assert_eq!(session.inquiry_items().len(), 1);
    assert_eq!(session.mode(), Mode::Inquiry);
}

#[test]
fn rejection_emits_error_notification_and_no_change_event() {
    let recorder = Recorder::default();
    let mut session = load(MemoryStore::new());
    session.add_to_inquiry(item("SKU1", 0, 1)).expect("add");
    session.subscribe(Box::new(recorder.clone()));

    assert!(session.add_to_cart(item("SKU2", 50, 1)).is_err());

    let recorded = recorder.0.borrow();
    assert!(recorded.changes.is_empty());
    assert_eq!(recorded.notifications.len(), 1);
    let note = recorded.notifications.first().expect("one notification");
    assert_eq!(note.kind, NotificationKind::Error);
    assert_eq!(note.ttl, Duration::from_secs(3));
}

#[test]
fn every_mutation_redraws_badge_and_sidebar() {
    let recorder = Recorder::default();
    let mut session = load(MemoryStore::new());
    session.subscribe(Box::new(recorder.clone()));

    session.add_to_cart(item("SKU1", 120, 2)).expect("add");
    session
        .update_quantity(ListKind::Cart, 0, 1)
        .expect("update");

    let recorded = recorder.0.borrow();
    assert_eq!(recorded.changes.len(), 2);
    let last = recorded.changes.last().expect("change");
    assert_eq!(last.badge.count, 3);
    assert_eq!(last.sidebar.header, "Shopping Cart");
    assert_eq!(last.sidebar.total.as_deref(), Some("$360.00"));
}

#[test]
fn zeroing_the_last_line_returns_the_session_to_empty() {
    let mut session = load(MemoryStore::new());
    session.add_to_cart(item("SKU1", 50, 1)).expect("add");

    session
        .update_quantity(ListKind::Cart, 0, -1)
        .expect("update");
    assert!(session.cart_items().is_empty());
    assert_eq!(session.mode(), Mode::None);
    // With the cart empty again, inquiry adds are allowed.
    assert!(session.can_add_to_inquiry());
}

#[test]
fn session_older_than_expiry_is_cleared_on_load() {
    let mut store = MemoryStore::new();
    {
        let mut session = load(store.clone());
        session.add_to_cart(item("SKU1", 50, 1)).expect("add");
        session.apply_coupon("SAVE10").expect("coupon");
        store = session.store().clone();
    }

    let six_days_later = FixedClock(NOW + 6 * DAY_MS);
    let session =
        CartSession::load_with_clock(store, six_days_later, SessionConfig::default())
            .expect("load");

    assert!(session.cart_items().is_empty());
    assert!(session.coupon().is_none());
    for key in [
        keys::CART,
        keys::INQUIRY_CART,
        keys::CART_TIMESTAMP,
        keys::COUPON,
    ] {
        assert_eq!(session.store().get(key), None, "{key} should be cleared");
    }
}

#[test]
fn fresh_session_survives_reload_untouched() {
    let mut store = MemoryStore::new();
    {
        let mut session = load(store.clone());
        session.add_to_cart(item("SKU1", 50, 2)).expect("add");
        store = session.store().clone();
    }
    let persisted_cart = store.get(keys::CART);

    let four_days_later = FixedClock(NOW + 4 * DAY_MS);
    let session =
        CartSession::load_with_clock(store, four_days_later, SessionConfig::default())
            .expect("load");

    assert_eq!(session.cart_items().len(), 1);
    assert_eq!(session.store().get(keys::CART), persisted_cart);
}

#[test]
fn first_visit_without_timestamp_never_expires() {
    let session = load(MemoryStore::new());
    assert_eq!(session.mode(), Mode::None);
    assert!(session.store().get(keys::CART_TIMESTAMP).is_none());
}

#[test]
fn malformed_persisted_lists_degrade_to_empty() {
    let mut store = MemoryStore::new();
    store
        .set(keys::CART, "not json at all".to_owned())
        .expect("set");
    store
        .set(
            keys::INQUIRY_CART,
            r#"[{"sku":"RB-1","name":"Vase"},{"bogus":true}]"#.to_owned(),
        )
        .expect("set");

    let session = load(store);
    assert!(session.cart_items().is_empty());
    // The decodable line survives; the undecodable one is dropped.
    assert_eq!(session.inquiry_items().len(), 1);
}

#[test]
fn badge_counts_quantities_across_both_lists() {
    // Populate the two lists through separate sessions; a single session
    // never holds both.
    let mut store = MemoryStore::new();
    {
        let mut session = load(store.clone());
        session.add_to_cart(item("SKU1", 10, 2)).expect("add");
        store = session.store().clone();
    }
    {
        let mut session = load(store.clone());
        session.clear_cart().expect("clear");
        session.add_to_inquiry(item("SKU2", 0, 3)).expect("add");
        store = session.store().clone();
    }

    let session = load(store);
    assert_eq!(session.badge().count, 3);
    assert!(session.badge().visible);
}

#[test]
fn reset_all_leaves_no_session_keys_behind() {
    let mut session = load(MemoryStore::new());
    session.add_to_cart(item("SKU1", 10, 1)).expect("add");
    session.apply_coupon("FLAT25").expect("coupon");

    session.reset_all().expect("reset");
    assert_eq!(session.mode(), Mode::None);
    assert!(session.store().get(keys::CART).is_none());
    assert!(session.store().get(keys::CART_TIMESTAMP).is_none());
    assert!(session.store().get(keys::COUPON).is_none());
}
