//! List mutation commands.
//!
//! Mode-conflict rejections are not command failures: the engine already
//! surfaced the rejection notice, so these return cleanly and leave the
//! exit code zero, the way the storefront keeps the page alive.

use rosebud_core::{CartItem, ListKind};
use rosebud_session::{CartSession, FileStore, SessionError};

type Session = CartSession<FileStore>;

/// Add an item to the shopping cart.
pub fn add(session: &mut Session, item: CartItem) -> Result<(), SessionError> {
    recover_rejection(session.add_to_cart(item))
}

/// Add an item to the inquiry cart.
pub fn inquire(session: &mut Session, item: CartItem) -> Result<(), SessionError> {
    recover_rejection(session.add_to_inquiry(item))
}

/// Adjust a line's quantity.
pub fn update_quantity(
    session: &mut Session,
    list: ListKind,
    index: usize,
    delta: i64,
) -> Result<(), SessionError> {
    session.update_quantity(list, index, delta)
}

/// Remove a line.
pub fn remove(session: &mut Session, list: ListKind, index: usize) -> Result<(), SessionError> {
    session.remove_item(list, index)
}

fn recover_rejection(result: Result<(), SessionError>) -> Result<(), SessionError> {
    match result {
        Err(SessionError::ModeConflict { .. }) | Ok(()) => Ok(()),
        Err(other) => Err(other),
    }
}
