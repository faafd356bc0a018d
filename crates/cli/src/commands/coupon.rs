//! Coupon commands.

use rosebud_session::{CartSession, FileStore, SessionError};

/// Apply a coupon code. Unknown codes are surfaced through the rejection
/// notice and do not fail the command.
pub fn apply(session: &mut CartSession<FileStore>, code: &str) -> Result<(), SessionError> {
    match session.apply_coupon(code) {
        Err(SessionError::UnknownCoupon(_)) | Ok(()) => Ok(()),
        Err(other) => Err(other),
    }
}

/// Remove the applied coupon.
pub fn remove(session: &mut CartSession<FileStore>) -> Result<(), SessionError> {
    session.remove_coupon()
}
