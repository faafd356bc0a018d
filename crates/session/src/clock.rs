//! Time source for expiry checks and the shared mutation timestamp.

use chrono::Utc;

/// Source of the current time in epoch milliseconds.
///
/// Injected into [`crate::CartSession`] so tests can age a persisted
/// timestamp without sleeping.
pub trait Clock {
    /// Current time as epoch milliseconds.
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
