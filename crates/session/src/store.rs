//! Key-value persistence for session state.
//!
//! The engine reads and writes a handful of well-known keys (see [`keys`])
//! through the [`KvStore`] trait, so tests substitute [`MemoryStore`] for
//! the file-backed store the CLI uses. Values are UTF-8 text; structured
//! values are JSON.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Persisted key layout.
///
/// Key names match the web storefront's local storage so a session can
/// pick up state written by the browser client.
pub mod keys {
    /// JSON array of shopping-cart items.
    pub const CART: &str = "cart";

    /// JSON array of inquiry-cart items.
    pub const INQUIRY_CART: &str = "inquiryCart";

    /// String-encoded epoch milliseconds of the last mutation to either list.
    pub const CART_TIMESTAMP: &str = "cartTimestamp";

    /// JSON-encoded applied coupon.
    pub const COUPON: &str = "coupon";

    /// JSON-encoded draft of the most recently placed order.
    pub const LAST_ORDER: &str = "lastOrder";
}

/// Errors from store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the store contents failed.
    #[error("store encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal get/set/remove interface over persisted session state.
pub trait KvStore {
    /// Read the value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any existing value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete `key`. Deleting an absent key is a no-op.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file, written through on every
/// mutation.
///
/// A corrupt file is recovered by starting from an empty map; only I/O
/// failures propagate.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open a store at `path`, loading existing entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "corrupt store file, starting empty");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
