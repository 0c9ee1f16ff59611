//! Durable key/value storage abstraction.
//!
//! The store persists one JSON snapshot under [`QUOTES_KEY`] and the theme
//! preference under [`THEME_KEY`], the same layout a browser's local storage
//! would hold. Backends implement [`Storage`]; this crate ships only the
//! in-memory one.

use std::collections::BTreeMap;

use thiserror::Error;

/// Key holding the JSON array of quotes.
pub const QUOTES_KEY: &str = "billingQuotes";

/// Key holding the theme preference (`"dark"` / `"light"`).
pub const THEME_KEY: &str = "theme";

/// Key receiving a verbatim copy of an unreadable quotes snapshot.
pub const CORRUPT_QUOTES_KEY: &str = "billingQuotes.corrupt";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium refused the write for lack of space.
    #[error("storage quota exceeded while writing `{key}`")]
    QuotaExceeded {
        /// Key being written.
        key: String,
    },

    /// Any other backend failure.
    #[error("storage backend failed on `{key}`: {message}")]
    Backend {
        /// Key being accessed.
        key: String,
        /// Backend-specific description.
        message: String,
    },

    /// The snapshot could not be serialized.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key/value store with whole-value reads and writes.
pub trait Storage {
    /// Read the value under `key`; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage with an optional byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once keys and values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota_bytes: Some(bytes),
        }
    }

    /// Bytes currently used by keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Change the quota; `None` removes it.
    pub fn set_quota(&mut self, bytes: Option<usize>) {
        self.quota_bytes = bytes;
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
            let after = self.used_bytes() - replaced + key.len() + value.len();
            if after > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}
