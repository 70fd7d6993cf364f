//! Storage backends for the session store.
//!
//! The session store does not touch disk (or anything else) directly: it goes
//! through the [`StorageBackend`] capability, injected at construction. Two
//! backends ship here: [`MemoryBackend`] for tests and ephemeral runs, and
//! [`FileBackend`] for durable local storage.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

pub mod file;

pub use file::FileBackend;

/// Errors that can occur in a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record failed to serialize.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A durable string key-value store.
///
/// Values are opaque to the backend; the session store owns serialization.
/// Semantics are replace-whole-value: `set` overwrites, `get` returns the
/// last written value, `remove` is idempotent.
pub trait StorageBackend: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend is unreadable. A missing key is
    /// `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the removal fails for a reason other than
    /// the key being absent.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        assert!(backend.get("k").unwrap().is_none());

        backend.set("k", "v1").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v1"));

        backend.set("k", "v2").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_memory_backend_remove_is_idempotent() {
        let backend = MemoryBackend::new();
        backend.set("k", "v").unwrap();
        backend.remove("k").unwrap();
        backend.remove("k").unwrap();
        assert!(backend.get("k").unwrap().is_none());
    }
}
