//! Driven port for the durable key-value entry holding the session snapshot.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session storage adapters.
    pub enum StorageError {
        /// The stored value could not be read.
        Read { key: String, message: String } =>
            "failed to read {key}: {message}",
        /// The value could not be written.
        Write { key: String, message: String } =>
            "failed to write {key}: {message}",
        /// The value could not be removed.
        Remove { key: String, message: String } =>
            "failed to remove {key}: {message}",
        /// The key cannot be mapped onto the backing store.
        InvalidKey { key: String } =>
            "invalid storage key: {key}",
    }
}

/// Port for reading and writing raw string values by key.
///
/// Values are opaque to the adapter; the session store owns their format.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    /// Return the stored value, or `None` when the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage; also used when no session directory is configured.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemorySessionStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        storage
    }

    /// Whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
