//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::{KeyValueStore, StoreError};

/// Session-scoped backend: an in-process map with no durability.
///
/// Contents last as long as the value does. This is the backend used in
/// tests and anywhere cart state should not outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|map| map.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.lock()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        store.write("key", "value").unwrap();
        assert_eq!(store.read("key").unwrap(), Some("value".to_string()));
    }

    #[test]
    fn test_read_absent_key() {
        let store = MemoryStore::new();
        assert_eq!(store.read("missing").unwrap(), None);
    }

    #[test]
    fn test_write_replaces_previous_value() {
        let store = MemoryStore::new();
        store.write("key", "first").unwrap();
        store.write("key", "second").unwrap();
        assert_eq!(store.read("key").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();
        store.write("key", "value").unwrap();
        store.remove("key").unwrap();
        assert_eq!(store.read("key").unwrap(), None);
    }

    #[test]
    fn test_remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("missing").is_ok());
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        store.write("a", "1").unwrap();
        store.write("b", "2").unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
