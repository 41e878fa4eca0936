//! File-backed storage backend.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::{KeyValueStore, StoreError};

/// Durable backend: one JSON file holding the whole key-value map.
///
/// Every mutation rewrites the file in full. Cart payloads are small, so the
/// map is also kept in memory and the file is never re-read after open.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store backed by the file at `path`.
    ///
    /// A missing file is an empty store; the file is created on first write.
    /// A file that exists but does not parse as a JSON map makes the store
    /// unusable and fails the open.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                StoreError::Unavailable(format!("backing file is not a JSON map: {e}"))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::Unavailable(e.to_string())),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("file store lock poisoned".to_string()))
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(entries)?;
        fs::write(&self.path, encoded).map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        entries.remove(key);
        self.persist(&entries)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        entries.clear();
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).unwrap();
        assert_eq!(store.read("anything").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.write("key", "value").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.read("key").unwrap(), Some("value".to_string()));
    }

    #[test]
    fn test_remove_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.write("key", "value").unwrap();
        store.remove("key").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.read("key").unwrap(), None);
    }

    #[test]
    fn test_clear_empties_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.write("a", "1").unwrap();
        store.write("b", "2").unwrap();
        store.clear().unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.read("a").unwrap(), None);
        assert_eq!(reopened.read("b").unwrap(), None);
    }

    #[test]
    fn test_open_rejects_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not a json map").unwrap();

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
