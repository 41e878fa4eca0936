//! The key-value storage capability.

use crate::StoreError;
use serde::{de::DeserializeOwned, Serialize};

/// A synchronous, string-keyed persistent map.
///
/// Any backend satisfying this contract is substitutable: an in-process map,
/// a file on disk, or a platform store wrapped behind the same surface.
/// Consumers perform whole-value reads and writes; there are no partial
/// updates at this layer.
pub trait KeyValueStore {
    /// Store a string value under a key, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read the string value for a key. Returns `None` when the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Remove the value for a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Remove every value in the store.
    fn clear(&self) -> Result<(), StoreError>;

    /// Serialize a value to JSON and store it under a key.
    fn write_structured<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let encoded = serde_json::to_string(value)?;
        self.write(key, &encoded)
    }

    /// Read and deserialize the JSON value for a key.
    ///
    /// Returns `None` when the key is absent. A present value that fails to
    /// deserialize surfaces as [`StoreError::Serialization`]; callers decide
    /// whether that is fatal.
    fn read_structured<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
    {
        match self.read(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Marker {
        label: String,
        count: u32,
    }

    #[test]
    fn test_structured_roundtrip() {
        let store = MemoryStore::new();
        let value = Marker {
            label: "checkout".to_string(),
            count: 3,
        };

        store.write_structured("marker", &value).unwrap();
        let restored: Option<Marker> = store.read_structured("marker").unwrap();

        assert_eq!(restored, Some(value));
    }

    #[test]
    fn test_structured_read_of_absent_key() {
        let store = MemoryStore::new();
        let restored: Option<Marker> = store.read_structured("missing").unwrap();
        assert_eq!(restored, None);
    }

    #[test]
    fn test_structured_read_of_malformed_value() {
        let store = MemoryStore::new();
        store.write("marker", "not json").unwrap();

        let result: Result<Option<Marker>, _> = store.read_structured("marker");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
