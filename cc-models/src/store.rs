//! Durable key-value store abstraction.
//!
//! The ledger never talks to a concrete backend. It persists each
//! collection as one JSON array under a fixed key through `DurableStore`,
//! which is implemented by the in-process `MemoryStore` and by the SQLite
//! `Database`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use cc_core::error::{CcError, CcResult};

/// A host-provided persistent key-value store.
///
/// `set` either stores the whole value or fails leaving the previous value
/// untouched.
pub trait DurableStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> CcResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> CcResult<()>;
}

impl<T: DurableStore + ?Sized> DurableStore for &T {
    fn get(&self, key: &str) -> CcResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> CcResult<()> {
        (**self).set(key, value)
    }
}

impl<T: DurableStore + ?Sized> DurableStore for Arc<T> {
    fn get(&self, key: &str) -> CcResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> CcResult<()> {
        (**self).set(key, value)
    }
}

/// Load the collection stored under `key`. A missing key is an empty collection.
pub fn load_collection<T, S>(store: &S, key: &str) -> CcResult<Vec<T>>
where
    T: DeserializeOwned,
    S: DurableStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw).map_err(|e| {
            warn!("stored collection under {key} is unreadable: {e}");
            CcError::Serialization(format!("collection {key}: {e}"))
        }),
        _ => Ok(Vec::new()),
    }
}

/// Serialize and store the whole collection under `key`.
pub fn save_collection<T, S>(store: &S, key: &str, items: &[T]) -> CcResult<()>
where
    T: Serialize,
    S: DurableStore + ?Sized,
{
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)?;
    debug!("persisted {} records under {key}", items.len());
    Ok(())
}

/// In-process store, optionally limited to a byte quota like browser local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes once keys plus values exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes held (keys plus values).
    pub fn used_bytes(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.iter().map(|(k, v)| k.len() + v.len()).sum())
            .unwrap_or(0)
    }

    /// Copy of everything stored, for inspection and reloading elsewhere.
    pub fn snapshot(&self) -> CcResult<HashMap<String, String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CcError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.clone())
    }

    /// Build a store pre-filled with the given entries.
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self {
            entries: RwLock::new(entries),
            quota_bytes: None,
        }
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> CcResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CcError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CcResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CcError::Storage("memory store lock poisoned".into()))?;

        if let Some(quota) = self.quota_bytes {
            let current: usize = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
            let replaced = entries.get(key).map_or(0, |old| key.len() + old.len());
            let projected = current - replaced + key.len() + value.len();
            if projected > quota {
                return Err(CcError::Storage(format!(
                    "quota exceeded writing {key}: {projected} bytes > {quota} bytes"
                )));
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_empty_collection() {
        let store = MemoryStore::new();
        let items: Vec<u32> = load_collection(&store, "nothing").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_collection_roundtrip() {
        let store = MemoryStore::new();
        save_collection(&store, "numbers", &[1u32, 2, 3]).unwrap();
        assert_eq!(store.get("numbers").unwrap().as_deref(), Some("[1,2,3]"));
        let back: Vec<u32> = load_collection(&store, "numbers").unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn test_unreadable_collection_is_serialization_error() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").unwrap();
        let err = load_collection::<u32, _>(&store, "numbers").unwrap_err();
        assert!(matches!(err, CcError::Serialization(_)));
    }

    #[test]
    fn test_quota_rejects_and_keeps_previous_value() {
        let store = MemoryStore::with_quota(16);
        store.set("k", "small").unwrap();
        let err = store.set("k", "this value is far too large").unwrap_err();
        assert!(matches!(err, CcError::Storage(_)));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn test_overwrite_within_quota_counts_replacement() {
        let store = MemoryStore::with_quota(10);
        store.set("k", "123456789").unwrap();
        store.set("k", "987654321").unwrap();
        assert_eq!(store.used_bytes(), 10);
    }

    #[test]
    fn test_shared_store_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let writer = Arc::clone(&store);
        writer.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
