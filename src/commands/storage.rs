//! Storage Commands
//!
//! Key/value persistence over `window.localStorage`, with an in-memory
//! store for tests and for browsers where local storage is unavailable.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::js_error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Local storage is unavailable")]
    Unavailable,
    #[error("Storage call failed: {0}")]
    Js(String),
    #[error("Stored value for {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Js(js_error(e)))?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| StorageError::Js(js_error(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|e| StorageError::Js(js_error(e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(|e| StorageError::Js(js_error(e)))
    }
}

/// In-memory store; clones share the same map
#[derive(Clone, Default)]
pub struct MemoryStore {
    map: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}

thread_local! {
    static SESSION: MemoryStore = MemoryStore::default();
}

/// Local storage when available, otherwise a store that lives as long as the page
pub fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("{}; keeping data for this session only", e);
            Box::new(SESSION.with(MemoryStore::clone))
        }
    }
}

/// Read and deserialize a key; `None` when the key is absent
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt { key: key.to_string(), source }),
    }
}

pub fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)
        .map_err(|source| StorageError::Serialize { key: key.to_string(), source })?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::default();
        save(&store, "k", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<i32>> = load(&store, "k").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));

        store.remove("k").unwrap();
        let missing: Option<Vec<i32>> = load(&store, "k").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_corrupt_value_reports_key() {
        let store = MemoryStore::default();
        store.set("copyai:cards", "{not json").unwrap();
        let err = load::<Vec<i32>>(&store, "copyai:cards").unwrap_err();
        match err {
            StorageError::Corrupt { key, .. } => assert_eq!(key, "copyai:cards"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_clones_share_data() {
        let a = MemoryStore::default();
        let b = a.clone();
        a.set("x", "1").unwrap();
        assert_eq!(b.get("x").unwrap().as_deref(), Some("1"));
    }
}
