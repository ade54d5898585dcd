//! Key-Value Storage
//!
//! Session stores persist through this trait so the browser's localStorage
//! can be swapped for an in-memory map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// True when localStorage is reachable (private mode may disable it)
    pub fn available() -> bool {
        Self::storage().is_some()
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("[STORAGE] failed to write {}", key);
                }
            }
            None => log::warn!("[STORAGE] localStorage unavailable, {} not saved", key),
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(key).is_err() {
                log::warn!("[STORAGE] failed to remove {}", key);
            }
        }
    }
}

/// In-memory store, used in tests and when localStorage is unavailable
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip_and_remove() {
        let store = MemoryStorage::new();
        store.set("a", "1");
        store.set("b", "2");
        assert_eq!(store.get("a").as_deref(), Some("1"));

        store.remove("a");
        assert_eq!(store.get("a"), None);
        assert_eq!(store.keys(), vec!["b".to_string()]);
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let store = MemoryStorage::new();
        let shared: SharedStore = Arc::new(store.clone());
        shared.set("token", "abc");
        assert_eq!(store.get("token").as_deref(), Some("abc"));
    }
}
