use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A minimal string key-value store.
///
/// The redirect memory below is written against this trait rather than any
/// ambient storage, so callers choose the backing and the scope.
pub trait KeyValueStore: Send + Sync {
    /// Gets the value for a key, if present.
    fn get(&self, key: &str) -> Option<String>;
    /// Sets the value for a key, replacing any previous value.
    fn set(&self, key: &str, value: String);
    /// Deletes a key.
    fn delete(&self, key: &str);
}

/// An in-process `KeyValueStore` backed by a locked map.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates a new empty `MemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value);
    }

    fn delete(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
    }
}

/// Remembers a single pending post-login destination.
///
/// Contract: one slot under a fixed key; `take` always clears the slot and
/// falls back to `/` when it is empty. Setting again overwrites the slot.
#[derive(Clone)]
pub struct RedirectMemory {
    store: Arc<dyn KeyValueStore>,
}

/// The fixed key of the redirect slot.
const REDIRECT_SLOT: &str = "redirect_after_login";
/// Destination returned when no redirect is pending.
const DEFAULT_DESTINATION: &str = "/";

impl RedirectMemory {
    /// Creates a `RedirectMemory` over the given store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Records `path` as the pending post-login destination.
    pub fn remember(&self, path: &str) {
        self.store.set(REDIRECT_SLOT, path.to_string());
    }

    /// Returns the pending destination and clears the slot.
    pub fn take(&self) -> String {
        let destination = self.store.get(REDIRECT_SLOT);
        self.store.delete(REDIRECT_SLOT);
        destination.unwrap_or_else(|| DEFAULT_DESTINATION.to_string())
    }
}

impl Default for RedirectMemory {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
