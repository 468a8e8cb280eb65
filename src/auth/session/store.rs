//! Opaque session store boundary
//!
//! A process-wide, tab-scoped key-value store holds the bearer credential,
//! a role tag, and a serialized identity record. Login writes it, logout
//! clears it; this core only ever reads it.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Read-only view over the session key-value store.
pub trait SessionStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory session store.
///
/// The write surface exists for the login/logout boundary and for tests;
/// nothing in the access core calls it.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a key (login boundary).
    pub fn insert<K: Into<String>, V: Into<String>>(&self, key: K, value: V) {
        self.entries.write().insert(key.into(), value.into());
    }

    /// Clear every key (logout boundary).
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }
}
