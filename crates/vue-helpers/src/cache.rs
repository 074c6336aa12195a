//! Process-wide store of compiled bundles awaiting their callback request.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use rand::Rng;
use std::sync::Arc;

/// Length of a generated key: 32 random bytes, base64 without padding.
pub const KEY_LEN: usize = 43;

static GLOBAL: Lazy<CacheStore> = Lazy::new(CacheStore::new);

/// Bundles keyed by a random URL-safe token.
///
/// Each entry is delivered at most once: [`take`](Self::take) removes it.
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct CacheStore {
    entries: Arc<DashMap<String, String>>,
}

impl CacheStore {
    /// Create an empty, private store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The store shared by the whole process.
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Store `js` under a fresh key and return the key.
    pub fn insert(&self, js: impl Into<String>) -> String {
        let key = generate_key();
        self.entries.insert(key.clone(), js.into());
        tracing::debug!(key = %key, "bundle cached");
        key
    }

    /// Store `js` under a caller-chosen key.
    pub fn insert_with_key(&self, key: impl Into<String>, js: impl Into<String>) {
        self.entries.insert(key.into(), js.into());
    }

    /// Remove and return the bundle stored under `key`.
    pub fn take(&self, key: &str) -> Option<String> {
        let taken = self.entries.remove(key).map(|(_, js)| js);
        tracing::debug!(key, hit = taken.is_some(), "bundle requested");
        taken
    }

    /// Check for a key without consuming it.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys currently waiting to be served.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generate a random URL-safe key.
pub fn generate_key() -> String {
    let mut rng = rand::rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.random()).collect();
    URL_SAFE_NO_PAD.encode(bytes)
}
