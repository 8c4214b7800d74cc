//! Key-value cache for collaborator responses.
//!
//! Stores are owned by the surrounding application and injected into the
//! cached collaborator wrappers; nothing here is global.

use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

use rustc_hash::FxHashMap;

/// Narrow cache interface.  At most one entry per key.
pub trait KvStore<K, V>: Send + Sync {
    fn exists(&self, key: &K) -> bool;
    fn get(&self, key: &K) -> Option<V>;
    /// Insert or replace the entry for `key`.
    fn set(&self, key: K, value: V);
}

/// In-process store with no eviction.
pub struct MemoryStore<K, V> {
    inner: RwLock<FxHashMap<K, V>>,
}

impl<K, V> MemoryStore<K, V> {
    pub fn new() -> Self {
        Self { inner: RwLock::new(FxHashMap::default()) }
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl<K, V> Default for MemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KvStore<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn exists(&self, key: &K) -> bool {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).contains_key(key)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: K, value: V) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).insert(key, value);
    }
}
