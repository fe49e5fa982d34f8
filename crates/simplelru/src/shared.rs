//! SharedLru: a lockable handle for callers that share one cache

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::config::Config;
use crate::error::Result;
use crate::lru::SimpleLru;

/// Cloneable handle serializing access to a [`SimpleLru`]
///
/// Every call takes the lock for its own duration. Reads hand back clones
/// so no borrow outlives the lock.
pub struct SharedLru<K, V> {
    inner: Arc<Mutex<SimpleLru<K, V>>>,
}

impl<K, V> Clone for SharedLru<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedLru<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a shared cache with the given capacity
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(Config::new(capacity))
    }

    /// Create a shared cache from a [`Config`]
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self::from(SimpleLru::with_config(config)?))
    }

    /// Insert or overwrite a value
    pub fn set(&self, key: K, value: V) {
        self.inner.lock().set(key, value);
    }

    /// Get a copy of a value, marking the key most recently used
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Get a copy of a value without changing its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Check whether a key is cached
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().has(key)
    }

    /// Remove a key, returning its value
    pub fn delete<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().delete(key)
    }

    /// Snapshot of the keys, least recently used first
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys().cloned().collect()
    }

    /// Change the capacity
    pub fn set_capacity(&self, capacity: usize) -> Result<()> {
        self.inner.lock().set_capacity(capacity)
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Clear the cache
    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Lock the cache for a sequence of operations
    ///
    /// Useful for `each`, `iter` or stats reads that must see one state.
    pub fn lock(&self) -> MutexGuard<'_, SimpleLru<K, V>> {
        self.inner.lock()
    }
}

impl<K, V> From<SimpleLru<K, V>> for SharedLru<K, V> {
    fn from(cache: SimpleLru<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_shared_basic() {
        let cache = SharedLru::new(2).unwrap();
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);

        assert_eq!(cache.get("a"), Some(1));
        cache.set("c".to_string(), 3); // Evicts b

        assert_eq!(cache.peek("b"), None);
        assert!(cache.has("c"));
        assert_eq!(cache.keys(), vec!["a".to_string(), "c".to_string()]);
        assert_eq!(cache.delete("a"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_shared_capacity() {
        let cache = SharedLru::new(3).unwrap();
        for i in 0..3u32 {
            cache.set(i, i * 10);
        }

        assert!(cache.set_capacity(0).is_err());
        cache.set_capacity(1).unwrap();
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.keys(), vec![2]);

        cache.reset();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = SharedLru::new(64).unwrap();

        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..100u32 {
                        cache.set(t * 1000 + i, i);
                        cache.get(&(t * 1000 + i / 2));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let guard = cache.lock();
        assert_eq!(guard.len(), 64);
        assert_eq!(guard.stats().inserts(), 400);
        assert_eq!(guard.stats().evictions(), 336);
    }
}
