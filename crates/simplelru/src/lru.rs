//! LRU (Least Recently Used) cache implementation
//!
//! Recency is encoded by a forward-moving position counter instead of a
//! linked list: touching an entry hands it the next position, and eviction
//! always takes the entry at the lowest live position.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::entry::{Arena, Entry};
use crate::error::{Error, Result};
use crate::index::{KeyIndex, OrderIndex, OrderIter};
use crate::stats::CacheStats;

/// LRU cache holding at most `capacity` entries
pub struct SimpleLru<K, V> {
    keys: KeyIndex<K>,
    order: OrderIndex,
    entries: Arena<K, V>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> SimpleLru<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(Config::new(capacity))
    }

    /// Create a new LRU cache from a [`Config`]
    pub fn with_config(config: Config) -> Result<Self> {
        if let Err(err) = config.validate() {
            warn!(capacity = config.capacity, "rejected cache config");
            return Err(err);
        }

        let reserve = config.reserve();
        Ok(Self {
            keys: KeyIndex::with_capacity(reserve),
            order: OrderIndex::with_capacity(reserve),
            entries: Arena::with_capacity(reserve),
            capacity: config.capacity,
            stats: CacheStats::new(),
        })
    }

    /// Insert or overwrite a value, marking the key most recently used
    ///
    /// Inserting a new key into a full cache evicts the least recently
    /// used entry.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(slot) = self.keys.get(&key) {
            self.touch(slot);
            if let Some(entry) = self.entries.get_mut(slot) {
                entry.value = value;
            }
            return;
        }

        let position = self.order.head();
        let slot = self.entries.insert(Entry {
            key: key.clone(),
            value,
            position,
        });
        self.order.push(slot);
        self.keys.insert(key, slot);
        self.stats.record_insert();

        self.trim();
    }

    /// Get a value, marking the key most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(slot) = self.keys.get(key) else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        self.touch(slot);
        self.entries.get(slot).map(|entry| &entry.value)
    }

    /// Get a value without changing its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.keys.get(key)?;
        self.entries.get(slot).map(|entry| &entry.value)
    }

    /// Check whether a key is cached, without changing its recency
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.keys.contains(key)
    }

    /// Remove a key, returning its value
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.keys.remove(key)?;
        self.unlink(slot).map(|entry| entry.value)
    }

    /// The entry that would be evicted next, without changing its recency
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let slot = self.order.tail_slot()?;
        self.entries
            .get(slot)
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Change the capacity, evicting the oldest entries when shrinking
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - `capacity` is zero; the cache is left as is
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            warn!(capacity, "rejected cache capacity");
            return Err(Error::InvalidCapacity(capacity));
        }

        let shrink = capacity < self.capacity;
        debug!(from = self.capacity, to = capacity, "changed cache capacity");
        self.capacity = capacity;
        if shrink {
            self.trim();
        }
        Ok(())
    }

    /// Keys from least to most recently used
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Call `f(value, key)` for every entry, least recently used first
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &K),
    {
        for (key, value) in self.iter() {
            f(value, key);
        }
    }

    /// Drop every entry and zero the statistics; capacity is kept
    pub fn reset(&mut self) {
        trace!(len = self.len(), "reset cache");
        self.keys.clear();
        self.order.reset();
        self.entries.clear();
        self.stats.reset();
    }

    fn touch(&mut self, slot: usize) {
        if let Some(entry) = self.entries.get_mut(slot) {
            entry.position = self.order.promote(entry.position);
        }
    }

    /// Take an entry out of the arena and the order index
    fn unlink(&mut self, slot: usize) -> Option<Entry<K, V>> {
        let entry = self.entries.remove(slot)?;
        self.order.release(entry.position);
        Some(entry)
    }

    /// Evict from the tail until the cache fits its capacity
    fn trim(&mut self) {
        while self.keys.len() > self.capacity {
            let Some(slot) = self.order.tail_slot() else {
                break;
            };
            let Some(entry) = self.unlink(slot) else {
                break;
            };
            self.keys.remove(&entry.key);
            self.stats.record_eviction();
            debug!(position = entry.position, "evicted least recently used entry");
        }
    }
}

impl<K, V> SimpleLru<K, V> {
    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Entries from least to most recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            order: self.order.iter(),
            entries: &self.entries,
            remaining: self.len(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SimpleLru<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleLru")
            .field("capacity", &self.capacity)
            .field("entries", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, K, V>(&'a SimpleLru<K, V>);

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for DebugEntries<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a SimpleLru<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(key, value)` pairs, least recently used first
pub struct Iter<'a, K, V> {
    order: OrderIter<'a>,
    entries: &'a Arena<K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.order.next()?;
        let entry = self.entries.get(slot)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over keys, least recently used first
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}
