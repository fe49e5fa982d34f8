//! Key and recency indices
//!
//! - **KeyIndex**: key -> arena slot, for O(1) lookups
//! - **OrderIndex**: recency position -> arena slot, plus the `head`/`tail`
//!   counters bracketing every live position
//!
//! Positions come from a counter that only moves forward. Promoting an entry
//! vacates its old position and takes `head`, so the oldest live entry is
//! always the one at `tail` and the newest is at `head - 1`. Vacated
//! positions are skipped by short scans when `head` or `tail` lands on one.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use tracing::trace;

/// Map from key to the slot holding its entry
pub(crate) struct KeyIndex<K> {
    map: HashMap<K, usize, RandomState>,
}

impl<K: Hash + Eq> KeyIndex<K> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn insert(&mut self, key: K, slot: usize) {
        self.map.insert(key, slot);
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// Sparse map from recency position to slot
///
/// Invariant: every stored position `p` satisfies `tail <= p < head`, and
/// when the index is non-empty both `tail` and `head - 1` are occupied.
pub(crate) struct OrderIndex {
    slots: HashMap<u64, usize, RandomState>,
    /// Position handed to the next inserted or promoted entry
    head: u64,
    /// Lowest occupied position
    tail: u64,
}

impl OrderIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            head: 0,
            tail: 0,
        }
    }

    /// Place a slot at the most-recently-used end, returning its position
    pub fn push(&mut self, slot: usize) -> u64 {
        let position = self.head;
        self.slots.insert(position, slot);
        self.head += 1;
        position
    }

    /// Move the slot at `position` to the most-recently-used end
    ///
    /// Returns the slot's new position; already-newest slots keep theirs.
    pub fn promote(&mut self, position: u64) -> u64 {
        if self.is_newest(position) {
            return position;
        }
        let Some(slot) = self.slots.remove(&position) else {
            return position;
        };

        let was_tail = position == self.tail;
        let promoted = self.push(slot);
        if was_tail {
            self.shift();
        }
        trace!(from = position, to = promoted, "promoted entry");
        promoted
    }

    /// Vacate `position`, repairing `head`/`tail` if it sat on either end
    pub fn release(&mut self, position: u64) -> Option<usize> {
        let slot = self.slots.remove(&position)?;

        if self.slots.is_empty() {
            // Canonical empty state
            self.head = 0;
            self.tail = 0;
        } else {
            if self.is_newest(position) {
                self.pop();
            }
            if position == self.tail {
                self.shift();
            }
        }
        Some(slot)
    }

    /// Slot of the least-recently-used entry
    pub fn tail_slot(&self) -> Option<usize> {
        self.slots.get(&self.tail).copied()
    }

    pub fn is_newest(&self, position: u64) -> bool {
        position + 1 == self.head
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn head(&self) -> u64 {
        self.head
    }

    #[cfg(test)]
    pub fn tail(&self) -> u64 {
        self.tail
    }

    pub fn reset(&mut self) {
        self.slots.clear();
        self.head = 0;
        self.tail = 0;
    }

    /// Occupied slots from oldest to newest
    pub fn iter(&self) -> OrderIter<'_> {
        OrderIter {
            slots: &self.slots,
            next: self.tail,
            end: self.head,
        }
    }

    /// Advance `tail` to the next occupied position
    fn shift(&mut self) {
        let from = self.tail;
        if let Some(position) = (self.tail..self.head).find(|p| self.slots.contains_key(p)) {
            self.tail = position;
        }
        trace!(from, to = self.tail, "advanced tail");
    }

    /// Retract `head` to one past the highest occupied position
    fn pop(&mut self) {
        let from = self.head;
        if let Some(position) = (self.tail..self.head)
            .rev()
            .find(|p| self.slots.contains_key(p))
        {
            self.head = position + 1;
        }
        trace!(from, to = self.head, "retracted head");
    }
}

/// Iterator over occupied order slots, oldest first
pub(crate) struct OrderIter<'a> {
    slots: &'a HashMap<u64, usize, RandomState>,
    next: u64,
    end: u64,
}

impl Iterator for OrderIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.next < self.end {
            let position = self.next;
            self.next += 1;
            if let Some(&slot) = self.slots.get(&position) {
                return Some(slot);
            }
        }
        None
    }
}
