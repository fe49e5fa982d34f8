//! Cache entries and the slot arena that owns them
//!
//! Both indices refer to an entry by its slot number, so each cached pair
//! lives in exactly one place.

/// A single cached key/value pair
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub key: K,
    pub value: V,
    /// Recency position; the key under which the order index stores this slot
    pub position: u64,
}

/// Slot arena owning every live entry
pub(crate) struct Arena<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free_list: Vec<usize>,
}

impl<K, V> Arena<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
        }
    }

    /// Store an entry, reusing a vacated slot when one is available
    pub fn insert(&mut self, entry: Entry<K, V>) -> usize {
        if let Some(slot) = self.free_list.pop() {
            self.slots[slot] = Some(entry);
            slot
        } else {
            self.slots.push(Some(entry));
            self.slots.len() - 1
        }
    }

    /// Take the entry out of its slot
    pub fn remove(&mut self, slot: usize) -> Option<Entry<K, V>> {
        let entry = self.slots.get_mut(slot)?.take()?;
        self.free_list.push(slot);
        Some(entry)
    }

    pub fn get(&self, slot: usize) -> Option<&Entry<K, V>> {
        self.slots.get(slot)?.as_ref()
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(slot)?.as_mut()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &'static str, position: u64) -> Entry<&'static str, u32> {
        Entry {
            key,
            value: 0,
            position,
        }
    }

    #[test]
    fn test_arena_reuses_slots() {
        let mut arena = Arena::with_capacity(2);

        let a = arena.insert(entry("a", 0));
        let b = arena.insert(entry("b", 1));
        assert_ne!(a, b);

        let removed = arena.remove(a).unwrap();
        assert_eq!(removed.key, "a");
        assert!(arena.get(a).is_none());

        // Freed slot is handed out again
        let c = arena.insert(entry("c", 2));
        assert_eq!(c, a);
        assert_eq!(arena.get(c).unwrap().key, "c");
    }

    #[test]
    fn test_arena_double_remove() {
        let mut arena = Arena::with_capacity(1);
        let a = arena.insert(entry("a", 0));

        assert!(arena.remove(a).is_some());
        assert!(arena.remove(a).is_none());

        // Slot must only be on the free list once
        let b = arena.insert(entry("b", 1));
        let c = arena.insert(entry("c", 2));
        assert_ne!(b, c);
    }

    #[test]
    fn test_arena_get_mut() {
        let mut arena = Arena::with_capacity(1);
        let a = arena.insert(entry("a", 0));

        arena.get_mut(a).unwrap().position = 7;
        assert_eq!(arena.get(a).unwrap().position, 7);

        arena.clear();
        assert!(arena.get(a).is_none());
    }
}
