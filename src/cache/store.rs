use crate::cache::RandomState;
use crate::cache::ring_buffer::RingBuffer;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

#[derive(Debug)]
struct Slot<V> {
    value: V,
    position: u64,
}

/// What a call to [Store::insert] did to the store.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outcome<K, V> {
    Inserted,
    Updated,
    /// The key was new and the store was full. The oldest entry was evicted to make room.
    Evicted(K, V),
}

/// Key/value entries plus the order in which their keys were last written.
///
/// The store is not synchronized. The cache keeps it behind a single lock so that `entries` and
/// `order` are always observed together.
///
/// `capacity` is an upper bound, nothing is allocated for it up front.
#[derive(Debug)]
pub(crate) struct Store<K, V, S = RandomState> {
    capacity: usize,
    entries: HashMap<K, Slot<V>, S>,
    order: RingBuffer<K>,
}

impl<K, V, S> Store<K, V, S> {
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            capacity,
            entries: HashMap::with_hasher(hash_builder),
            order: RingBuffer::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V, S> Store<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    /// Inserts or overwrites `key`. Either way the key becomes the newest one.
    ///
    /// Evicts at most one key, and only when `key` is new and the store is full.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Outcome<K, V> {
        if let Some(slot) = self.entries.get_mut(&key) {
            slot.value = value;
            let previous_position = slot.position;

            let resident_key = self
                .order
                .remove(previous_position)
                .expect("a resident key must be present at its recorded position");
            let position = self.push_order(resident_key);

            self.entries
                .get_mut(&key)
                .expect("the updated key is still resident")
                .position = position;

            return Outcome::Updated;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        let position = self.push_order(key.clone());
        self.entries.insert(key, Slot { value, position });

        match evicted {
            Some((evicted_key, evicted_value)) => Outcome::Evicted(evicted_key, evicted_value),
            None => Outcome::Inserted,
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get(key).map(|slot| &slot.value)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.contains_key(key)
    }

    fn evict_oldest(&mut self) -> Option<(K, V)> {
        let oldest = self.order.pop_front()?;
        let slot = self
            .entries
            .remove(&oldest)
            .expect("the oldest key in the order must be resident");
        Some((oldest, slot.value))
    }

    /// Compacts only once holes outnumber keys, so re-pointing every key is paid for by at
    /// least as many preceding updates.
    fn push_order(&mut self, key: K) -> u64 {
        if self.order.needs_compaction() {
            self.compact_order();
        }

        self.order.push_back(key)
    }

    fn compact_order(&mut self) {
        self.order.compact();

        for (position, key) in self.order.iter() {
            if let Some(slot) = self.entries.get_mut(key) {
                slot.position = position;
            }
        }
    }

    /// Returns `true` when `entries` and `order` hold exactly the same keys and every recorded
    /// position points at its key.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        if self.entries.len() != self.order.live_len() || self.entries.len() > self.capacity {
            return false;
        }

        // holes never outnumber keys by more than the one left by the latest update
        if self.order.slot_count() > 2 * self.entries.len() + 1 {
            return false;
        }

        self.order.iter().all(|(position, key)| {
            self.entries
                .get(key)
                .is_some_and(|slot| slot.position == position)
        })
    }

    /// Keys from oldest to newest.
    #[cfg(test)]
    pub(crate) fn keys_in_order(&self) -> Vec<K> {
        self.order.iter().map(|(_, key)| key.clone()).collect()
    }
}
