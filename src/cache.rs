use crate::{ConfigurationError, Stats};
use parking_lot::{Mutex, RwLock};
use stats::Counters;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::num::NonZero;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use store::{Outcome, Store};
use tracing::{debug, trace, warn};

mod ring_buffer;
pub(crate) mod stats;
mod store;


pub(crate) type RandomState = ahash::RandomState;

/// Bounded, thread-safe cache with first-in-first-out eviction.
///
/// Once the cache holds `capacity` keys, writing a new key evicts the key that was written the
/// longest time ago. Overwriting a key counts as writing it again, so it moves to the back of the
/// line. Reads never change the eviction order.
///
/// The entries and their write order live behind one reader/writer lock. Any number of readers
/// may look up keys at the same time, while a write excludes every other reader and writer.
///
/// Wrap the cache in a [`std::sync::Arc`] to share it between threads. Both reads and writes only
/// require shared references to the cache.
#[derive(Debug)]
pub struct Cache<K, V, S = RandomState> {
    capacity: NonZero<usize>,
    store: RwLock<Store<K, V, S>>,
    counters: Counters,
    metrics_last_accessed: Mutex<Instant>,
}

impl<K, V> Cache<K, V, RandomState>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Returns [`ConfigurationError::ZeroCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Cache<K, V, RandomState>, ConfigurationError> {
        Cache::with_capacity_and_hasher(capacity, Default::default())
    }

    /// Like [`Cache::with_capacity`], but accepts a signed capacity.
    ///
    /// Negative values, and values that do not fit into `usize`, are rejected with
    /// [`ConfigurationError::CapacityOutOfRange`].
    pub fn try_with_capacity(capacity: i64) -> Result<Cache<K, V, RandomState>, ConfigurationError> {
        let capacity = usize::try_from(capacity)
            .map_err(|_| ConfigurationError::CapacityOutOfRange(capacity))?;
        Cache::with_capacity(capacity)
    }
}

impl<K, V, S> Cache<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher,
{
    /// Creates an empty cache holding at most `capacity` entries, using `hash_builder` to hash
    /// the keys.
    pub fn with_capacity_and_hasher(
        capacity: usize,
        hash_builder: S,
    ) -> Result<Cache<K, V, S>, ConfigurationError> {
        let capacity = NonZero::new(capacity).ok_or(ConfigurationError::ZeroCapacity)?;

        debug!(capacity = capacity.get(), "creating fifo cache");

        Ok(Self {
            capacity,
            store: RwLock::new(Store::with_capacity_and_hasher(
                capacity.get(),
                hash_builder,
            )),
            counters: Counters::default(),
            metrics_last_accessed: Mutex::new(Instant::now()),
        })
    }

    /// Adds `value` under `key`, or replaces the value if `key` is already present.
    ///
    /// Either way `key` becomes the most recently written key. When `key` is new and the cache is
    /// full, the least recently written key is evicted first. Overwriting never evicts.
    pub fn add_or_update(&self, key: K, value: V) {
        let outcome = {
            let mut store = self.store.write();
            store.insert(key, value)
        };

        if let Outcome::Evicted(key, value) = outcome {
            self.counters.increment_eviction_count();
            trace!(capacity = self.capacity.get(), "evicted oldest entry");
            // dropped outside of the write lock
            drop((key, value));
        }
    }

    /// Returns a clone of the value stored under `key`, or [`None`] on a miss.
    ///
    /// Looking up a key does not change when it will be evicted.
    ///
    /// A panic raised while looking up or cloning (for example from a faulty [`Hash`]
    /// implementation) is reported as a miss. The lock is released either way.
    pub fn try_get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let lookup = {
            let store = self.store.read();
            panic::catch_unwind(AssertUnwindSafe(|| store.get(key).cloned()))
        };

        match lookup {
            Ok(Some(value)) => {
                self.counters.increment_hit_count();
                Some(value)
            }
            Ok(None) => {
                self.counters.increment_miss_count();
                None
            }
            Err(_) => {
                warn!("cache lookup panicked, reporting a miss");
                self.counters.increment_miss_count();
                None
            }
        }
    }

    /// Returns `true` if `key` is present. Does not count as a hit or a miss.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.store.read().contains_key(key)
    }

    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        self.store.read().is_consistent()
    }
}

impl<K, V, S> Cache<K, V, S> {
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the hit, miss and eviction counts since the previous call and resets them.
    pub fn stats(&self) -> Stats {
        let millis_elapsed = {
            let mut guard = self.metrics_last_accessed.lock();
            let millis_elapsed = guard.elapsed().as_millis();
            *guard = Instant::now();
            millis_elapsed
        };

        self.counters.take(millis_elapsed)
    }
}
