use std::sync::atomic::{AtomicU64, Ordering};

/// Counters accumulated since the previous call to [`crate::Cache::stats`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Stats {
    pub hit_count: u64,
    pub miss_count: u64,
    pub eviction_count: u64,
    pub millis_elapsed: u128,
}

impl Stats {
    /// Share of reads that found their key, or `None` when there were no reads.
    pub fn hit_ratio(&self) -> Option<f64> {
        let reads = self.hit_count + self.miss_count;
        if reads == 0 {
            return None;
        }
        Some(self.hit_count as f64 / reads as f64)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    eviction_count: AtomicU64,
}

impl Counters {
    pub(crate) fn increment_hit_count(&self) {
        self.hit_count.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn increment_miss_count(&self) {
        self.miss_count.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn increment_eviction_count(&self) {
        self.eviction_count.fetch_add(1, Ordering::AcqRel);
    }

    /// Reads and zeroes every counter. An increment racing with this call lands in exactly one
    /// snapshot.
    pub(crate) fn take(&self, millis_elapsed: u128) -> Stats {
        Stats {
            hit_count: self.hit_count.swap(0, Ordering::AcqRel),
            miss_count: self.miss_count.swap(0, Ordering::AcqRel),
            eviction_count: self.eviction_count.swap(0, Ordering::AcqRel),
            millis_elapsed,
        }
    }
}
