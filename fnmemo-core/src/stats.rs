//! Hit/miss counters and the `cache_info()` snapshot.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Which bounded replacement policy a wrapper is using, or that it
/// isn't bounded at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Plain,
    StatsOnly,
    Fifo,
    Lru,
    Lfu,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Plain => "plain",
            Algorithm::StatsOnly => "stats_only",
            Algorithm::Fifo => "fifo",
            Algorithm::Lru => "lru",
            Algorithm::Lfu => "lfu",
        };
        f.write_str(name)
    }
}

/// Lock-free hit/miss counters, incremented from inside the wrapper's
/// critical sections.
///
/// ```
/// use fnmemo_core::stats::CacheStats;
///
/// let stats = CacheStats::new();
/// stats.record_hit();
/// stats.record_hit();
/// stats.record_miss();
/// assert_eq!(stats.hits(), 2);
/// assert_eq!(stats.misses(), 1);
/// assert_eq!(stats.total_accesses(), 3);
/// ```
#[derive(Debug)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    pub fn new() -> Self {
        CacheStats {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn total_accesses(&self) -> u64 {
        self.hits() + self.misses()
    }

    /// Returns `0.0` when there have been no accesses yet, rather than
    /// dividing by zero.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }

    pub fn miss_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.misses() as f64 / total as f64
        }
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl Default for CacheStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CacheStats {
    fn clone(&self) -> Self {
        CacheStats {
            hits: AtomicU64::new(self.hits()),
            misses: AtomicU64::new(self.misses()),
        }
    }
}

/// A point-in-time snapshot of a wrapper's configuration and counters,
/// returned by `cache_info()`. Mirrors the nine fields of the original
/// `CacheInfo` namedtuple.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheInfo {
    pub hits: u64,
    pub misses: u64,
    pub current_size: usize,
    pub max_size: Option<usize>,
    pub algorithm: Algorithm,
    pub ttl: Option<Duration>,
    pub thread_safe: bool,
    pub order_independent: bool,
    pub use_custom_key: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn fresh_stats_are_zero() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn reset_clears_counters() {
        let stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.reset();
        assert_eq!(stats.total_accesses(), 0);
    }

    #[test]
    fn clone_snapshots_independently() {
        let stats = CacheStats::new();
        stats.record_hit();
        let snapshot = stats.clone();
        stats.record_hit();
        assert_eq!(snapshot.hits(), 1);
        assert_eq!(stats.hits(), 2);
    }

    #[test]
    fn concurrent_recording_is_consistent() {
        let stats = Arc::new(CacheStats::new());
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        stats.record_hit();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(stats.hits(), 10_000);
    }
}
