//! Storage engines. `Memoized` (in `wrapper.rs`) drives one of these
//! through a single uniform trait; `selector.rs` picks which
//! implementation backs a given `(capacity, algorithm)` pair.

mod arena;
pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod plain;
pub mod stats_only;

use crate::key::CacheKey;
use crate::value::CacheValue;

/// The storage half of a memoized function. Every method here backs
/// one of the wrapper's uniform protocol operations (spec §4.8); a
/// hand-written engine is expected to satisfy the same contract, which
/// `validator.rs` checks mechanically.
pub trait Engine<A, R> {
    /// Looks up `key`. Implementations that reorder on access (LRU) or
    /// re-bucket on access (LFU) do so here; `&mut self` is required
    /// even for the lookup path because of that.
    fn get(&mut self, key: &CacheKey) -> Option<&CacheValue<R>>;

    /// A non-mutating membership check. Separate from `get` because
    /// LRU/LFU's `get` has observable side effects (relinking,
    /// re-bucketing) that a pure "is this cached?" query must not
    /// trigger.
    fn contains_key(&self, key: &CacheKey) -> bool;

    /// A non-mutating value lookup, for the same reason `contains_key`
    /// exists: the wrapper's post-compute re-probe (`wrapper::call`)
    /// must be able to check whether another caller already won the
    /// race without relinking an LRU entry or promoting an LFU entry's
    /// frequency bucket on a check that isn't a real hit.
    fn peek(&self, key: &CacheKey) -> Option<&CacheValue<R>>;

    /// Inserts or overwrites `key`. May evict another entry first; the
    /// wrapper doesn't need to know which one, only that `len()`
    /// afterwards respects `max_size()`.
    fn insert(&mut self, key: CacheKey, args: A, value: CacheValue<R>);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool;

    /// `None` for an unbounded engine, `Some(0)` for the stats-only
    /// engine, `Some(n)` for a bounded one.
    fn max_size(&self) -> Option<usize>;

    fn clear(&mut self);

    /// `true` if any *valid* (non-expired) entry's result satisfies
    /// `predicate`. O(n) by construction — this is an introspection
    /// convenience, not a hot path.
    fn contains_result(&self, predicate: &dyn Fn(&R) -> bool) -> bool;

    /// Visits every physical entry, expired or not, in the engine's
    /// natural traversal order. Callers that care about liveness (the
    /// wrapper's `cache_arguments`/`cache_results`/`cache_items`) check
    /// `CacheValue::is_valid` themselves.
    fn for_each(&self, f: &mut dyn FnMut(&CacheKey, &A, &CacheValue<R>));

    /// Removes every entry for which `predicate` returns `true`,
    /// maintaining every structural invariant of the engine (no
    /// dangling links, no empty LFU buckets left behind). Returns the
    /// number of entries removed.
    fn remove_if(&mut self, predicate: &dyn Fn(&CacheKey, &A, &CacheValue<R>) -> bool) -> usize;
}
