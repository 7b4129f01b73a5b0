//! The handle returned by attaching a cache to a function: `Memoized`
//! drives an [`Engine`] through the call protocol and exposes the
//! uniform introspection/mutation surface every engine shares.

use crate::engine::Engine;
use crate::error::ConfigurationError;
use crate::key::{CacheKey, CacheableKey, KeyBuilder};
use crate::lock::CacheLock;
use crate::selector::{self, Capacity};
use crate::stats::{Algorithm, CacheInfo, CacheStats};
use crate::value::CacheValue;
use std::time::Duration;

/// A function wrapped with a cache. Build one with [`MemoizeBuilder`],
/// not directly.
pub struct Memoized<F, A, R> {
    func: F,
    state: CacheLock<Box<dyn Engine<A, R> + Send>>,
    stats: CacheStats,
    key_builder: KeyBuilder,
    custom_key_maker: Option<Box<dyn Fn(&A) -> CacheKey + Send + Sync>>,
    capacity: Capacity,
    algorithm: Algorithm,
    ttl: Option<Duration>,
}

impl<F, A, R> Memoized<F, A, R>
where
    A: CacheableKey + Clone + Send + 'static,
    R: Clone + Send + 'static,
{
    fn build_key(&self, args: &A) -> CacheKey {
        match &self.custom_key_maker {
            Some(maker) => maker(args),
            None => self.key_builder.build(args),
        }
    }
}

impl<F, A, R> Memoized<F, A, R>
where
    F: Fn(A) -> R,
    A: CacheableKey + Clone + Send + 'static,
    R: Clone + Send + 'static,
{
    /// Invokes the wrapped function, serving a cached result when one
    /// is available and valid.
    ///
    /// Implements the drop-and-recheck protocol: the lock is released
    /// before the (possibly slow) underlying function runs, and
    /// re-acquired to commit. If another caller already inserted a
    /// fresh value for the same key while this call was computing, its
    /// own result is discarded in favor of the cached one — racers
    /// converge on whichever one re-acquires the lock first, rather
    /// than each overwriting the other. The underlying function may
    /// still run more than once for the same key under contention;
    /// nothing about this protocol promises single execution, only
    /// that at most one result per key survives.
    pub fn call(&self, args: A) -> R {
        let key = self.build_key(&args);

        let hit = self.state.with_lock(|engine| match engine.get(&key) {
            Some(v) if v.is_valid() => Some(v.get().clone()),
            _ => None,
        });
        if let Some(result) = hit {
            self.stats.record_hit();
            return result;
        }
        self.stats.record_miss();

        let result = (self.func)(args.clone());

        self.state.with_lock(|engine| {
            // `peek`, not `get`: another thread may have already inserted
            // this key while we were computing `result` outside the lock.
            // Using `get` here would count as a real hit for engines whose
            // `get` has side effects (LRU relinks, LFU promotes a frequency
            // bucket) even though nothing about this recheck is a genuine
            // cache hit.
            let already_fresh = engine
                .peek(&key)
                .filter(|v| v.is_valid())
                .map(|v| v.get().clone());
            match already_fresh {
                Some(winner) => winner,
                None => {
                    let value = CacheValue::new(result.clone(), self.ttl);
                    engine.insert(key, args, value);
                    result
                }
            }
        })
    }

    pub fn cache_info(&self) -> CacheInfo {
        self.state.with_lock(|engine| CacheInfo {
            hits: self.stats.hits(),
            misses: self.stats.misses(),
            current_size: engine.len(),
            max_size: engine.max_size(),
            algorithm: selector::resolved_algorithm(self.capacity, self.algorithm),
            ttl: self.ttl,
            thread_safe: self.state.is_thread_safe(),
            order_independent: self.key_builder.order_independent,
            use_custom_key: self.custom_key_maker.is_some(),
        })
    }

    pub fn cache_clear(&self) {
        self.state.with_lock(|engine| engine.clear());
        self.stats.reset();
    }

    pub fn cache_is_empty(&self) -> bool {
        self.state.with_lock(|engine| engine.is_empty())
    }

    pub fn cache_is_full(&self) -> bool {
        self.state.with_lock(|engine| engine.is_full())
    }

    pub fn cache_contains_argument(&self, args: &A) -> bool {
        let key = self.build_key(args);
        self.state.with_lock(|engine| engine.contains_key(&key))
    }

    pub fn cache_contains_result(&self, result: &R) -> bool
    where
        R: PartialEq,
    {
        self.state
            .with_lock(|engine| engine.contains_result(&|r| r == result))
    }

    /// Visits every live (non-expired) entry in the engine's natural
    /// traversal order.
    pub fn cache_for_each(&self, mut f: impl FnMut(&A, &R)) {
        self.state.with_lock(|engine| {
            engine.for_each(&mut |_key, args, value| {
                if value.is_valid() {
                    f(args, value.get());
                }
            });
        });
    }

    /// Snapshots every live entry's arguments. Eager rather than
    /// lazy — an engine's entries live behind the wrapper's lock, and
    /// a truly lazy iterator would have to hold that lock open across
    /// calls the caller doesn't control.
    pub fn cache_arguments(&self) -> Vec<A> {
        let mut out = Vec::new();
        self.cache_for_each(|args, _| out.push(args.clone()));
        out
    }

    pub fn cache_results(&self) -> Vec<R> {
        let mut out = Vec::new();
        self.cache_for_each(|_, result| out.push(result.clone()));
        out
    }

    pub fn cache_items(&self) -> Vec<(A, R)> {
        let mut out = Vec::new();
        self.cache_for_each(|args, result| out.push((args.clone(), result.clone())));
        out
    }

    /// Removes every entry whose arguments and result satisfy
    /// `predicate`, maintaining the engine's structural invariants.
    /// Expired entries are visible to `predicate` too, so this also
    /// doubles as the explicit-sweep half of TTL expiration.
    pub fn cache_remove_if(&self, predicate: impl Fn(&A, &R) -> bool) -> usize {
        self.state
            .with_lock(|engine| engine.remove_if(&|_key, args, value| predicate(args, value.get())))
    }
}

/// Fluent constructor for [`Memoized`], mirroring the original's
/// `cached(max_size=, ttl=, algorithm=, thread_safe=, ...)` keyword
/// surface.
pub struct MemoizeBuilder<F> {
    func: F,
    capacity: Capacity,
    algorithm: Algorithm,
    ttl: Option<Duration>,
    thread_safe: bool,
    order_independent: bool,
}

impl<F> MemoizeBuilder<F> {
    pub fn new(func: F) -> Self {
        MemoizeBuilder {
            func,
            capacity: Capacity::Unbounded,
            algorithm: Algorithm::Lru,
            ttl: None,
            thread_safe: false,
            order_independent: false,
        }
    }

    pub fn capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn thread_safe(mut self, thread_safe: bool) -> Self {
        self.thread_safe = thread_safe;
        self
    }

    /// Ignored once [`MemoizeBuilder::custom_key_maker`] is set — a
    /// caller-supplied key maker fully owns how keys are derived.
    pub fn order_independent(mut self, order_independent: bool) -> Self {
        self.order_independent = order_independent;
        self
    }

    pub fn build<A, R>(self) -> Result<Memoized<F, A, R>, ConfigurationError>
    where
        F: Fn(A) -> R,
        A: CacheableKey + Clone + Send + 'static,
        R: Clone + Send + 'static,
    {
        self.build_with_key_maker(None)
    }

    pub fn custom_key_maker<A>(
        self,
        maker: impl Fn(&A) -> CacheKey + Send + Sync + 'static,
    ) -> CustomKeyedBuilder<F, A> {
        CustomKeyedBuilder {
            builder: self,
            maker: Box::new(maker),
            _marker: std::marker::PhantomData,
        }
    }

    fn build_with_key_maker<A, R>(
        self,
        custom_key_maker: Option<Box<dyn Fn(&A) -> CacheKey + Send + Sync>>,
    ) -> Result<Memoized<F, A, R>, ConfigurationError>
    where
        F: Fn(A) -> R,
        A: CacheableKey + Clone + Send + 'static,
        R: Clone + Send + 'static,
    {
        if let Some(ttl) = self.ttl {
            if ttl.is_zero() {
                return Err(ConfigurationError::NegativeOrZeroTtl(ttl));
            }
        }
        let engine = selector::select::<A, R>(self.capacity, self.algorithm)?;
        let order_independent = custom_key_maker.is_none() && self.order_independent;
        Ok(Memoized {
            func: self.func,
            state: CacheLock::new(self.thread_safe, engine),
            stats: CacheStats::new(),
            key_builder: KeyBuilder { order_independent },
            custom_key_maker,
            capacity: self.capacity,
            algorithm: self.algorithm,
            ttl: self.ttl,
        })
    }
}

/// Returned by [`MemoizeBuilder::custom_key_maker`]; supplying a
/// key maker fixes the function's argument type `A` (needed to type
/// the closure) ahead of `build`, so this carries it explicitly rather
/// than inferring it only at `build` time.
pub struct CustomKeyedBuilder<F, A> {
    builder: MemoizeBuilder<F>,
    maker: Box<dyn Fn(&A) -> CacheKey + Send + Sync>,
    _marker: std::marker::PhantomData<A>,
}

impl<F, A> CustomKeyedBuilder<F, A> {
    pub fn build<R>(self) -> Result<Memoized<F, A, R>, ConfigurationError>
    where
        F: Fn(A) -> R,
        A: CacheableKey + Clone + Send + 'static,
        R: Clone + Send + 'static,
    {
        self.builder.build_with_key_maker(Some(self.maker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn repeated_calls_hit_the_cache() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls2 = Arc::clone(&calls);
        let memo = MemoizeBuilder::new(move |n: i32| {
            calls2.fetch_add(1, Ordering::SeqCst);
            n * 2
        })
        .build::<i32, i32>()
        .unwrap();

        assert_eq!(memo.call(5), 10);
        assert_eq!(memo.call(5), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.cache_info().hits, 1);
        assert_eq!(memo.cache_info().misses, 1);
    }

    #[test]
    fn bounded_lru_evicts_least_recently_used() {
        let memo = MemoizeBuilder::new(|n: i32| n)
            .capacity(Capacity::Bounded(2))
            .algorithm(Algorithm::Lru)
            .build::<i32, i32>()
            .unwrap();

        memo.call(1);
        memo.call(2);
        memo.call(1); // refresh 1
        memo.call(3); // evicts 2
        assert!(memo.cache_contains_argument(&1));
        assert!(!memo.cache_contains_argument(&2));
        assert!(memo.cache_contains_argument(&3));
    }

    #[test]
    fn cache_clear_resets_stats_and_storage() {
        let memo = MemoizeBuilder::new(|n: i32| n).build::<i32, i32>().unwrap();
        memo.call(1);
        memo.cache_clear();
        assert!(memo.cache_is_empty());
        assert_eq!(memo.cache_info().hits, 0);
        assert_eq!(memo.cache_info().misses, 0);
    }

    #[test]
    fn zero_or_negative_ttl_is_rejected() {
        let result = MemoizeBuilder::new(|n: i32| n)
            .ttl(Duration::ZERO)
            .build::<i32, i32>();
        assert!(result.is_err());
    }

    #[test]
    fn cache_remove_if_drops_matching_entries() {
        let memo = MemoizeBuilder::new(|n: i32| n * 10)
            .build::<i32, i32>()
            .unwrap();
        memo.call(1);
        memo.call(2);
        let removed = memo.cache_remove_if(|_, result| *result == 20);
        assert_eq!(removed, 1);
        assert!(!memo.cache_contains_argument(&2));
        assert!(memo.cache_contains_argument(&1));
    }
}
