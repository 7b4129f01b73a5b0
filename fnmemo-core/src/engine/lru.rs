//! Least-recently-used bounded cache. Built on the same arena as the
//! FIFO engine; the only behavioral difference is that a hit relinks
//! the entry to the newest position, so eviction always takes the
//! entry that has gone longest untouched rather than the oldest
//! insertion.

use super::arena::LinkedArena;
use super::Engine;
use crate::key::CacheKey;
use crate::value::CacheValue;

pub struct LruEngine<A, R> {
    arena: LinkedArena<A, R>,
}

impl<A, R> LruEngine<A, R> {
    pub fn new(max_size: usize) -> Self {
        LruEngine {
            arena: LinkedArena::new(max_size),
        }
    }
}

impl<A, R> Engine<A, R> for LruEngine<A, R> {
    fn get(&mut self, key: &CacheKey) -> Option<&CacheValue<R>> {
        let id = self.arena.get(key)?;
        // Relink before checking validity: an expired hit still
        // refreshes recency, matching the original's relink-then-check
        // order, even though the wrapper will treat it as a miss.
        self.arena.touch(id);
        Some(self.arena.value(id))
    }

    fn contains_key(&self, key: &CacheKey) -> bool {
        self.arena.contains(key)
    }

    /// Unlike `get`, this never relinks — used by the wrapper's
    /// post-compute re-probe, which must not let a losing racer's
    /// recheck of the winner's fresh insert refresh its recency.
    fn peek(&self, key: &CacheKey) -> Option<&CacheValue<R>> {
        let id = self.arena.get(key)?;
        Some(self.arena.value(id))
    }

    fn insert(&mut self, key: CacheKey, args: A, value: CacheValue<R>) {
        self.arena.insert(key, args, value);
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    fn is_full(&self) -> bool {
        self.arena.is_full()
    }

    fn max_size(&self) -> Option<usize> {
        Some(self.arena.max_size)
    }

    fn clear(&mut self) {
        self.arena.clear();
    }

    fn contains_result(&self, predicate: &dyn Fn(&R) -> bool) -> bool {
        let mut found = false;
        self.arena.for_each_newest_first(|_, _, v| {
            if !found && v.is_valid() && predicate(v.get()) {
                found = true;
            }
        });
        found
    }

    fn for_each(&self, f: &mut dyn FnMut(&CacheKey, &A, &CacheValue<R>)) {
        self.arena.for_each_newest_first(|k, a, v| f(k, a, v));
    }

    fn remove_if(&mut self, predicate: &dyn Fn(&CacheKey, &A, &CacheValue<R>) -> bool) -> usize {
        self.arena.remove_if(predicate)
    }
}
