//! `capacity = 0`: stores nothing, every call is a miss. Exists purely
//! so a caller can observe call-count statistics without paying for
//! storage — the original's `statistic_cache.py`.

use super::Engine;
use crate::key::CacheKey;
use crate::value::CacheValue;

pub struct StatsOnlyEngine;

impl StatsOnlyEngine {
    pub fn new() -> Self {
        StatsOnlyEngine
    }
}

impl Default for StatsOnlyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> Engine<A, R> for StatsOnlyEngine {
    fn get(&mut self, _key: &CacheKey) -> Option<&CacheValue<R>> {
        None
    }

    fn contains_key(&self, _key: &CacheKey) -> bool {
        false
    }

    fn peek(&self, _key: &CacheKey) -> Option<&CacheValue<R>> {
        None
    }

    fn insert(&mut self, _key: CacheKey, _args: A, _value: CacheValue<R>) {}

    fn len(&self) -> usize {
        0
    }

    fn is_full(&self) -> bool {
        true
    }

    fn max_size(&self) -> Option<usize> {
        Some(0)
    }

    fn clear(&mut self) {}

    fn contains_result(&self, _predicate: &dyn Fn(&R) -> bool) -> bool {
        false
    }

    fn for_each(&self, _f: &mut dyn FnMut(&CacheKey, &A, &CacheValue<R>)) {}

    fn remove_if(&mut self, _predicate: &dyn Fn(&CacheKey, &A, &CacheValue<R>) -> bool) -> usize {
        0
    }
}
