//! First-in-first-out bounded cache: eviction always takes the oldest
//! surviving insertion, regardless of how often it's been read.

use super::arena::LinkedArena;
use super::Engine;
use crate::key::CacheKey;
use crate::value::CacheValue;

pub struct FifoEngine<A, R> {
    arena: LinkedArena<A, R>,
}

impl<A, R> FifoEngine<A, R> {
    pub fn new(max_size: usize) -> Self {
        FifoEngine {
            arena: LinkedArena::new(max_size),
        }
    }
}

impl<A, R> Engine<A, R> for FifoEngine<A, R> {
    fn get(&mut self, key: &CacheKey) -> Option<&CacheValue<R>> {
        let id = self.arena.get(key)?;
        Some(self.arena.value(id))
    }

    fn contains_key(&self, key: &CacheKey) -> bool {
        self.arena.contains(key)
    }

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
