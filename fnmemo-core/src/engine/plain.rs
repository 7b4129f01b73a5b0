//! Unbounded cache: nothing is ever evicted.

use super::Engine;
use crate::key::CacheKey;
use crate::value::CacheValue;
use std::collections::HashMap;

/// Appended-only slots plus an index, rather than a bare `HashMap`, so
/// traversal has a stable insertion order — `HashMap`'s own iteration
/// order is unspecified and would make `cache_for_each` nondeterministic.
pub struct PlainEngine<A, R> {
    index: HashMap<CacheKey, usize>,
    slots: Vec<(CacheKey, A, CacheValue<R>)>,
}

impl<A, R> PlainEngine<A, R> {
    pub fn new() -> Self {
        PlainEngine {
            index: HashMap::new(),
            slots: Vec::new(),
        }
    }
}

impl<A, R> Default for PlainEngine<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> Engine<A, R> for PlainEngine<A, R> {
    fn get(&mut self, key: &CacheKey) -> Option<&CacheValue<R>> {
        let &id = self.index.get(key)?;
        Some(&self.slots[id].2)
    }

    fn contains_key(&self, key: &CacheKey) -> bool {
        self.index.contains_key(key)
    }

    fn peek(&self, key: &CacheKey) -> Option<&CacheValue<R>> {
        let &id = self.index.get(key)?;
        Some(&self.slots[id].2)
    }

    fn insert(&mut self, key: CacheKey, args: A, value: CacheValue<R>) {
        if let Some(&id) = self.index.get(&key) {
            self.slots[id] = (key, args, value);
        } else {
            let id = self.slots.len();
            self.index.insert(key.clone(), id);
            self.slots.push((key, args, value));
        }
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn is_full(&self) -> bool {
        false
    }

    fn max_size(&self) -> Option<usize> {
        None
    }

    fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
    }

    fn contains_result(&self, predicate: &dyn Fn(&R) -> bool) -> bool {
        self.slots
            .iter()
            .any(|(_, _, v)| v.is_valid() && predicate(v.get()))
    }

    fn for_each(&self, f: &mut dyn FnMut(&CacheKey, &A, &CacheValue<R>)) {
        for (k, a, v) in &self.slots {
            f(k, a, v);
        }
    }

    fn remove_if(&mut self, predicate: &dyn Fn(&CacheKey, &A, &CacheValue<R>) -> bool) -> usize {
        let before = self.slots.len();
        let kept: Vec<_> = self
            .slots
            .drain(..)
            .filter(|(k, a, v)| !predicate(k, a, v))
            .collect();
        self.index.clear();
        for (id, (k, _, _)) in kept.iter().enumerate() {
            self.index.insert(k.clone(), id);
        }
        self.slots = kept;
        before - self.slots.len()
    }
}
