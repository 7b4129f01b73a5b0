//! A circular, intrusive doubly-linked list of cache entries addressed
//! by arena index rather than pointer — Rust has no safe way to build
//! the original's `root[_NEXT]`/`root[_PREV]` cyclic node graph with
//! real references, so every "pointer" here is a `usize` into `nodes`.
//!
//! Shared by the FIFO and LRU engines, which differ only in whether a
//! hit calls [`LinkedArena::touch`].

use crate::key::CacheKey;
use crate::value::CacheValue;
use std::collections::HashMap;

const SENTINEL: usize = 0;

struct Node<A, R> {
    prev: usize,
    next: usize,
    slot: Option<(CacheKey, A, CacheValue<R>)>,
}

/// Index 0 is a permanent sentinel: `nodes[0].next` is the oldest live
/// entry (the next eviction candidate), `nodes[0].prev` is the newest.
/// Evicted slots are recycled through `free` rather than freed, so a
/// full cache at steady state never reallocates.
pub struct LinkedArena<A, R> {
    nodes: Vec<Node<A, R>>,
    free: Vec<usize>,
    index: HashMap<CacheKey, usize>,
    pub max_size: usize,
}

impl<A, R> LinkedArena<A, R> {
    pub fn new(max_size: usize) -> Self {
        LinkedArena {
            nodes: vec![Node {
                prev: SENTINEL,
                next: SENTINEL,
                slot: None,
            }],
            free: Vec::new(),
            index: HashMap::new(),
            max_size,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_full(&self) -> bool {
        self.max_size > 0 && self.len() >= self.max_size
    }

    pub fn get(&self, key: &CacheKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn value(&self, id: usize) -> &CacheValue<R> {
        &self.nodes[id].slot.as_ref().expect("live node").2
    }

    /// Moves `id` to the newest position without changing its
    /// contents. Used by the LRU engine on every hit.
    pub fn touch(&mut self, id: usize) {
        self.unlink(id);
        self.link_newest(id);
    }

    fn unlink(&mut self, id: usize) {
        let (p, n) = (self.nodes[id].prev, self.nodes[id].next);
        self.nodes[p].next = n;
        self.nodes[n].prev = p;
    }

    fn link_newest(&mut self, id: usize) {
        let old_last = self.nodes[SENTINEL].prev;
        self.nodes[id].prev = old_last;
        self.nodes[id].next = SENTINEL;
        self.nodes[old_last].next = id;
        self.nodes[SENTINEL].prev = id;
    }

    fn alloc(&mut self, key: CacheKey, args: A, value: CacheValue<R>) -> usize {
        if let Some(id) = self.free.pop() {
            self.nodes[id].slot = Some((key, args, value));
            id
        } else {
            self.nodes.push(Node {
                prev: SENTINEL,
                next: SENTINEL,
                slot: Some((key, args, value)),
            });
            self.nodes.len() - 1
        }
    }

    /// Inserts `key`, or overwrites it in place (and refreshes its
    /// recency) if already present. Returns the entry evicted to make
    /// room, if any.
    pub fn insert(
        &mut self,
        key: CacheKey,
        args: A,
        value: CacheValue<R>,
    ) -> Option<(CacheKey, A, CacheValue<R>)> {
        if let Some(id) = self.index.get(&key).copied() {
            self.unlink(id);
            self.nodes[id].slot = Some((key, args, value));
            self.link_newest(id);
            return None;
        }

        if self.is_full() {
            let victim = self.nodes[SENTINEL].next;
            self.unlink(victim);
            let evicted = self.nodes[victim].slot.take();
            if let Some((ref old_key, _, _)) = evicted {
                tracing::debug!(?old_key, "evicting oldest entry");
                self.index.remove(old_key);
            }
            self.nodes[victim].slot = Some((key.clone(), args, value));
            self.index.insert(key, victim);
            self.link_newest(victim);
            return evicted;
        }

        let id = self.alloc(key.clone(), args, value);
        self.index.insert(key, id);
        self.link_newest(id);
        None
    }

    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[SENTINEL].prev = SENTINEL;
        self.nodes[SENTINEL].next = SENTINEL;
        self.free.clear();
        self.index.clear();
    }

    /// Newest-first traversal: walks `.prev` starting at the sentinel,
    /// matching the original's "start at `root[_PREV]`" iteration.
    pub fn for_each_newest_first(&self, mut f: impl FnMut(&CacheKey, &A, &CacheValue<R>)) {
        let mut cur = self.nodes[SENTINEL].prev;
        while cur != SENTINEL {
            let (k, a, v) = self.nodes[cur].slot.as_ref().expect("live node");
            f(k, a, v);
            cur = self.nodes[cur].prev;
        }
    }

    pub fn remove_if(&mut self, predicate: &dyn Fn(&CacheKey, &A, &CacheValue<R>) -> bool) -> usize {
        let mut removed = 0;
        let mut cur = self.nodes[SENTINEL].prev;
        while cur != SENTINEL {
            let prev = self.nodes[cur].prev;
            let matches = {
                let (k, a, v) = self.nodes[cur].slot.as_ref().expect("live node");
                predicate(k, a, v)
            };
            if matches {
                let (k, _, _) = self.nodes[cur].slot.take().expect("live node");
                self.unlink(cur);
                self.index.remove(&k);
                self.free.push(cur);
                removed += 1;
            }
            cur = prev;
        }
        removed
    }
}
