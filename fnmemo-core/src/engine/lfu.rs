//! Least-frequently-used bounded cache, O(1) per operation.
//!
//! Two arenas, both circular and sentinel-anchored like
//! [`super::arena::LinkedArena`]:
//!
//! - a list of frequency buckets in ascending frequency order, and
//! - per bucket, a list of the data nodes currently at that frequency.
//!
//! A hit promotes its node to the bucket one frequency higher,
//! creating that bucket if it doesn't already exist and destroying the
//! origin bucket if the promotion empties it. Eviction always takes
//! the least-recently-promoted node of the lowest-frequency bucket; if
//! that bucket is already at frequency 1, its slot is recycled in
//! place instead of being destroyed and recreated, since a fresh
//! insertion would recreate an identical frequency-1 bucket anyway.
//!
//! This is the shape of the original's `_insert_into_lfu_cache` /
//! `_access_lfu_cache`, translated from `prev`/`next` dict links to
//! arena indices.

use super::Engine;
use crate::key::CacheKey;
use crate::value::CacheValue;
use std::collections::HashMap;

const SENTINEL: usize = 0;

struct DataNode<A, R> {
    prev: usize,
    next: usize,
    bucket: usize,
    slot: Option<(CacheKey, A, CacheValue<R>)>,
}

struct Bucket {
    prev: usize,
    next: usize,
    frequency: u64,
    /// One data node in this bucket's ring, or `None` if empty
    /// (transiently, just before the bucket is destroyed).
    head: Option<usize>,
}

pub struct LfuEngine<A, R> {
    data: Vec<DataNode<A, R>>,
    free_data: Vec<usize>,
    buckets: Vec<Bucket>,
    free_buckets: Vec<usize>,
    index: HashMap<CacheKey, usize>,
    max_size: usize,
}

impl<A, R> LfuEngine<A, R> {
    pub fn new(max_size: usize) -> Self {
        LfuEngine {
            data: vec![DataNode {
                prev: SENTINEL,
                next: SENTINEL,
                bucket: SENTINEL,
                slot: None,
            }],
            free_data: Vec::new(),
            buckets: vec![Bucket {
                prev: SENTINEL,
                next: SENTINEL,
                frequency: 0,
                head: None,
            }],
            free_buckets: Vec::new(),
            index: HashMap::new(),
            max_size,
        }
    }

    // -- bucket-list (outer) helpers, ascending frequency order --

    fn link_bucket_after(&mut self, after: usize, bucket_id: usize) {
        let next = self.buckets[after].next;
        self.buckets[bucket_id].prev = after;
        self.buckets[bucket_id].next = next;
        self.buckets[after].next = bucket_id;
        self.buckets[next].prev = bucket_id;
    }

    fn unlink_bucket(&mut self, bucket_id: usize) {
        let (p, n) = (self.buckets[bucket_id].prev, self.buckets[bucket_id].next);
        self.buckets[p].next = n;
        self.buckets[n].prev = p;
    }

    fn alloc_bucket(&mut self, frequency: u64) -> usize {
        if let Some(id) = self.free_buckets.pop() {
            self.buckets[id] = Bucket {
                prev: SENTINEL,
                next: SENTINEL,
                frequency,
                head: None,
            };
            id
        } else {
            self.buckets.push(Bucket {
                prev: SENTINEL,
                next: SENTINEL,
                frequency,
                head: None,
            });
            let id = self.buckets.len() - 1;
            tracing::trace!(bucket_count = self.buckets.len(), frequency, "lfu bucket arena grew");
            id
        }
    }

    // -- data-ring (inner) helpers --

    fn prepend_to_bucket(&mut self, bucket_id: usize, node_id: usize) {
        self.data[node_id].bucket = bucket_id;
        match self.buckets[bucket_id].head {
            None => {
                self.data[node_id].prev = node_id;
                self.data[node_id].next = node_id;
            }
            Some(head) => {
                let tail = self.data[head].prev;
                self.data[node_id].prev = tail;
                self.data[node_id].next = head;
                self.data[tail].next = node_id;
                self.data[head].prev = node_id;
            }
        }
        self.buckets[bucket_id].head = Some(node_id);
    }

    fn remove_from_bucket(&mut self, bucket_id: usize, node_id: usize) {
        let (p, n) = (self.data[node_id].prev, self.data[node_id].next);
        if p == node_id {
            self.buckets[bucket_id].head = None;
        } else {
            self.data[p].next = n;
            self.data[n].prev = p;
            if self.buckets[bucket_id].head == Some(node_id) {
                self.buckets[bucket_id].head = Some(n);
            }
        }
    }

    /// The least-recently-promoted node in a bucket — the eviction
    /// candidate if this bucket is the lowest-frequency one.
    fn bucket_tail(&self, bucket_id: usize) -> usize {
        let head = self.buckets[bucket_id].head.expect("non-empty bucket");
        self.data[head].prev
    }

    fn alloc_data(&mut self, key: CacheKey, args: A, value: CacheValue<R>, bucket: usize) -> usize {
        if let Some(id) = self.free_data.pop() {
            self.data[id].bucket = bucket;
            self.data[id].slot = Some((key, args, value));
            id
        } else {
            self.data.push(DataNode {
                prev: SENTINEL,
                next: SENTINEL,
                bucket,
                slot: Some((key, args, value)),
            });
            let id = self.data.len() - 1;
            tracing::trace!(node_count = self.data.len(), "lfu data node arena grew");
            id
        }
    }

    /// Promotes `id` to the next frequency bucket, creating it if
    /// needed and destroying the origin bucket if promotion empties it.
    fn access(&mut self, id: usize) {
        let origin = self.data[id].bucket;
        let target_freq = self.buckets[origin].frequency + 1;
        let origin_next = self.buckets[origin].next;
        let target_bucket = if origin_next != SENTINEL && self.buckets[origin_next].frequency == target_freq {
            origin_next
        } else {
            let new_bucket = self.alloc_bucket(target_freq);
            self.link_bucket_after(origin, new_bucket);
            new_bucket
        };

        self.remove_from_bucket(origin, id);
        let origin_emptied = self.buckets[origin].head.is_none();
        self.prepend_to_bucket(target_bucket, id);
        if origin_emptied {
            self.unlink_bucket(origin);
            self.free_buckets.push(origin);
        }
    }

    fn lowest_bucket(&self) -> Option<usize> {
        let b = self.buckets[SENTINEL].next;
        if b == SENTINEL {
            None
        } else {
            Some(b)
        }
    }
}

impl<A, R> Engine<A, R> for LfuEngine<A, R> {
    fn get(&mut self, key: &CacheKey) -> Option<&CacheValue<R>> {
        let id = self.index.get(key).copied()?;
        self.access(id);
        let (_, _, value) = self.data[id].slot.as_ref().expect("live node");
        Some(value)
    }

    fn contains_key(&self, key: &CacheKey) -> bool {
        self.index.contains_key(key)
    }

    /// Unlike `get`, this never promotes a frequency bucket — used by
    /// the wrapper's post-compute re-probe, which must not let a losing
    /// racer's recheck of the winner's fresh insert count as a hit.
    fn peek(&self, key: &CacheKey) -> Option<&CacheValue<R>> {
        let id = self.index.get(key).copied()?;
        let (_, _, value) = self.data[id].slot.as_ref().expect("live node");
        Some(value)
    }

    fn insert(&mut self, key: CacheKey, args: A, value: CacheValue<R>) {
        if let Some(id) = self.index.get(&key).copied() {
            self.access(id);
            self.data[id].slot.as_mut().expect("live node").1 = args;
            self.data[id].slot.as_mut().expect("live node").2 = value;
            return;
        }

        if !self.is_full() {
            let lowest = self.lowest_bucket();
            let bucket = match lowest {
                Some(b) if self.buckets[b].frequency == 1 => b,
                _ => {
                    let new_bucket = self.alloc_bucket(1);
                    self.link_bucket_after(SENTINEL, new_bucket);
                    new_bucket
                }
            };
            let id = self.alloc_data(key.clone(), args, value, bucket);
            self.prepend_to_bucket(bucket, id);
            self.index.insert(key, id);
            return;
        }

        // Full: evict the tail of the lowest-frequency bucket.
        let victim_bucket = self.lowest_bucket().expect("full cache has a lowest bucket");
        let victim = self.bucket_tail(victim_bucket);

        if self.buckets[victim_bucket].frequency == 1 {
            let (old_key, _, _) = self.data[victim].slot.take().expect("live node");
            tracing::debug!(?old_key, "lfu evicting frequency-1 entry, recycling slot");
            self.index.remove(&old_key);
            // Recycle in place: move to the head of the same
            // frequency-1 bucket instead of destroying/recreating it.
            self.remove_from_bucket(victim_bucket, victim);
            self.data[victim].slot = Some((key.clone(), args, value));
            self.prepend_to_bucket(victim_bucket, victim);
            self.index.insert(key, victim);
        } else {
            let (old_key, _, _) = self.data[victim].slot.take().expect("live node");
            tracing::debug!(
                ?old_key,
                frequency = self.buckets[victim_bucket].frequency,
                "lfu evicting lowest-frequency entry"
            );
            self.index.remove(&old_key);
            self.remove_from_bucket(victim_bucket, victim);
            self.free_data.push(victim);
            if self.buckets[victim_bucket].head.is_none() {
                self.unlink_bucket(victim_bucket);
                self.free_buckets.push(victim_bucket);
            }
            let new_bucket = self.alloc_bucket(1);
            self.link_bucket_after(SENTINEL, new_bucket);
            let id = self.alloc_data(key.clone(), args, value, new_bucket);
            self.prepend_to_bucket(new_bucket, id);
            self.index.insert(key, id);
        }
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn is_full(&self) -> bool {
        self.max_size > 0 && self.len() >= self.max_size
    }

    fn max_size(&self) -> Option<usize> {
        Some(self.max_size)
    }

    fn clear(&mut self) {
        self.data.truncate(1);
        self.buckets.truncate(1);
        self.buckets[SENTINEL].prev = SENTINEL;
        self.buckets[SENTINEL].next = SENTINEL;
        self.free_data.clear();
        self.free_buckets.clear();
        self.index.clear();
    }

    fn contains_result(&self, predicate: &dyn Fn(&R) -> bool) -> bool {
        let mut found = false;
        self.for_each(&mut |_, _, v| {
            if !found && v.is_valid() && predicate(v.get()) {
                found = true;
            }
        });
        found
    }

    /// Highest-frequency bucket first; within a bucket, most recently
    /// promoted first. Matches the original's traversal starting at
    /// the frequency list's `prev` (highest) and walking backward.
    fn for_each(&self, f: &mut dyn FnMut(&CacheKey, &A, &CacheValue<R>)) {
        let mut b = self.buckets[SENTINEL].prev;
        while b != SENTINEL {
            if let Some(head) = self.buckets[b].head {
                let mut n = head;
                loop {
                    let (k, a, v) = self.data[n].slot.as_ref().expect("live node");
                    f(k, a, v);
                    n = self.data[n].next;
                    if n == head {
                        break;
                    }
                }
            }
            b = self.buckets[b].prev;
        }
    }

    fn remove_if(&mut self, predicate: &dyn Fn(&CacheKey, &A, &CacheValue<R>) -> bool) -> usize {
        let mut removed = 0;
        let mut b = self.buckets[SENTINEL].prev;
        while b != SENTINEL {
            let prev_bucket = self.buckets[b].prev;
            if let Some(head) = self.buckets[b].head {
                let mut ids = Vec::new();
                let mut n = head;
                loop {
                    ids.push(n);
                    n = self.data[n].next;
                    if n == head {
                        break;
                    }
                }
                for id in ids {
                    let matches = {
                        let (k, a, v) = self.data[id].slot.as_ref().expect("live node");
                        predicate(k, a, v)
                    };
                    if matches {
                        let (k, _, _) = self.data[id].slot.take().expect("live node");
                        self.index.remove(&k);
                        self.remove_from_bucket(b, id);
                        self.free_data.push(id);
                        removed += 1;
                    }
                }
                if self.buckets[b].head.is_none() {
                    self.unlink_bucket(b);
                    self.free_buckets.push(b);
                }
            }
            b = prev_bucket;
        }
        removed
    }
}
