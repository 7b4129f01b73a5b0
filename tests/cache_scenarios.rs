//! End-to-end eviction, expiry, and keying scenarios against the
//! public `fnmemo` surface, each call sequence and expected hit/miss
//! count chosen to pin down one algorithm's exact tie-breaking rule
//! rather than just "does it evict something".

use fnmemo::{Algorithm, CacheKey, Capacity, Kwargs, MemoizeBuilder};
use std::collections::HashSet;
use std::time::Duration;

fn prelude<F: Fn(i32) -> i32>(memo: &fnmemo::Memoized<F, i32, i32>) {
    for k in 0..20 {
        memo.call(k);
    }
    memo.call(99);
}

#[test]
fn fifo_eviction_tracks_insertion_order_not_recency() {
    let memo = MemoizeBuilder::new(|n: i32| n)
        .capacity(Capacity::Bounded(5))
        .algorithm(Algorithm::Fifo)
        .build::<i32, i32>()
        .unwrap();

    prelude(&memo);
    assert_eq!(memo.cache_info().misses, 21);
    let alive: HashSet<i32> = memo.cache_arguments().into_iter().collect();
    assert_eq!(alive, HashSet::from([16, 17, 18, 19, 99]));

    for k in [16, 17, 18, 16, 17, 18, 19, 15, 100, 16] {
        memo.call(k);
    }

    let info = memo.cache_info();
    assert_eq!(info.hits, 7);
    assert_eq!(info.misses, 24);
    let alive: HashSet<i32> = memo.cache_arguments().into_iter().collect();
    assert_eq!(alive, HashSet::from([16, 100, 15, 99, 19]));
    assert_eq!(memo.cache_arguments(), vec![16, 100, 15, 99, 19]);
}

#[test]
fn lru_eviction_tracks_recency() {
    let memo = MemoizeBuilder::new(|n: i32| n)
        .capacity(Capacity::Bounded(5))
        .algorithm(Algorithm::Lru)
        .build::<i32, i32>()
        .unwrap();

    prelude(&memo);

    for k in [16, 17, 18, 16, 17, 18, 19, 15, 100, 16] {
        memo.call(k);
    }

    let info = memo.cache_info();
    assert_eq!(info.hits, 7);
    assert_eq!(info.misses, 24);
    let alive: HashSet<i32> = memo.cache_arguments().into_iter().collect();
    assert_eq!(alive, HashSet::from([16, 100, 15, 19, 18]));
    assert_eq!(memo.cache_arguments(), vec![16, 100, 15, 19, 18]);
}

#[test]
fn lfu_eviction_tracks_access_frequency() {
    let memo = MemoizeBuilder::new(|n: i32| n)
        .capacity(Capacity::Bounded(5))
        .algorithm(Algorithm::Lfu)
        .build::<i32, i32>()
        .unwrap();

    prelude(&memo);

    for k in [16, 17, 18, 16, 17, 18, 19, 15, 100, 16] {
        memo.call(k);
    }

    let info = memo.cache_info();
    assert_eq!(info.hits, 8);
    assert_eq!(info.misses, 23);
    let alive: HashSet<i32> = memo.cache_arguments().into_iter().collect();
    assert_eq!(alive, HashSet::from([18, 17, 16, 19, 100]));
    assert_eq!(memo.cache_arguments(), vec![16, 18, 17, 19, 100]);
}

#[test]
fn ttl_expiry_forces_a_recompute_then_resumes_hitting() {
    let memo = MemoizeBuilder::new(|n: i32| n * n)
        .capacity(Capacity::Bounded(5))
        .algorithm(Algorithm::Lru)
        .ttl(Duration::from_millis(500))
        .build::<i32, i32>()
        .unwrap();

    memo.call(1);
    std::thread::sleep(Duration::from_millis(250));
    memo.call(1);
    assert_eq!(memo.cache_info().hits, 1);
    assert_eq!(memo.cache_info().misses, 1);

    std::thread::sleep(Duration::from_millis(350));
    memo.call(1);
    assert_eq!(memo.cache_info().hits, 1);
    assert_eq!(memo.cache_info().misses, 2);

    memo.call(1);
    assert_eq!(memo.cache_info().hits, 2);
    assert_eq!(memo.cache_info().misses, 2);
}

/// A type that deliberately does not implement `Hash` (its argument
/// carries a `Vec`, which some call sites treat as the unhashable
/// case) falls back to a `Debug`-derived textual key instead of a
/// precomputed hash.
#[derive(Debug, Clone)]
struct Unhashable(Vec<i32>);

impl fnmemo::DefaultCacheableKey for Unhashable {}
impl fnmemo::CacheableKey for Unhashable {
    fn to_cache_key(&self) -> CacheKey {
        fnmemo::default_cache_key(self)
    }
}

#[test]
fn unhashable_arguments_fall_back_to_textual_keys() {
    let memo = MemoizeBuilder::new(|u: Unhashable| u.0.len())
        .build::<Unhashable, usize>()
        .unwrap();

    memo.call(Unhashable(vec![1, 2, 3]));
    memo.call(Unhashable(vec![1, 2, 3, 0]));
    memo.call(Unhashable(vec![1, 2, 3]));

    let info = memo.cache_info();
    assert_eq!(info.misses, 2);
    assert_eq!(info.hits, 1);
    assert_eq!(info.current_size, 2);
}

#[test]
fn order_independent_keying_ignores_keyword_order() {
    let memo = MemoizeBuilder::new(|kw: Kwargs| kw.0.len())
        .order_independent(true)
        .build::<Kwargs, usize>()
        .unwrap();

    let permutations = [
        vec![
            ("kwarg1", CacheKey::text(&"a")),
            ("kwarg2", CacheKey::text(&[1, 2])),
            ("kwarg3", CacheKey::text(&"b")),
            ("kwarg4", CacheKey::hashed(&4)),
        ],
        vec![
            ("kwarg4", CacheKey::hashed(&4)),
            ("kwarg1", CacheKey::text(&"a")),
            ("kwarg3", CacheKey::text(&"b")),
            ("kwarg2", CacheKey::text(&[1, 2])),
        ],
        vec![
            ("kwarg3", CacheKey::text(&"b")),
            ("kwarg4", CacheKey::hashed(&4)),
            ("kwarg2", CacheKey::text(&[1, 2])),
            ("kwarg1", CacheKey::text(&"a")),
        ],
    ];

    for pairs in permutations {
        memo.call(Kwargs(pairs));
    }

    let info = memo.cache_info();
    assert_eq!(info.hits, 2);
    assert_eq!(info.misses, 1);
    assert_eq!(info.current_size, 1);
}
