//! The drop-and-recheck protocol releases the cache lock while the
//! underlying function runs, so concurrent callers for the same key
//! may both compute a result. This only asserts the property the
//! protocol actually promises: at most one result per key survives,
//! not that the function ran exactly once.

use fnmemo::{Algorithm, Capacity, MemoizeBuilder};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[test]
fn concurrent_identical_key_misses_leave_one_surviving_value() {
    let calls = Arc::new(AtomicU32::new(0));
    let memo = Arc::new({
        let calls = Arc::clone(&calls);
        MemoizeBuilder::new(move |n: i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            n * 10
        })
        .capacity(Capacity::Bounded(8))
        .algorithm(Algorithm::Lru)
        .build::<i32, i32>()
        .unwrap()
    });

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let memo = Arc::clone(&memo);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                memo.call(42)
            })
        })
        .collect();

    let results: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(results.iter().all(|&r| r == 420));
    assert_eq!(memo.cache_info().current_size, 1);
    assert!(calls.load(Ordering::SeqCst) >= 1);
}

#[test]
fn concurrent_calls_across_distinct_keys_all_land() {
    let memo = Arc::new(
        MemoizeBuilder::new(|n: i32| n * n)
            .capacity(Capacity::Bounded(64))
            .algorithm(Algorithm::Lfu)
            .build::<i32, i32>()
            .unwrap(),
    );

    let handles: Vec<_> = (0..64)
        .map(|n| {
            let memo = Arc::clone(&memo);
            thread::spawn(move || memo.call(n))
        })
        .collect();

    for (n, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), (n as i32) * (n as i32));
    }
    assert_eq!(memo.cache_info().current_size, 64);
}
