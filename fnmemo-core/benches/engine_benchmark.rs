use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fnmemo_core::engine::fifo::FifoEngine;
use fnmemo_core::engine::lfu::LfuEngine;
use fnmemo_core::engine::lru::LruEngine;
use fnmemo_core::engine::Engine;
use fnmemo_core::key::CacheKey;
use fnmemo_core::value::CacheValue;

fn bench_insert_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_sequential");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("FIFO", size), size, |b, &size| {
            b.iter(|| {
                let mut engine: FifoEngine<i32, i32> = FifoEngine::new(size);
                for i in 0..size as i32 {
                    engine.insert(CacheKey::hashed(&i), i, CacheValue::bare(black_box(i)));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("LRU", size), size, |b, &size| {
            b.iter(|| {
                let mut engine: LruEngine<i32, i32> = LruEngine::new(size);
                for i in 0..size as i32 {
                    engine.insert(CacheKey::hashed(&i), i, CacheValue::bare(black_box(i)));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("LFU", size), size, |b, &size| {
            b.iter(|| {
                let mut engine: LfuEngine<i32, i32> = LfuEngine::new(size);
                for i in 0..size as i32 {
                    engine.insert(CacheKey::hashed(&i), i, CacheValue::bare(black_box(i)));
                }
            });
        });
    }

    group.finish();
}

fn bench_get_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_sequential");

    for size in [10, 100, 1000].iter() {
        let size = *size;

        let mut fifo: FifoEngine<i32, i32> = FifoEngine::new(size);
        for i in 0..size as i32 {
            fifo.insert(CacheKey::hashed(&i), i, CacheValue::bare(i));
        }
        group.bench_with_input(BenchmarkId::new("FIFO", size), &size, |b, &size| {
            b.iter(|| {
                for i in 0..size as i32 {
                    black_box(fifo.get(&CacheKey::hashed(&i)));
                }
            });
        });

        let mut lru: LruEngine<i32, i32> = LruEngine::new(size);
        for i in 0..size as i32 {
            lru.insert(CacheKey::hashed(&i), i, CacheValue::bare(i));
        }
        group.bench_with_input(BenchmarkId::new("LRU", size), &size, |b, &size| {
            b.iter(|| {
                for i in 0..size as i32 {
                    black_box(lru.get(&CacheKey::hashed(&i)));
                }
            });
        });

        let mut lfu: LfuEngine<i32, i32> = LfuEngine::new(size);
        for i in 0..size as i32 {
            lfu.insert(CacheKey::hashed(&i), i, CacheValue::bare(i));
        }
        group.bench_with_input(BenchmarkId::new("LFU", size), &size, |b, &size| {
            b.iter(|| {
                for i in 0..size as i32 {
                    black_box(lfu.get(&CacheKey::hashed(&i)));
                }
            });
        });
    }

    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");

    group.bench_function("FIFO_eviction", |b| {
        b.iter(|| {
            let mut engine: FifoEngine<i32, i32> = FifoEngine::new(50);
            for i in 0..100 {
                engine.insert(CacheKey::hashed(&i), i, CacheValue::bare(black_box(i)));
            }
        });
    });

    group.bench_function("LRU_eviction", |b| {
        b.iter(|| {
            let mut engine: LruEngine<i32, i32> = LruEngine::new(50);
            for i in 0..100 {
                engine.insert(CacheKey::hashed(&i), i, CacheValue::bare(black_box(i)));
            }
        });
    });

    group.bench_function("LFU_eviction", |b| {
        b.iter(|| {
            let mut engine: LfuEngine<i32, i32> = LfuEngine::new(50);
            for i in 0..100 {
                engine.insert(CacheKey::hashed(&i), i, CacheValue::bare(black_box(i)));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_sequential,
    bench_get_sequential,
    bench_eviction
);
criterion_main!(benches);
