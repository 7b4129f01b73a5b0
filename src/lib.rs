//! # fnmemo
//!
//! Function memoization with FIFO, LRU, and LFU eviction, TTL
//! expiration, and a uniform introspection/mutation API shared by
//! every cache.
//!
//! ## Features
//!
//! - **Easy to use**: add `#[memoize]` to any free function
//! - **Three eviction policies**: FIFO, LRU, LFU, all O(1) per
//!   operation
//! - **TTL expiration**: entries become stale after a configured
//!   duration, swept lazily on the next miss or explicit sweep
//! - **Thread-safe by construction**: every cache is guarded by a
//!   `parking_lot::Mutex`; `thread_safe` only changes what
//!   [`CacheInfo`] reports, not how the lock behaves
//! - **Flexible keys**: `Hash + Eq + Debug` arguments key themselves
//!   automatically, order-independent keyword-style keys, or a fully
//!   custom key maker
//! - **Uniform introspection**: `cache_info`, `cache_contains_argument`,
//!   `cache_for_each`, `cache_remove_if`, and friends work the same
//!   way regardless of which algorithm backs the cache
//!
//! ## Quick Start
//!
//! ```rust
//! use fnmemo::memoize;
//!
//! #[memoize(capacity = 128, algorithm = "lru")]
//! fn fibonacci(n: u64) -> u64 {
//!     if n < 2 {
//!         n
//!     } else {
//!         fibonacci(n - 1) + fibonacci(n - 2)
//!     }
//! }
//!
//! let first = fibonacci(40);
//! let second = fibonacci(40);
//! assert_eq!(first, second);
//! ```
//!
//! Omit `capacity` for an unbounded cache (no eviction, just a plain
//! lookup table):
//!
//! ```rust
//! use fnmemo::memoize;
//!
//! #[memoize]
//! fn square(n: i64) -> i64 {
//!     n * n
//! }
//!
//! assert_eq!(square(7), 49);
//! ```
//!
//! ## Building Without the Macro
//!
//! [`MemoizeBuilder`] is the lower-level entry point the macro expands
//! to; reach for it directly when the cache needs to be built at
//! runtime, live past the lifetime of a single `static`, or use a
//! custom key maker:
//!
//! ```rust
//! use fnmemo::{Algorithm, Capacity, MemoizeBuilder};
//!
//! let memo = MemoizeBuilder::new(|n: u64| n * n)
//!     .capacity(Capacity::Bounded(64))
//!     .algorithm(Algorithm::Lfu)
//!     .build::<u64, u64>()
//!     .expect("valid configuration");
//!
//! assert_eq!(memo.call(6), 36);
//! assert_eq!(memo.cache_info().hits, 0);
//! assert_eq!(memo.call(6), 36);
//! assert_eq!(memo.cache_info().hits, 1);
//! ```
//!
//! ## Custom Cache Keys
//!
//! Types that are `Hash + Eq + Debug` key themselves for free. A type
//! that can't (or shouldn't) implement those can opt into a
//! `Debug`-based fallback key instead:
//!
//! ```rust
//! use fnmemo::DefaultCacheableKey;
//!
//! #[derive(Debug, Clone)]
//! struct Query {
//!     table: String,
//!     limit: u32,
//! }
//!
//! impl DefaultCacheableKey for Query {}
//! ```
//!
//! For full control over key derivation — ignoring a field, merging
//! two arguments into one key — build with a custom key maker instead:
//!
//! ```rust
//! use fnmemo::{CacheKey, MemoizeBuilder};
//!
//! #[derive(Debug, Clone, Hash, PartialEq, Eq)]
//! struct Request {
//!     user_id: u64,
//!     trace_id: String,
//! }
//!
//! // Two requests that only differ by trace_id would normally key
//! // separately; the custom maker keys on user_id alone instead.
//! let memo = MemoizeBuilder::new(|req: Request| req.user_id * 2)
//!     .custom_key_maker(|req: &Request| CacheKey::hashed(&req.user_id))
//!     .build::<u64>()
//!     .expect("valid configuration");
//!
//! assert_eq!(
//!     memo.call(Request { user_id: 1, trace_id: "a".into() }),
//!     memo.call(Request { user_id: 1, trace_id: "b".into() }),
//! );
//! ```
//!
//! ## Error Handling
//!
//! Building a cache can fail — a zero TTL or a bounded capacity
//! without an eviction algorithm are rejected up front rather than
//! panicking later:
//!
//! ```rust
//! use fnmemo::{Capacity, MemoizeBuilder};
//! use std::time::Duration;
//!
//! let err = MemoizeBuilder::new(|n: i32| n)
//!     .ttl(Duration::ZERO)
//!     .build::<i32, i32>()
//!     .err()
//!     .unwrap();
//!
//! assert!(err.to_string().contains("ttl"));
//! ```
//!
//! `#[memoize]`-attached functions build their cache lazily on first
//! call and panic on a misconfigured attribute, since there is no
//! caller in scope to hand a `Result` back to — validate configuration
//! with [`MemoizeBuilder`] directly if that's a concern.

pub use fnmemo_core::validator;
pub use fnmemo_core::{
    default_cache_key, Algorithm, ArgumentError, CacheInfo, CacheKey, CacheStats, CacheValue,
    CacheableKey, Capacity, ConfigurationError, CustomKeyedBuilder, DefaultCacheableKey, Engine,
    KeyBuilder, Kwargs, MemoizeBuilder, Memoized,
};
pub use fnmemo_macros::memoize;

/// Re-exported so `#[memoize]`'s generated code can reach the `Lazy`
/// type it expands to without requiring callers to depend on
/// `once_cell` themselves.
#[doc(hidden)]
pub use once_cell;

/// Re-exported so `#[memoize]`'s generated zero-argument-function
/// warning can reach `tracing::warn!` without requiring callers to
/// depend on `tracing` themselves.
#[doc(hidden)]
pub use tracing;
