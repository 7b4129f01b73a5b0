//! Core caching engines, key building, and statistics behind the
//! `fnmemo` memoization facade.
//!
//! Most users should depend on the `fnmemo` crate instead, which
//! re-exports this one alongside the `#[memoize]` attribute. This
//! crate is useful on its own when you want to build a `Memoized`
//! directly with [`wrapper::MemoizeBuilder`] rather than through the
//! macro.

pub mod engine;
pub mod error;
pub mod key;
pub mod lock;
pub mod selector;
pub mod stats;
pub mod validator;
pub mod value;
pub mod wrapper;

pub use engine::Engine;
pub use error::{ArgumentError, ConfigurationError};
pub use key::{default_cache_key, CacheKey, CacheableKey, DefaultCacheableKey, KeyBuilder, Kwargs};
pub use selector::Capacity;
pub use stats::{Algorithm, CacheInfo, CacheStats};
pub use value::CacheValue;
pub use wrapper::{CustomKeyedBuilder, MemoizeBuilder, Memoized};
