//! Reduces a function call's arguments to a single, comparable
//! [`CacheKey`].
//!
//! Python's `_make_key` tries a fast hashable path and falls back to
//! `str(key)` on `TypeError`. Rust has no such runtime escape hatch —
//! hashability is a static property of a type — so the fallback becomes
//! a choice the argument type makes once, by which trait it implements.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

/// A cache key: either a precomputed hash paired with the textual
/// representation it was derived from (the common, fast path), or a
/// bare textual key (the fallback path, and the only path for
/// arguments that can't implement [`Hash`]).
///
/// The stored hash is never recomputed on lookup; [`Hash for CacheKey`]
/// simply replays it. Equality still compares the full representation,
/// so a hash collision can never be mistaken for a match.
#[derive(Debug, Clone)]
pub enum CacheKey {
    Hashed(HashedKey),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct HashedKey {
    hash: u64,
    repr: String,
}

impl CacheKey {
    pub fn hashed<T: Hash + Debug>(value: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        CacheKey::Hashed(HashedKey {
            hash: hasher.finish(),
            repr: format!("{value:?}"),
        })
    }

    pub fn text<T: Debug>(value: &T) -> Self {
        CacheKey::Text(format!("{value:?}"))
    }

    /// The textual representation, used for diagnostics and as the
    /// sort key when building order-independent keyword keys.
    pub fn repr(&self) -> &str {
        match self {
            CacheKey::Hashed(h) => &h.repr,
            CacheKey::Text(s) => s,
        }
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.repr() == other.repr()
    }
}
impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            CacheKey::Hashed(h) => state.write_u64(h.hash),
            CacheKey::Text(s) => s.hash(state),
        }
    }
}

/// Implemented by a function's argument tuple (or a macro-generated
/// argument struct) to describe how it turns into a [`CacheKey`].
///
/// The blanket implementation below covers the common case: any
/// argument type that is itself `Hash + Eq + Debug` gets the fast
/// precomputed-hash path for free, exactly as a tuple of hashable
/// positional arguments would. A type that can't implement `Hash`
/// (the Rust analogue of Python's unhashable `list`/`dict` arguments)
/// implements `CacheableKey` by hand and returns [`CacheKey::text`].
pub trait CacheableKey {
    fn to_cache_key(&self) -> CacheKey;

    /// Used when the wrapper's `order_independent` option is set.
    /// Defaults to the same key as the order-dependent path; types
    /// with genuine keyword-style fields (see [`Kwargs`]) override
    /// this to sort before hashing.
    fn to_cache_key_order_independent(&self) -> CacheKey {
        self.to_cache_key()
    }
}

impl<T: Hash + Eq + Debug> CacheableKey for T {
    fn to_cache_key(&self) -> CacheKey {
        CacheKey::hashed(self)
    }
}

/// Marker trait for argument types that would rather not implement
/// `Hash`/`Eq` at all and are content with the textual fallback key.
/// Pairs with [`default_cache_key`]: a type implements both this
/// marker and `CacheableKey` by delegating to the helper, the Rust
/// equivalent of writing `impl DefaultCacheableKey for User {}` and
/// getting the stringified fallback for free.
///
/// ```
/// # use fnmemo_core::key::{CacheableKey, CacheKey, DefaultCacheableKey, default_cache_key};
/// #[derive(Debug)]
/// struct User { id: u64 }
/// impl DefaultCacheableKey for User {}
/// impl CacheableKey for User {
///     fn to_cache_key(&self) -> CacheKey { default_cache_key(self) }
/// }
/// ```
pub trait DefaultCacheableKey: Debug {}

/// The textual fallback key shared by every [`DefaultCacheableKey`]
/// implementor.
pub fn default_cache_key<T: DefaultCacheableKey>(value: &T) -> CacheKey {
    CacheKey::text(value)
}

/// An explicit keyword-argument bag: `(name, value)` pairs preserving
/// call order. Used by macro-generated wrappers for functions that
/// have keyword-like trailing arguments, so `order_independent` has
/// something concrete to sort.
#[derive(Debug, Clone)]
pub struct Kwargs(pub Vec<(&'static str, CacheKey)>);

impl CacheableKey for Kwargs {
    fn to_cache_key(&self) -> CacheKey {
        let repr = self
            .0
            .iter()
            .map(|(name, key)| format!("{name}={}", key.repr()))
            .collect::<Vec<_>>()
            .join(",");
        CacheKey::Text(repr)
    }

    fn to_cache_key_order_independent(&self) -> CacheKey {
        let mut sorted: Vec<_> = self.0.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);
        let repr = sorted
            .iter()
            .map(|(name, key)| format!("{name}={}", key.repr()))
            .collect::<Vec<_>>()
            .join(",");
        CacheKey::Text(repr)
    }
}

/// Builds the final [`CacheKey`] for a call, given the wrapper's
/// `order_independent` setting. This is the only place that setting is
/// consulted; everything downstream just sees a `CacheKey`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyBuilder {
    pub order_independent: bool,
}

impl KeyBuilder {
    pub fn build<A: CacheableKey>(&self, args: &A) -> CacheKey {
        if self.order_independent {
            args.to_cache_key_order_independent()
        } else {
            args.to_cache_key()
        }
    }
}
