//! Tags a cached result with an optional TTL deadline.
//!
//! Mirrors `cachelito-core`'s `CacheEntry::is_expired`, but folds the
//! deadline into the value itself instead of threading a separate
//! `ttl: Option<Duration>` through every engine method: an engine only
//! ever needs to ask a `CacheValue` "is this still good?" or "give me
//! the wrapped result," never "what was the TTL for this entry?"

use std::time::{Duration, Instant};

/// A cached result, optionally carrying an expiry deadline.
///
/// An expired value is not removed automatically — see spec §4.2 /
/// §9's lazy-expiry rule — it is replaced the next time a lookup
/// misses (because [`CacheValue::is_valid`] says no) or removed in
/// bulk by `cache_remove_if`.
#[derive(Debug, Clone)]
pub enum CacheValue<R> {
    Bare(R),
    Timed(R, Instant),
}

impl<R> CacheValue<R> {
    pub fn bare(result: R) -> Self {
        CacheValue::Bare(result)
    }

    pub fn timed(result: R, ttl: Duration) -> Self {
        CacheValue::Timed(result, Instant::now() + ttl)
    }

    pub fn new(result: R, ttl: Option<Duration>) -> Self {
        match ttl {
            Some(ttl) => Self::timed(result, ttl),
            None => Self::bare(result),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            CacheValue::Bare(_) => true,
            CacheValue::Timed(_, deadline) => Instant::now() < *deadline,
        }
    }

    pub fn get(&self) -> &R {
        match self {
            CacheValue::Bare(r) => r,
            CacheValue::Timed(r, _) => r,
        }
    }

    pub fn into_inner(self) -> R {
        match self {
            CacheValue::Bare(r) => r,
            CacheValue::Timed(r, _) => r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn bare_value_never_expires() {
        let v = CacheValue::bare(42);
        assert!(v.is_valid());
    }

    #[test]
    fn timed_value_expires_after_ttl() {
        let v = CacheValue::timed(42, Duration::from_millis(10));
        assert!(v.is_valid());
        sleep(Duration::from_millis(30));
        assert!(!v.is_valid());
    }

    #[test]
    fn into_inner_unwraps_either_variant() {
        assert_eq!(CacheValue::bare(7).into_inner(), 7);
        assert_eq!(CacheValue::timed(7, Duration::from_secs(1)).into_inner(), 7);
    }
}
