//! Turns `(capacity, algorithm)` into a concrete engine. A pure
//! function of its inputs — the original's `get_cache_toolkit`
//! dict-lookup, reworked as a `match`.

use crate::engine::fifo::FifoEngine;
use crate::engine::lfu::LfuEngine;
use crate::engine::lru::LruEngine;
use crate::engine::plain::PlainEngine;
use crate::engine::stats_only::StatsOnlyEngine;
use crate::engine::Engine;
use crate::error::ConfigurationError;
use crate::stats::Algorithm;

/// How much storage a wrapper is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// `max_size = 0`: statistics only, nothing is ever stored.
    Zero,
    /// `max_size = n`: one of the bounded replacement engines.
    Bounded(usize),
    /// No `max_size`: the plain unbounded engine.
    Unbounded,
}

/// Builds the engine for a `(capacity, algorithm)` pair. `algorithm`
/// is only consulted for `Capacity::Bounded`; a bounded cache whose
/// algorithm isn't one of `Fifo`/`Lru`/`Lfu` fails construction, the
/// same way the original raises `KeyError('Unrecognized caching
/// algorithm flag')` for a flag with no registered toolkit.
pub fn select<A, R>(
    capacity: Capacity,
    algorithm: Algorithm,
) -> Result<Box<dyn Engine<A, R> + Send>, ConfigurationError>
where
    A: Send + 'static,
    R: Send + 'static,
{
    match capacity {
        Capacity::Zero => Ok(Box::new(StatsOnlyEngine::new())),
        Capacity::Unbounded => Ok(Box::new(PlainEngine::new())),
        Capacity::Bounded(n) => match algorithm {
            Algorithm::Fifo => Ok(Box::new(FifoEngine::new(n))),
            Algorithm::Lru => Ok(Box::new(LruEngine::new(n))),
            Algorithm::Lfu => Ok(Box::new(LfuEngine::new(n))),
            Algorithm::Plain | Algorithm::StatsOnly => {
                Err(ConfigurationError::UnknownAlgorithm(algorithm.to_string()))
            }
        },
    }
}

/// The `Algorithm` a selected engine actually reports in `cache_info`,
/// independent of what the caller asked for with `capacity` — e.g. a
/// `Capacity::Zero` request always reports `Algorithm::StatsOnly`
/// regardless of the `algorithm` option passed alongside it.
pub fn resolved_algorithm(capacity: Capacity, requested: Algorithm) -> Algorithm {
    match capacity {
        Capacity::Zero => Algorithm::StatsOnly,
        Capacity::Unbounded => Algorithm::Plain,
        Capacity::Bounded(_) => requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_ignores_algorithm() {
        let engine = select::<i32, i32>(Capacity::Zero, Algorithm::Lru).unwrap();
        assert_eq!(engine.max_size(), Some(0));
    }

    #[test]
    fn unbounded_capacity_is_plain() {
        let engine = select::<i32, i32>(Capacity::Unbounded, Algorithm::Fifo).unwrap();
        assert_eq!(engine.max_size(), None);
    }

    #[test]
    fn bounded_with_non_eviction_algorithm_fails() {
        let result = select::<i32, i32>(Capacity::Bounded(10), Algorithm::Plain);
        assert!(result.is_err());
    }
}
