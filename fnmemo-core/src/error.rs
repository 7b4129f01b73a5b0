//! Error types raised while configuring or introspecting a memoized
//! function. The underlying function's own errors are never wrapped
//! here — they propagate through [`crate::wrapper::Memoized::call`]
//! untouched.

use thiserror::Error;

/// Raised when [`crate::wrapper::MemoizeBuilder::build`] is given an
/// option set that cannot be turned into a working cache.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `ttl` was present but not strictly positive.
    #[error("ttl must be a positive duration, got {0:?}")]
    NegativeOrZeroTtl(std::time::Duration),

    /// The macro surface was given an algorithm name it doesn't
    /// recognize. The builder surface can't hit this case — its
    /// `algorithm` option is a closed enum — so it only fires from
    /// `#[memoize(algorithm = "...")]`.
    #[error("unrecognized caching algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// Reserved for a future dynamic key-maker constructor; the
    /// current `custom_key_maker` option is statically typed and can't
    /// produce this variant.
    #[error("custom key maker is not callable with the expected signature")]
    InvalidCustomKeyMaker,
}

/// Reserved for a future dynamically-typed argument descriptor; the
/// current `cache_contains_argument` takes the function's own argument
/// type directly, so a mismatched arity can't arise.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("argument descriptor does not match the function's arity")]
    MalformedDescriptor,
}
