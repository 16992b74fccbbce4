//! Error types for the cache contract.

use std::fmt;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Usage errors raised by the shared cache layer.
///
/// Both variants are caller errors, raised before any backend primitive is
/// invoked. They are never transient and never retried internally. Operational
/// backend failures (storage I/O, connection loss) are *not* part of this
/// taxonomy: backends report them through their primitive return values
/// (`None` for a failed read, `false` for a failed write or delete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The cache key is empty.
    ///
    /// Keys must be non-empty strings. The offending key is carried in the
    /// variant and has already been logged at error level when this is
    /// returned. Batch operations validate every key up front, so a single
    /// bad key aborts the whole batch before any backend call.
    InvalidKey(String),

    /// The TTL is not representable as a non-negative seconds count.
    ///
    /// Raised for zero or negative second counts, and for calendar intervals
    /// that cannot be resolved against the current instant (arithmetic
    /// overflow). `None` is always a valid TTL and means "no expiry, or
    /// defer to the backend default".
    InvalidTtl(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKey(key) => write!(f, "invalid cache key: {:?}", key),
            Error::InvalidTtl(msg) => write!(f, "invalid ttl: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidKey("".to_string());
        assert_eq!(err.to_string(), "invalid cache key: \"\"");

        let err = Error::InvalidTtl("ttl must be greater than zero, got 0".to_string());
        assert_eq!(
            err.to_string(),
            "invalid ttl: ttl must be greater than zero, got 0"
        );
    }
}
