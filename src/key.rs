//! Cache key validation.
//!
//! Every operation on [`CacheCore`](crate::CacheCore) validates its keys here
//! before touching the backend. A key must be a non-empty string; the type
//! system already guarantees string-ness, so the only runtime rule left is
//! non-emptiness.

use crate::error::{Error, Result};

/// Validate a single cache key.
///
/// Logs the offending key at error level and returns [`Error::InvalidKey`]
/// if the key is empty. No backend call happens after a validation failure.
pub fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        error!("invalid cache key: {:?}", key);
        return Err(Error::InvalidKey(key.to_string()));
    }

    Ok(())
}
