//! Cache backend implementations.

use std::time::Duration;

#[cfg(feature = "filesystem")]
pub mod file;
#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "filesystem")]
pub use file::FileBackend;
#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryBackend;

/// Trait for cache backend implementations.
///
/// A backend supplies exactly four primitives; every multi-key and
/// existence operation is derived from them by
/// [`CacheCore`](crate::CacheCore), so implementing this trait is all a new
/// storage backend has to do.
///
/// Operational failures (I/O errors, lost connections) are expressed
/// through the return values: a failed read is a miss (`None`), a failed
/// write or delete is `false`. Keys reaching a backend have already been
/// validated and TTLs already normalized; backends never see an empty key
/// or a zero/negative TTL.
///
/// **IMPORTANT:** All methods use `&self` instead of `&mut self` to allow
/// concurrent access. Backend implementations should use interior mutability
/// (RwLock, Mutex, or external storage).
///
/// **ASYNC:** All methods are async and must be awaited.
#[allow(async_fn_in_trait)]
pub trait CacheBackend: Send + Sync + Clone {
    /// Retrieve the stored payload for a key.
    ///
    /// # Returns
    /// - `Some(bytes)` - Value found in cache
    /// - `None` - Cache miss, expired entry, or read failure
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a payload with an already-normalized TTL.
    ///
    /// `ttl` of `None` means no expiry (or the backend's own default).
    /// Returns `false` if the write failed.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> bool;

    /// Remove the entry for a key.
    ///
    /// Returns `false` if the removal failed. Deleting an absent key is a
    /// success.
    async fn delete(&self, key: &str) -> bool;

    /// Wipe the whole backend.
    ///
    /// Returns `false` if the wipe failed.
    async fn clear(&self) -> bool;
}
