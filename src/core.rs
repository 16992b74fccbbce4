//! Shared cache core - derived operations over the backend primitives.
//!
//! [`CacheCore`] implements every operation that can be expressed generically
//! in terms of the four [`CacheBackend`] primitives: existence checks derived
//! from `get`, multi-key reads/writes/deletes fanned out one primitive call
//! per key, and the aggregate success reduction over a batch. Backends only
//! ever implement the primitives; this type is reused unchanged by all of
//! them.
//!
//! Batch operations are best-effort, not atomic: a failure partway through
//! `set_multiple`/`delete_multiple` leaves earlier per-key writes applied,
//! and the aggregate `false` does not say which key failed. Callers needing
//! per-key detail use the single-key operations.

use crate::backend::CacheBackend;
use crate::error::Result;
use crate::key;
use crate::observability::{CacheMetrics, NoOpMetrics};
use crate::ttl::{self, Ttl};
use std::time::Instant;

/// The shared cache layer over a backend's four primitives.
///
/// Holds the backend and an injected metrics sink (no-op by default).
/// Stateless across calls otherwise.
///
/// # Example
///
/// ```ignore
/// use cache_core::{CacheCore, backend::InMemoryBackend};
///
/// let cache = CacheCore::new(InMemoryBackend::new());
/// cache.set("greeting", b"hello".to_vec(), None).await?;
/// assert!(cache.has("greeting").await?);
/// ```
pub struct CacheCore<B: CacheBackend> {
    backend: B,
    metrics: Box<dyn CacheMetrics>,
}

impl<B: CacheBackend> CacheCore<B> {
    /// Create a new cache core over the given backend.
    pub fn new(backend: B) -> Self {
        CacheCore {
            backend,
            metrics: Box::new(NoOpMetrics),
        }
    }

    /// Set a custom metrics sink.
    pub fn with_metrics(mut self, metrics: Box<dyn CacheMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Retrieve the payload stored under `key`.
    ///
    /// `None` means absent (or expired, or a failed backend read) and is
    /// distinct from any storable payload, including an empty one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`](crate::Error::InvalidKey) if the key is empty;
    /// the backend is not called in that case.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check_key(key)?;

        let timer = Instant::now();
        let value = self.backend.get(key).await;

        match value {
            Some(_) => self.metrics.record_hit(key, timer.elapsed()),
            None => self.metrics.record_miss(key, timer.elapsed()),
        }

        Ok(value)
    }

    /// Retrieve the payload stored under `key`, or `default` if absent.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`](crate::Error::InvalidKey) if the key is empty.
    pub async fn get_or(&self, key: &str, default: Vec<u8>) -> Result<Vec<u8>> {
        Ok(self.get(key).await?.unwrap_or(default))
    }

    /// Check whether `key` holds a value.
    ///
    /// Existence is defined purely as retrievability: this is `get`
    /// returning `Some`, never a separate backend call.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`](crate::Error::InvalidKey) if the key is empty.
    pub async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Store `value` under `key` with an optional TTL.
    ///
    /// Returns the backend's verdict: `false` means the write failed
    /// operationally.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`](crate::Error::InvalidKey) for an empty key,
    /// [`Error::InvalidTtl`](crate::Error::InvalidTtl) for a zero/negative
    /// or unresolvable TTL. Validation happens before any backend call.
    pub async fn set(
        &self,
        key: &str,
        value: impl Into<Vec<u8>>,
        ttl: Option<Ttl>,
    ) -> Result<bool> {
        self.check_key(key)?;
        let ttl = ttl::normalize(ttl)?;

        let timer = Instant::now();
        let ok = self.backend.set(key, value.into(), ttl).await;
        self.metrics.record_set(key, timer.elapsed());

        Ok(ok)
    }

    /// Remove the entry under `key`.
    ///
    /// Returns the backend's verdict; deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`](crate::Error::InvalidKey) if the key is empty.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.check_key(key)?;

        let timer = Instant::now();
        let ok = self.backend.delete(key).await;
        self.metrics.record_delete(key, timer.elapsed());

        Ok(ok)
    }

    /// Wipe the whole backend. Pass-through, not decomposed per key.
    pub async fn clear(&self) -> bool {
        self.backend.clear().await
    }

    /// Fetch several keys, one `get` per key, in input order.
    ///
    /// Missing keys take `default` (cloned per key). A repeated key is
    /// fetched again but appears once in the result, keeping its first
    /// position with the last fetched value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`](crate::Error::InvalidKey) if any key is empty.
    /// The whole batch is validated eagerly; nothing is fetched on failure.
    pub async fn get_multiple<I, K>(
        &self,
        keys: I,
        default: Option<&[u8]>,
    ) -> Result<Vec<(String, Option<Vec<u8>>)>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        // Materialize before validating so a bad key aborts before any fetch
        let keys: Vec<K> = keys.into_iter().collect();
        self.check_keys(&keys)?;

        let mut data: Vec<(String, Option<Vec<u8>>)> = Vec::with_capacity(keys.len());

        for key in &keys {
            let key = key.as_ref();
            let value = self
                .get(key)
                .await?
                .or_else(|| default.map(|d| d.to_vec()));

            match data.iter_mut().find(|(k, _)| k == key) {
                Some((_, slot)) => *slot = value,
                None => data.push((key.to_string(), value)),
            }
        }

        Ok(data)
    }

    /// Store several key-payload pairs, one `set` per pair, in input order.
    ///
    /// The TTL is normalized once and applied uniformly to the whole batch.
    /// Returns true only if every individual `set` succeeded; a failed key
    /// does not skip the remaining ones, and earlier writes are not rolled
    /// back. An empty batch is vacuously successful.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`](crate::Error::InvalidKey) if any key is empty,
    /// [`Error::InvalidTtl`](crate::Error::InvalidTtl) for a bad TTL; both
    /// abort the batch before any backend call.
    pub async fn set_multiple<I, K, V>(&self, values: I, ttl: Option<Ttl>) -> Result<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Vec<u8>>,
    {
        let values: Vec<(K, V)> = values.into_iter().collect();

        for (key, _) in &values {
            self.check_key(key.as_ref())?;
        }
        let ttl = ttl::normalize(ttl)?;

        let mut results = Vec::with_capacity(values.len());

        for (key, value) in values {
            let key = key.as_ref();
            let timer = Instant::now();
            let ok = self.backend.set(key, value.into(), ttl).await;
            self.metrics.record_set(key, timer.elapsed());
            results.push(ok);
        }

        Ok(all_succeeded(&results))
    }

    /// Delete several keys, one `delete` per key, in input order.
    ///
    /// Same best-effort aggregate semantics as
    /// [`set_multiple`](Self::set_multiple).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`](crate::Error::InvalidKey) if any key is empty;
    /// the batch aborts before any backend call.
    pub async fn delete_multiple<I, K>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        self.check_keys(&keys)?;

        let mut results = Vec::with_capacity(keys.len());

        for key in &keys {
            let key = key.as_ref();
            let timer = Instant::now();
            let ok = self.backend.delete(key).await;
            self.metrics.record_delete(key, timer.elapsed());
            results.push(ok);
        }

        Ok(all_succeeded(&results))
    }

    fn check_key(&self, key: &str) -> Result<()> {
        match key::check_key(key) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.metrics.record_error(key, &e.to_string());
                Err(e)
            }
        }
    }

    fn check_keys<K: AsRef<str>>(&self, keys: &[K]) -> Result<()> {
        for key in keys {
            self.check_key(key.as_ref())?;
        }

        Ok(())
    }
}

/// Reduce per-key outcomes into the aggregate batch result.
///
/// True iff every outcome is true; vacuously true for an empty batch.
fn all_succeeded(results: &[bool]) -> bool {
    results.iter().all(|ok| *ok)
}
