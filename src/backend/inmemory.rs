//! In-memory cache backend (default, thread-safe, async).
//!
//! Uses DashMap for lock-free concurrent access with per-key sharding.
//! Automatically handles TTL expiration on access.

use super::CacheBackend;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

/// In-memory cache entry with optional expiration.
struct StoredEntry {
    data: Vec<u8>,
    expires_at: Option<Instant>,
}

impl StoredEntry {
    fn new(data: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        StoredEntry { data, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// Thread-safe async in-memory cache backend.
///
/// Uses DashMap for lock-free concurrent access with fine-grained per-key
/// sharding. No async locks required - operations are non-blocking.
/// Expired entries are dropped lazily, on the access that finds them.
///
/// # Example
///
/// ```no_run
/// use cache_core::backend::{CacheBackend, InMemoryBackend};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let backend = InMemoryBackend::new();
///
///     backend.set("key1", b"value".to_vec(), None).await;
///     assert!(backend.get("key1").await.is_some());
///
///     // Store with TTL
///     backend.set("key2", b"expires".to_vec(), Some(Duration::from_secs(300))).await;
/// }
/// ```
#[derive(Clone)]
pub struct InMemoryBackend {
    store: Arc<DashMap<String, StoredEntry>>,
}

impl InMemoryBackend {
    /// Create a new in-memory cache backend.
    pub fn new() -> Self {
        InMemoryBackend {
            store: Arc::new(DashMap::new()),
        }
    }

    /// Get the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.store.get(key) {
            Some(entry) if !entry.is_expired() => {
                debug!("✓ InMemory GET {} -> HIT", key);
                return Some(entry.data.clone());
            }
            Some(entry) => {
                // Expired: release the shard guard before evicting
                drop(entry);
                self.store.remove(key);
            }
            None => {}
        }

        debug!("✓ InMemory GET {} -> MISS", key);
        None
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> bool {
        let entry = StoredEntry::new(value, ttl);
        self.store.insert(key.to_string(), entry);

        if let Some(d) = ttl {
            debug!("✓ InMemory SET {} (TTL: {:?})", key, d);
        } else {
            debug!("✓ InMemory SET {}", key);
        }

        true
    }

    async fn delete(&self, key: &str) -> bool {
        self.store.remove(key);
        debug!("✓ InMemory DELETE {}", key);
        true
    }

    async fn clear(&self) -> bool {
        self.store.clear();
        warn!("⚠ InMemory CLEAR executed - all cache cleared!");
        true
    }
}
