//! Filesystem cache backend.
//!
//! Stores one file per key under the directory given by
//! [`CacheOptions::filestorage`](crate::CacheOptions). The key is hashed
//! (SHA-256, hex) into the file name, so arbitrary key bytes never reach the
//! filesystem; the first two hex characters form a fan-out subdirectory.
//!
//! Entry layout: an 8-byte little-endian expiry timestamp (unix seconds,
//! `0` = no expiry) followed by the raw payload. Expired or unreadable
//! entries are treated as misses and removed on access.

use super::CacheBackend;
use crate::options::CacheOptions;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::fs;

const EXPIRY_HEADER_LEN: usize = 8;

/// Filesystem-backed cache.
///
/// # Example
///
/// ```no_run
/// use cache_core::backend::{CacheBackend, FileBackend};
/// use cache_core::CacheOptions;
///
/// #[tokio::main]
/// async fn main() {
///     let backend = FileBackend::new(&CacheOptions::default());
///     backend.set("key", b"value".to_vec(), None).await;
/// }
/// ```
#[derive(Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a file backend rooted at the options' storage directory.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(options: &CacheOptions) -> Self {
        FileBackend {
            root: options.filestorage.clone(),
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        self.root.join(&digest[..2]).join(digest)
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

impl CacheBackend for FileBackend {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(key);

        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("✓ File GET {} -> MISS", key);
                return None;
            }
            Err(e) => {
                warn!("File GET {} failed: {}", key, e);
                return None;
            }
        };

        if raw.len() < EXPIRY_HEADER_LEN {
            // Truncated entry, drop it
            warn!("File GET {} -> corrupt entry, evicting", key);
            let _ = fs::remove_file(&path).await;
            return None;
        }

        let (header, payload) = raw.split_at(EXPIRY_HEADER_LEN);
        let expires_at = u64::from_le_bytes(header.try_into().ok()?);

        if expires_at != 0 && expires_at <= Self::now_secs() {
            debug!("✓ File GET {} -> EXPIRED", key);
            let _ = fs::remove_file(&path).await;
            return None;
        }

        debug!("✓ File GET {} -> HIT", key);
        Some(payload.to_vec())
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> bool {
        let path = self.entry_path(key);

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent).await {
                warn!("File SET {} failed to create {}: {}", key, parent.display(), e);
                return false;
            }
        }

        let expires_at = ttl
            .map(|d| Self::now_secs().saturating_add(d.as_secs()))
            .unwrap_or(0);

        let mut raw = Vec::with_capacity(EXPIRY_HEADER_LEN + value.len());
        raw.extend_from_slice(&expires_at.to_le_bytes());
        raw.extend_from_slice(&value);

        match fs::write(&path, raw).await {
            Ok(()) => {
                debug!("✓ File SET {}", key);
                true
            }
            Err(e) => {
                warn!("File SET {} failed: {}", key, e);
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => {
                debug!("✓ File DELETE {}", key);
                true
            }
            // Deleting an absent key is a success
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => {
                warn!("File DELETE {} failed: {}", key, e);
                false
            }
        }
    }

    async fn clear(&self) -> bool {
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => {
                warn!("⚠ File CLEAR executed - {} removed!", self.root.display());
                true
            }
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => {
                warn!("File CLEAR failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backend_in(dir: &TempDir) -> FileBackend {
        FileBackend::new(&CacheOptions {
            filestorage: dir.path().join("cache"),
        })
    }

    #[tokio::test]
    async fn test_file_backend_roundtrip() {
        let dir = TempDir::new().expect("tempdir");
        let backend = backend_in(&dir);

        assert!(backend.set("key1", b"value1".to_vec(), None).await);
        assert_eq!(backend.get("key1").await, Some(b"value1".to_vec()));

        assert!(backend.delete("key1").await);
        assert_eq!(backend.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_file_backend_miss_on_empty_store() {
        let dir = TempDir::new().expect("tempdir");
        let backend = backend_in(&dir);

        assert_eq!(backend.get("nonexistent").await, None);
    }

    #[tokio::test]
    async fn test_file_backend_delete_absent_succeeds() {
        let dir = TempDir::new().expect("tempdir");
        let backend = backend_in(&dir);

        assert!(backend.delete("nonexistent").await);
    }

    #[tokio::test]
    async fn test_file_backend_expiry() {
        let dir = TempDir::new().expect("tempdir");
        let backend = backend_in(&dir);

        backend
            .set("key1", b"value1".to_vec(), Some(Duration::from_secs(1)))
            .await;
        assert!(backend.get("key1").await.is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(backend.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_file_backend_clear() {
        let dir = TempDir::new().expect("tempdir");
        let backend = backend_in(&dir);

        backend.set("key1", b"value1".to_vec(), None).await;
        backend.set("key2", b"value2".to_vec(), None).await;

        assert!(backend.clear().await);
        assert_eq!(backend.get("key1").await, None);
        assert_eq!(backend.get("key2").await, None);
    }

    #[tokio::test]
    async fn test_file_backend_clear_on_missing_root_succeeds() {
        let dir = TempDir::new().expect("tempdir");
        let backend = backend_in(&dir);

        assert!(backend.clear().await);
    }

    #[tokio::test]
    async fn test_file_backend_corrupt_entry_is_a_miss() {
        let dir = TempDir::new().expect("tempdir");
        let backend = backend_in(&dir);

        backend.set("key1", b"value1".to_vec(), None).await;

        // Truncate the entry below the header size
        let path = backend.entry_path("key1");
        std::fs::write(&path, b"xx").expect("truncate entry");

        assert_eq!(backend.get("key1").await, None);
        assert!(!path.exists(), "corrupt entry should be evicted");
    }

    #[tokio::test]
    async fn test_file_backend_survives_reopen() {
        let dir = TempDir::new().expect("tempdir");

        backend_in(&dir).set("key1", b"value1".to_vec(), None).await;

        let reopened = backend_in(&dir);
        assert_eq!(reopened.get("key1").await, Some(b"value1".to_vec()));
    }
}
