//! Backend configuration container.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backend-specific settings, opaque to the shared cache layer.
///
/// The core never reads these; a backend consumes them at construction.
/// Currently the only setting is the storage directory used by the
/// filesystem backend.
///
/// # Example
///
/// ```
/// use cache_core::CacheOptions;
///
/// let options = CacheOptions {
///     filestorage: "/var/cache/myapp".into(),
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    /// Directory the filesystem backend stores its entries in.
    pub filestorage: PathBuf,
}

impl Default for CacheOptions {
    fn default() -> Self {
        CacheOptions {
            filestorage: std::env::temp_dir().join("cache-core"),
        }
    }
}
