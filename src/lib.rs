//! # cache-core
//!
//! A backend-agnostic key-value cache contract with shared behavior.
//!
//! ## Features
//!
//! - **Backend Agnostic:** A backend implements four primitives
//!   (`get`/`set`/`delete`/`clear`); everything else is derived
//! - **Derived Operations:** `has`, `get_multiple`, `set_multiple` and
//!   `delete_multiple` are built once, on top of the primitives, and reused
//!   by every backend
//! - **Validated Input:** Keys are checked and TTLs normalized before any
//!   backend call; invalid input fails fast with a dedicated error kind
//! - **Calendar TTLs:** A TTL can be absolute seconds or a calendar interval
//!   ("1 month from now") resolved against the current instant
//! - **Opaque Payloads:** Values are raw bytes; serialization stays with the
//!   caller
//!
//! ## Quick Start
//!
//! ```ignore
//! use cache_core::{CacheCore, Ttl, backend::InMemoryBackend};
//!
//! let cache = CacheCore::new(InMemoryBackend::new());
//!
//! cache.set("user:1", b"alice".to_vec(), Some(Ttl::Seconds(300))).await?;
//! assert!(cache.has("user:1").await?);
//!
//! let users = cache
//!     .get_multiple(["user:1", "user:2"], Some(b"unknown"))
//!     .await?;
//! ```
//!
//! ## Writing a backend
//!
//! Implement [`CacheBackend`] for your storage and hand it to
//! [`CacheCore::new`]. Operational failures are reported through the
//! primitive return values (`None`/`false`), never through this crate's
//! error type, which is reserved for caller mistakes.
//!
//! ```ignore
//! use cache_core::backend::CacheBackend;
//! use std::time::Duration;
//!
//! #[derive(Clone)]
//! struct MyBackend { /* connection, options, ... */ }
//!
//! impl CacheBackend for MyBackend {
//!     async fn get(&self, key: &str) -> Option<Vec<u8>> { todo!() }
//!     async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> bool { todo!() }
//!     async fn delete(&self, key: &str) -> bool { todo!() }
//!     async fn clear(&self) -> bool { todo!() }
//! }
//! ```

#[macro_use]
extern crate log;

pub mod backend;
pub mod core;
pub mod error;
pub mod key;
pub mod observability;
pub mod options;
pub mod ttl;

// Re-exports for convenience
pub use backend::CacheBackend;
pub use crate::core::CacheCore;
pub use error::{Error, Result};
pub use observability::{CacheMetrics, NoOpMetrics};
pub use options::CacheOptions;
pub use ttl::{CalendarInterval, Ttl};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
