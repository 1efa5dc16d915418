//! Cache facade for the lattice service packages.
//!
//! Application code reads and writes cached data through one contract
//! ([`Cache`]) while the real backend is swapped transparently: a namespaced
//! Redis store in deployed environments, an inert no-op store where no cache
//! is provisioned. The [`CacheProvider`] makes the selection once and
//! guarantees a single connection pool per process.
//!
//! # Features
//!
//! - **Key namespacing** - every physical key is prefixed with the configured
//!   namespace, isolating deployments that share one Redis
//! - **Scalar and hash operations** - with per-entry expiration delegated to
//!   Redis
//! - **Bulk pattern deletion** - cursor-driven SCAN with bounded DEL batches
//! - **Instrumentation** - hit/miss counts and operation latency by tag,
//!   disabled cleanly when no tag is supplied
//!
//! # Quick Start
//!
//! ```no_run
//! use lattice_cache::{CacheConfig, CacheProvider};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lattice_cache::CacheError> {
//!     let config = CacheConfig::from_env().with_namespace("svc");
//!     let provider = CacheProvider::new(config);
//!
//!     let cache = provider.redis_cache().await?;
//!     cache
//!         .set("user:1", &"alice", Some(Duration::from_secs(60)), Some("users"))
//!         .await?;
//!     let name: Option<String> = cache.get("user:1", Some("users")).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Without a provisioned cache
//!
//! ```
//! use lattice_cache::{CacheConfig, CacheProvider};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), lattice_cache::CacheError> {
//! let provider = CacheProvider::new(CacheConfig::default());
//!
//! // Same contract, no I/O: reads observe nothing, writes go nowhere.
//! let cache = provider.noop_cache();
//! cache.set("user:1", &"alice", None, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod noop_cache;
pub mod provider;
pub mod redis_cache;
pub mod traits;

pub use config::CacheConfig;
pub use error::{CacheError, CacheResult};
pub use manager::Cache;
pub use noop_cache::NoopCache;
pub use provider::CacheProvider;
pub use redis_cache::RedisCache;
pub use traits::CacheStore;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::CacheConfig;
    pub use crate::error::{CacheError, CacheResult};
    pub use crate::manager::Cache;
    pub use crate::noop_cache::NoopCache;
    pub use crate::provider::CacheProvider;
    pub use crate::redis_cache::RedisCache;
    pub use crate::traits::CacheStore;
}
