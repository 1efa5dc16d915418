//! # Lattice Redis
//!
//! Redis client integration with connection pooling for the lattice service
//! packages.
//!
//! ## Features
//!
//! - **Connection Pooling**: Efficient connection management with bb8
//! - **Environment Configuration**: `REDIS_*` environment variables
//! - **TLS**: Optional `rediss://` transport via the `tls` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lattice_redis::{RedisConfig, RedisPoolBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RedisConfig::builder()
//!         .url("redis://localhost:6379")
//!         .pool_size(10)
//!         .build();
//!
//!     let pool = RedisPoolBuilder::new(config).build().await?;
//!
//!     let mut conn = pool.get().await?;
//!     redis::cmd("SET")
//!         .arg("key")
//!         .arg("value")
//!         .query_async(&mut *conn)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod pool;

pub use config::{RedisConfig, RedisConfigBuilder};
pub use error::{RedisError, Result};
pub use pool::{RedisPool, RedisPoolBuilder};

// Re-export redis crate for convenience
pub use redis;
pub use redis::{AsyncCommands, RedisResult, Value};

/// Prelude for common imports.
///
/// ```
/// use lattice_redis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{RedisConfig, RedisConfigBuilder};
    pub use crate::error::{RedisError, Result};
    pub use crate::pool::{RedisPool, RedisPoolBuilder};
    pub use redis::AsyncCommands;
}
