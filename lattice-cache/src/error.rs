//! Error types for cache operations.

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-specific errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Cannot reach the backend.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Connection checkout failed.
    #[error("Pool error: {0}")]
    Pool(String),

    /// Required key or field was absent. Plain reads express absence as
    /// `Ok(None)`; this variant is reserved for callers that treat absence
    /// as failure.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Value could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Stored payload does not match the requested shape.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Keyspace enumeration failed mid bulk-delete.
    #[error("Scan failed: {0}")]
    Scan(String),

    /// Command deadline elapsed.
    #[error("Operation timed out")]
    Timeout,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Underlying Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

impl CacheError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout | Self::Pool(_))
    }
}

impl From<lattice_redis::RedisError> for CacheError {
    fn from(err: lattice_redis::RedisError) -> Self {
        use lattice_redis::RedisError;
        match err {
            RedisError::Connection(e) => Self::Connection(e),
            RedisError::Pool(e) => Self::Pool(e),
            RedisError::Config(e) => Self::Config(e),
            RedisError::Timeout => Self::Timeout,
            RedisError::Redis(e) => Self::Redis(e),
        }
    }
}
