//! Cache store trait definition.

use crate::error::CacheResult;
use async_trait::async_trait;
use std::time::Duration;

/// Contract every cache backend implements.
///
/// Payloads cross this boundary as serialized JSON strings; the typed
/// [`Cache`](crate::Cache) facade layers serde on top. Implementations own
/// key namespacing and instrumentation, so callers never see physical keys.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the payload stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent. When a `tag` is supplied,
    /// a hit or miss is counted against it and read latency is recorded.
    async fn get(&self, key: &str, tag: Option<&str>) -> CacheResult<Option<String>>;

    /// Store `value` under `key`.
    ///
    /// `ttl` of `None` means the entry never expires (unless the backend's
    /// configured default TTL applies). Failures are logged and propagated.
    async fn set(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
        tag: Option<&str>,
    ) -> CacheResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    async fn del(&self, key: &str) -> CacheResult<()>;

    /// Fetch one field of the hash stored under `key`.
    ///
    /// Returns `Ok(None)` when the hash or the field is absent.
    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<String>>;

    /// Write one field of the hash under `key`, then apply `ttl` to the
    /// whole hash.
    ///
    /// Two-step operation: if the field write succeeds and the expiration
    /// write fails, the field change is retained and the expiration error is
    /// returned.
    async fn hset(
        &self,
        key: &str,
        field: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> CacheResult<()>;

    /// Delete every field of the hash stored under `key`.
    ///
    /// Succeeds when the hash has no fields.
    async fn remove_hash_key(&self, key: &str) -> CacheResult<()>;

    /// Delete every key matching `pattern` (a Redis glob), in batches.
    ///
    /// The pattern is namespaced before use, so it can only ever match keys
    /// in this backend's namespace. Not transactional: an enumeration error
    /// aborts the operation, and keys deleted by earlier batches stay
    /// deleted.
    async fn del_keys_with_pattern(&self, pattern: &str) -> CacheResult<()>;
}
