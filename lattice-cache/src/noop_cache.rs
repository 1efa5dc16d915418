//! Inert cache store.

use crate::error::CacheResult;
use crate::traits::CacheStore;
use async_trait::async_trait;
use std::time::Duration;
use tracing::trace;

/// A cache store that performs no I/O and always succeeds.
///
/// Stands in for the real store where no cache is provisioned (isolated test
/// runs, local tooling) so dependent code runs unmodified. Reads observe
/// nothing, writes go nowhere, and no operation ever errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new inert store.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheStore for NoopCache {
    async fn get(&self, key: &str, _tag: Option<&str>) -> CacheResult<Option<String>> {
        trace!(key, "noop cache get");
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        _value: String,
        _ttl: Option<Duration>,
        _tag: Option<&str>,
    ) -> CacheResult<()> {
        trace!(key, "noop cache set");
        Ok(())
    }

    async fn del(&self, key: &str) -> CacheResult<()> {
        trace!(key, "noop cache del");
        Ok(())
    }

    async fn hget(&self, key: &str, _field: &str) -> CacheResult<Option<String>> {
        trace!(key, "noop cache hget");
        Ok(None)
    }

    async fn hset(
        &self,
        key: &str,
        _field: &str,
        _value: String,
        _ttl: Option<Duration>,
    ) -> CacheResult<()> {
        trace!(key, "noop cache hset");
        Ok(())
    }

    async fn remove_hash_key(&self, key: &str) -> CacheResult<()> {
        trace!(key, "noop cache hash removal");
        Ok(())
    }

    async fn del_keys_with_pattern(&self, pattern: &str) -> CacheResult<()> {
        trace!(pattern, "noop cache pattern delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_never_errors_and_never_stores() {
        let cache = NoopCache::new();

        cache
            .set("user:1", "\"alice\"".into(), None, Some("users"))
            .await
            .unwrap();
        assert_eq!(cache.get("user:1", Some("users")).await.unwrap(), None);

        cache
            .hset("session:1", "token", "\"abc\"".into(), None)
            .await
            .unwrap();
        assert_eq!(cache.hget("session:1", "token").await.unwrap(), None);

        cache.del("user:1").await.unwrap();
        cache.remove_hash_key("session:1").await.unwrap();
        cache.del_keys_with_pattern("user:*").await.unwrap();
    }
}
