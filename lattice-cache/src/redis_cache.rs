//! Redis cache store.

use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::traits::CacheStore;
use async_trait::async_trait;
use lattice_metrics::{cache_metrics, CacheMetrics};
use lattice_redis::{AsyncCommands, RedisPool, RedisPoolBuilder};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

/// Keys per DEL command during bulk pattern deletion. SCAN pages are split
/// into chunks of this size so a single command never carries an unbounded
/// argument list.
pub const DEL_CHUNK_SIZE: usize = 1024;

/// Redis-backed cache store.
///
/// Owns a bb8 connection pool, a namespace, and a scan batch size; clones
/// share the pool. Every operation composes the physical key through
/// [`CacheConfig::namespaced_key`] and reports its outcome to the metrics
/// collaborator.
#[derive(Clone)]
pub struct RedisCache {
    pool: RedisPool,
    config: Arc<CacheConfig>,
    metrics: Arc<dyn CacheMetrics>,
}

impl RedisCache {
    /// Create a new Redis cache store, building its connection pool.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lattice_cache::{CacheConfig, RedisCache};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), lattice_cache::CacheError> {
    ///     let config = CacheConfig::new("redis://localhost:6379").with_namespace("svc");
    ///     let cache = RedisCache::new(config).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> CacheResult<Self> {
        config.validate()?;
        let pool = RedisPoolBuilder::new(config.redis_config()).build().await?;
        Ok(Self::from_pool(config, pool))
    }

    /// Build from an existing pool.
    ///
    /// Lets tests and hosts that already manage a pool share it with the
    /// cache.
    pub fn from_pool(config: CacheConfig, pool: RedisPool) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            metrics: cache_metrics(),
        }
    }

    /// Swap the metrics collaborator.
    pub fn with_metrics(mut self, metrics: Arc<dyn CacheMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// The configured namespace.
    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// Check that the backend answers a PING.
    pub async fn health_check(&self) -> CacheResult<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CacheError::Pool(e.to_string()))?;
        let _: String = redis::cmd("PING").query_async(&mut *conn).await?;
        Ok(())
    }

    fn key(&self, key: &str) -> String {
        self.config.namespaced_key(key)
    }

    /// Bound a remote call by the configured command timeout.
    async fn timed<T>(&self, fut: impl Future<Output = CacheResult<T>>) -> CacheResult<T> {
        match tokio::time::timeout(self.config.command_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout),
        }
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    #[instrument(level = "debug", skip(self))]
    async fn get(&self, key: &str, tag: Option<&str>) -> CacheResult<Option<String>> {
        let key = self.key(key);
        let timer = self.metrics.start_get_timer(tag);

        let result = self
            .timed(async {
                let mut conn = self
                    .pool
                    .get()
                    .await
                    .map_err(|e| CacheError::Pool(e.to_string()))?;
                let value: Option<String> = conn.get(&key).await?;
                Ok(value)
            })
            .await;

        timer.stop();
        match &result {
            Ok(Some(_)) => self.metrics.count_hit(tag),
            Ok(None) | Err(_) => self.metrics.count_miss(tag),
        }
        result
    }

    #[instrument(level = "debug", skip(self, value))]
    async fn set(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
        tag: Option<&str>,
    ) -> CacheResult<()> {
        let key = self.key(key);
        let ttl = ttl.or(self.config.default_ttl);
        let timer = self.metrics.start_set_timer(tag);

        let result = self
            .timed(async {
                let mut conn = self
                    .pool
                    .get()
                    .await
                    .map_err(|e| CacheError::Pool(e.to_string()))?;
                match ttl {
                    Some(ttl) => {
                        let _: () = conn.set_ex(&key, value, ttl.as_secs()).await?;
                    }
                    None => {
                        let _: () = conn.set(&key, value).await?;
                    }
                }
                Ok(())
            })
            .await;

        timer.stop();
        if let Err(err) = &result {
            warn!(key = %key, error = %err, "cache set failed");
        }
        result
    }

    #[instrument(level = "debug", skip(self))]
    async fn del(&self, key: &str) -> CacheResult<()> {
        let key = self.key(key);
        self.timed(async {
            let mut conn = self
                .pool
                .get()
                .await
                .map_err(|e| CacheError::Pool(e.to_string()))?;
            let _: () = conn.del(&key).await?;
            Ok(())
        })
        .await
    }

    #[instrument(level = "debug", skip(self))]
    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<String>> {
        let key = self.key(key);
        self.timed(async {
            let mut conn = self
                .pool
                .get()
                .await
                .map_err(|e| CacheError::Pool(e.to_string()))?;
            let value: Option<String> = conn.hget(&key, field).await?;
            Ok(value)
        })
        .await
    }

    #[instrument(level = "debug", skip(self, value))]
    async fn hset(
        &self,
        key: &str,
        field: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        let key = self.key(key);

        let result = self
            .timed(async {
                let mut conn = self
                    .pool
                    .get()
                    .await
                    .map_err(|e| CacheError::Pool(e.to_string()))?;
                let _: () = conn.hset(&key, field, value).await?;

                // The expiration applies to the whole hash. If it fails the
                // field write above stands and the error propagates.
                if let Some(ttl) = ttl {
                    let _: () = conn.expire(&key, ttl.as_secs() as i64).await?;
                }
                Ok(())
            })
            .await;

        if let Err(err) = &result {
            warn!(key = %key, field = %field, error = %err, "cache hset failed");
        }
        result
    }

    #[instrument(level = "debug", skip(self))]
    async fn remove_hash_key(&self, key: &str) -> CacheResult<()> {
        let key = self.key(key);

        let result = self
            .timed(async {
                let mut conn = self
                    .pool
                    .get()
                    .await
                    .map_err(|e| CacheError::Pool(e.to_string()))?;
                let fields: Vec<String> = conn.hkeys(&key).await?;
                if !fields.is_empty() {
                    let _: () = conn.hdel(&key, fields).await?;
                }
                Ok(())
            })
            .await;

        if let Err(err) = &result {
            warn!(key = %key, error = %err, "cache hash removal failed");
        }
        result
    }

    #[instrument(level = "debug", skip(self))]
    async fn del_keys_with_pattern(&self, pattern: &str) -> CacheResult<()> {
        let pattern = self.key(pattern);

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CacheError::Pool(e.to_string()))?;

        let mut cursor: u64 = 0;
        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(self.config.scan_count)
                .query_async(&mut *conn)
                .await
                .map_err(|e| CacheError::Scan(e.to_string()))?;

            // One DEL per chunk; a failed chunk is logged and skipped so it
            // cannot abort the enumeration.
            for chunk in keys.chunks(DEL_CHUNK_SIZE) {
                if let Err(err) = conn.del::<_, ()>(chunk).await {
                    warn!(pattern = %pattern, error = %err, "bulk delete chunk failed");
                }
            }

            cursor = next;
            if cursor == 0 {
                // Enumeration complete
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking_bounds_delete_batches() {
        let keys: Vec<String> = (0..2500).map(|i| format!("svc_user:{i}")).collect();
        let chunks: Vec<&[String]> = keys.chunks(DEL_CHUNK_SIZE).collect();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1024);
        assert_eq!(chunks[1].len(), 1024);
        assert_eq!(chunks[2].len(), 452);
    }

    #[test]
    fn test_chunking_small_page() {
        let keys: Vec<String> = (0..7).map(|i| format!("svc_k{i}")).collect();
        assert_eq!(keys.chunks(DEL_CHUNK_SIZE).count(), 1);
    }
}
