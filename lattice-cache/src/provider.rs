//! Process-wide cache provider.

use crate::config::CacheConfig;
use crate::error::CacheResult;
use crate::manager::Cache;
use crate::noop_cache::NoopCache;
use crate::redis_cache::RedisCache;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Hands out cache handles, constructing the Redis store at most once.
///
/// Construct one provider at process start and pass it to consumers. The
/// Redis store (and its connection pool) is built lazily on the first
/// request; every later handle shares that instance, so the process never
/// holds more than one pool. The inert store carries no state, so a fresh
/// one is handed out on demand.
///
/// # Examples
///
/// ```no_run
/// use lattice_cache::CacheProvider;
///
/// #[tokio::main]
/// async fn main() -> Result<(), lattice_cache::CacheError> {
///     let provider = CacheProvider::from_env();
///     let cache = provider.redis_cache().await?;
///     cache.set("greeting", &"hello", None, None).await?;
///     Ok(())
/// }
/// ```
pub struct CacheProvider {
    config: CacheConfig,
    redis: OnceCell<Arc<RedisCache>>,
}

impl CacheProvider {
    /// Create a provider from a configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            redis: OnceCell::new(),
        }
    }

    /// Create a provider from `CACHE_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(CacheConfig::from_env())
    }

    /// The configuration this provider was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// A facade over the Redis-backed store.
    ///
    /// The first call builds the store; concurrent first calls are guarded
    /// so exactly one construction wins and the rest share its result.
    pub async fn redis_cache(&self) -> CacheResult<Cache> {
        let store = self
            .redis
            .get_or_try_init(|| async { RedisCache::new(self.config.clone()).await.map(Arc::new) })
            .await?;
        Ok(Cache::new(store.clone()))
    }

    /// A facade over a fresh inert store.
    pub fn noop_cache(&self) -> Cache {
        Cache::new(Arc::new(NoopCache::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_handles_are_independent_and_inert() {
        let provider = CacheProvider::new(CacheConfig::default());

        let cache = provider.noop_cache();
        cache.set("user:1", &"alice", None, None).await.unwrap();
        let value: Option<String> = cache.get("user:1", None).await.unwrap();
        assert_eq!(value, None);

        // Another handle behaves the same; there is nothing shared to leak.
        let other = provider.noop_cache();
        let value: Option<String> = other.get("user:1", None).await.unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_provider_keeps_config() {
        let provider = CacheProvider::new(CacheConfig::default().with_namespace("svc"));
        assert_eq!(provider.config().namespace, "svc");
    }
}
