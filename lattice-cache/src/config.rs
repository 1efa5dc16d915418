//! Cache configuration.

use crate::error::{CacheError, CacheResult};
use lattice_redis::RedisConfig;
use std::time::Duration;

/// Cache configuration.
///
/// Read once at provider construction. The namespace is immutable for the
/// process lifetime; every physical key the cache writes or deletes is
/// prefixed with it.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis URL (redis://host:port).
    pub url: String,

    /// Database number (0-15).
    pub database: Option<u8>,

    /// Username for Redis 6+ ACL.
    pub username: Option<String>,

    /// Password.
    pub password: Option<String>,

    /// Key prefix isolating this deployment's keyspace.
    pub namespace: String,

    /// Use TLS.
    pub tls: bool,

    /// COUNT hint for keyspace enumeration during bulk pattern deletion.
    pub scan_count: u64,

    /// Connection pool size.
    pub pool_size: u32,

    /// TTL applied by `set` when the caller passes none.
    pub default_ttl: Option<Duration>,

    /// Connection timeout.
    pub connection_timeout: Duration,

    /// Per-command timeout.
    pub command_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            database: None,
            username: None,
            password: None,
            namespace: "lattice".to_string(),
            tls: false,
            scan_count: 5000,
            pool_size: 10,
            default_ttl: None,
            connection_timeout: Duration::from_secs(5),
            command_timeout: Duration::from_secs(3),
        }
    }
}

impl CacheConfig {
    /// Create a new configuration for the given endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Load configuration from `CACHE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CACHE_URL") {
            config.url = url;
        }

        if let Ok(db) = std::env::var("CACHE_DATABASE")
            && let Ok(db_num) = db.parse()
        {
            config.database = Some(db_num);
        }

        if let Ok(username) = std::env::var("CACHE_USERNAME") {
            config.username = Some(username);
        }

        if let Ok(password) = std::env::var("CACHE_PASSWORD") {
            config.password = Some(password);
        }

        if let Ok(namespace) = std::env::var("CACHE_NAMESPACE") {
            config.namespace = namespace;
        }

        if let Ok(tls) = std::env::var("CACHE_TLS_ENABLED") {
            config.tls = matches!(tls.as_str(), "1" | "true" | "TRUE");
        }

        if let Ok(count) = std::env::var("CACHE_SCAN_COUNT")
            && let Ok(count) = count.parse()
        {
            config.scan_count = count;
        }

        if let Ok(size) = std::env::var("CACHE_POOL_SIZE")
            && let Ok(size) = size.parse()
        {
            config.pool_size = size;
        }

        if let Ok(secs) = std::env::var("CACHE_DEFAULT_TTL")
            && let Ok(secs) = secs.parse()
        {
            config.default_ttl = Some(Duration::from_secs(secs));
        }

        config
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the database number.
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = Some(db);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Enable TLS.
    pub fn with_tls(mut self, enabled: bool) -> Self {
        self.tls = enabled;
        self
    }

    /// Set the enumeration COUNT hint.
    pub fn with_scan_count(mut self, count: u64) -> Self {
        self.scan_count = count;
        self
    }

    /// Set the pool size.
    pub fn with_pool_size(mut self, size: u32) -> Self {
        self.pool_size = size;
        self
    }

    /// Set the default TTL.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Set the per-command timeout.
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> CacheResult<()> {
        if self.namespace.is_empty() {
            return Err(CacheError::Config("namespace must not be empty".into()));
        }
        if self.pool_size == 0 {
            return Err(CacheError::Config("pool size must be at least 1".into()));
        }
        Ok(())
    }

    /// Compose the physical key for a logical key.
    ///
    /// Every store operation and every scan pattern goes through this;
    /// bypassing it would break namespace isolation between deployments
    /// sharing one Redis.
    pub fn namespaced_key(&self, key: &str) -> String {
        format!("{}_{}", self.namespace, key)
    }

    /// Map to the Redis pool configuration.
    pub fn redis_config(&self) -> RedisConfig {
        let mut builder = RedisConfig::builder()
            .url(self.url.clone())
            .pool_size(self.pool_size)
            .connection_timeout(self.connection_timeout)
            .command_timeout(self.command_timeout)
            .tls(self.tls);

        if let Some(db) = self.database {
            builder = builder.database(db);
        }
        if let Some(username) = &self.username {
            builder = builder.username(username.clone());
        }
        if let Some(password) = &self.password {
            builder = builder.password(password.clone());
        }

        builder.build()
    }
}
