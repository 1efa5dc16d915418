//! Typed cache facade.

use crate::error::{CacheError, CacheResult};
use crate::traits::CacheStore;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// The handle application code depends on.
///
/// Wraps whichever [`CacheStore`] the provider wired in and layers serde
/// (de)serialization on top; it adds no caching logic of its own, so the real
/// and inert backends behave identically at this level apart from what the
/// store actually does.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
}

impl Cache {
    /// Create a facade over a store.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Get a typed value.
    ///
    /// Returns `Ok(None)` when the key is absent,
    /// [`CacheError::Deserialization`] when the stored payload does not match
    /// `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &str,
        tag: Option<&str>,
    ) -> CacheResult<Option<T>> {
        match self.store.get(key, tag).await? {
            Some(json) => {
                let value = serde_json::from_str(&json)
                    .map_err(|e| CacheError::Deserialization(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get a typed value, treating absence as [`CacheError::NotFound`].
    pub async fn get_required<T: DeserializeOwned>(
        &self,
        key: &str,
        tag: Option<&str>,
    ) -> CacheResult<T> {
        self.get(key, tag)
            .await?
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    /// Store a typed value.
    ///
    /// `ttl` of `None` means no expiration (the store's default TTL, when
    /// configured, still applies).
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
        tag: Option<&str>,
    ) -> CacheResult<()> {
        let json =
            serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.store.set(key, json, ttl, tag).await
    }

    /// Delete a key. Absent keys are not an error.
    pub async fn del(&self, key: &str) -> CacheResult<()> {
        self.store.del(key).await
    }

    /// Get one typed field of a hash.
    pub async fn hget<T: DeserializeOwned>(
        &self,
        key: &str,
        field: &str,
    ) -> CacheResult<Option<T>> {
        match self.store.hget(key, field).await? {
            Some(json) => {
                let value = serde_json::from_str(&json)
                    .map_err(|e| CacheError::Deserialization(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Store one typed field of a hash, refreshing the hash expiration.
    pub async fn hset<T: Serialize>(
        &self,
        key: &str,
        field: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        let json =
            serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.store.hset(key, field, json, ttl).await
    }

    /// Delete every field of a hash.
    pub async fn remove_hash_key(&self, key: &str) -> CacheResult<()> {
        self.store.remove_hash_key(key).await
    }

    /// Delete every key matching a glob pattern, in batches.
    pub async fn del_keys_with_pattern(&self, pattern: &str) -> CacheResult<()> {
        self.store.del_keys_with_pattern(pattern).await
    }

    /// Get a value, or compute and cache it.
    ///
    /// If the key exists, returns the cached value. If not, calls the
    /// factory, caches the result under `ttl`, and returns it.
    pub async fn get_or_set<T, F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        tag: Option<&str>,
        factory: F,
    ) -> CacheResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = CacheResult<T>>,
    {
        if let Some(value) = self.get(key, tag).await? {
            return Ok(value);
        }

        let value = factory().await?;
        self.set(key, &value, ttl, tag).await?;
        Ok(value)
    }
}
