//! Integration tests for lattice-cache

use lattice_cache::*;
use lattice_metrics::{CacheMetrics, LatencyTimer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_noop_cache_contract() {
    let provider = CacheProvider::new(CacheConfig::default());
    let cache = provider.noop_cache();

    cache
        .set("user:1", &"alice", Some(Duration::from_secs(60)), Some("users"))
        .await
        .unwrap();
    let value: Option<String> = cache.get("user:1", Some("users")).await.unwrap();
    assert_eq!(value, None);

    cache.hset("session:1", "token", &"abc", None).await.unwrap();
    let token: Option<String> = cache.hget("session:1", "token").await.unwrap();
    assert_eq!(token, None);

    cache.del("user:1").await.unwrap();
    cache.remove_hash_key("session:1").await.unwrap();
    cache.del_keys_with_pattern("user:*").await.unwrap();
}

#[test]
fn test_error_kinds_render_detail() {
    let err = CacheError::Scan("connection reset".to_string());
    assert!(err.to_string().contains("connection reset"));

    let err = CacheError::NotFound("user:1".to_string());
    assert!(err.to_string().contains("user:1"));
}

// Counting metrics stub for asserting instrumentation behavior.
#[derive(Default)]
struct CountingMetrics {
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl CacheMetrics for CountingMetrics {
    fn count_hit(&self, tag: Option<&str>) {
        if tag.is_some() {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn count_miss(&self, tag: Option<&str>) {
        if tag.is_some() {
            self.misses.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn start_get_timer(&self, _tag: Option<&str>) -> LatencyTimer {
        LatencyTimer::Disabled
    }

    fn start_set_timer(&self, _tag: Option<&str>) -> LatencyTimer {
        LatencyTimer::Disabled
    }
}

// The tests below require a local Redis:
// cargo test -- --ignored

async fn redis_cache(namespace: &str) -> RedisCache {
    let config = CacheConfig::new("redis://localhost:6379").with_namespace(namespace);
    let cache = RedisCache::new(config).await.unwrap();
    cache.del_keys_with_pattern("*").await.unwrap();
    cache
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_set_get_roundtrip() {
    let store = redis_cache("itest-roundtrip").await;
    let cache = Cache::new(Arc::new(store));

    cache
        .set("user:1", &vec![1u32, 2, 3], Some(Duration::from_secs(60)), None)
        .await
        .unwrap();
    let value: Option<Vec<u32>> = cache.get("user:1", None).await.unwrap();
    assert_eq!(value, Some(vec![1, 2, 3]));
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_physical_keys_carry_namespace() {
    let store = redis_cache("itest-physical").await;
    let cache = Cache::new(Arc::new(store));

    cache.set("user:1", &"alice", None, None).await.unwrap();

    let client = redis::Client::open("redis://localhost:6379").unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    let exists: bool = redis::cmd("EXISTS")
        .arg("itest-physical_user:1")
        .query_async(&mut conn)
        .await
        .unwrap();
    assert!(exists);
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_namespace_isolation() {
    let store_a = redis_cache("itest-ns-a").await;
    let store_b = redis_cache("itest-ns-b").await;
    let a = Cache::new(Arc::new(store_a));
    let b = Cache::new(Arc::new(store_b));

    a.set("user:1", &"alice", None, None).await.unwrap();

    let through_b: Option<String> = b.get("user:1", None).await.unwrap();
    assert_eq!(through_b, None);

    let through_a: Option<String> = a.get("user:1", None).await.unwrap();
    assert_eq!(through_a, Some("alice".to_string()));
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_del_is_idempotent() {
    let store = redis_cache("itest-del").await;
    let cache = Cache::new(Arc::new(store));

    cache.del("never-written").await.unwrap();

    cache.set("user:1", &"alice", None, None).await.unwrap();
    cache.del("user:1").await.unwrap();
    cache.del("user:1").await.unwrap();

    let value: Option<String> = cache.get("user:1", None).await.unwrap();
    assert_eq!(value, None);
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_expiration_removes_entry() {
    let store = redis_cache("itest-ttl").await;
    let cache = Cache::new(Arc::new(store));

    cache
        .set("user:1", &"alice", Some(Duration::from_secs(1)), None)
        .await
        .unwrap();
    let value: Option<String> = cache.get("user:1", None).await.unwrap();
    assert_eq!(value, Some("alice".to_string()));

    tokio::time::sleep(Duration::from_secs(2)).await;

    let value: Option<String> = cache.get("user:1", None).await.unwrap();
    assert_eq!(value, None);
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_bulk_pattern_delete_clears_matches_only() {
    // More matches than one DEL chunk holds, so the chunked path is exercised.
    let store = redis_cache("itest-bulk").await;
    let cache = Cache::new(Arc::new(store));

    for i in 0..2500u32 {
        cache
            .set(&format!("user:{i}"), &i, None, None)
            .await
            .unwrap();
    }
    cache.set("session:1", &"keep", None, None).await.unwrap();

    cache.del_keys_with_pattern("user:*").await.unwrap();

    for i in (0..2500u32).step_by(500) {
        let value: Option<u32> = cache.get(&format!("user:{i}"), None).await.unwrap();
        assert_eq!(value, None, "user:{i} survived bulk deletion");
    }
    let kept: Option<String> = cache.get("session:1", None).await.unwrap();
    assert_eq!(kept, Some("keep".to_string()));
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_bulk_pattern_delete_with_zero_matches() {
    let store = redis_cache("itest-bulk-empty").await;
    let cache = Cache::new(Arc::new(store));

    cache.del_keys_with_pattern("user:*").await.unwrap();
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_hash_field_roundtrip_and_removal() {
    let store = redis_cache("itest-hash").await;
    let cache = Cache::new(Arc::new(store));

    cache
        .hset("session:1", "token", &"abc", Some(Duration::from_secs(60)))
        .await
        .unwrap();
    cache
        .hset("session:1", "refresh", &"def", Some(Duration::from_secs(60)))
        .await
        .unwrap();

    let token: Option<String> = cache.hget("session:1", "token").await.unwrap();
    assert_eq!(token, Some("abc".to_string()));

    cache.remove_hash_key("session:1").await.unwrap();

    let token: Option<String> = cache.hget("session:1", "token").await.unwrap();
    assert_eq!(token, None);
    let refresh: Option<String> = cache.hget("session:1", "refresh").await.unwrap();
    assert_eq!(refresh, None);

    // Removing an already-empty hash succeeds.
    cache.remove_hash_key("session:1").await.unwrap();
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_hit_and_miss_counting_by_tag() {
    let metrics = Arc::new(CountingMetrics::default());
    let store = redis_cache("itest-metrics")
        .await
        .with_metrics(metrics.clone());
    let cache = Cache::new(Arc::new(store));

    cache.set("user:1", &"alice", None, Some("users")).await.unwrap();

    let hit: Option<String> = cache.get("user:1", Some("users")).await.unwrap();
    assert_eq!(hit, Some("alice".to_string()));
    let miss: Option<String> = cache.get("user:2", Some("users")).await.unwrap();
    assert_eq!(miss, None);

    assert_eq!(metrics.hits.load(Ordering::SeqCst), 1);
    assert_eq!(metrics.misses.load(Ordering::SeqCst), 1);

    // Untagged reads leave the counters alone.
    let _: Option<String> = cache.get("user:1", None).await.unwrap();
    assert_eq!(metrics.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_health_check() {
    let store = redis_cache("itest-health").await;
    store.health_check().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_provider_reuses_one_store() {
    let config = CacheConfig::new("redis://localhost:6379").with_namespace("itest-provider");
    let provider = CacheProvider::new(config);

    let first = provider.redis_cache().await.unwrap();
    let second = provider.redis_cache().await.unwrap();

    first.set("user:1", &"alice", None, None).await.unwrap();
    let value: Option<String> = second.get("user:1", None).await.unwrap();
    assert_eq!(value, Some("alice".to_string()));
}
