//! Remote scalar cache tests, run against the in-memory store

use osdk_application::BackendRegistry;
use osdk_domain::error::Error;
use osdk_domain::ports::providers::{CacheBackend, RemoteStore};
use osdk_domain::value_objects::{CacheConfig, CacheValue};
use osdk_providers::cache::RemoteScalarCache;
use osdk_providers::remote::InMemoryStore;
use std::sync::Arc;
use std::time::Duration;

fn cache() -> (RemoteScalarCache, Arc<dyn RemoteStore>) {
    let store: Arc<dyn RemoteStore> = Arc::new(InMemoryStore::new());
    (RemoteScalarCache::new(Arc::clone(&store)), store)
}

#[tokio::test]
async fn test_values_are_stored_as_text() {
    let (cache, store) = cache();
    cache
        .set("int", CacheValue::from(7i64), Duration::ZERO)
        .await
        .unwrap();
    cache
        .set("float", CacheValue::from(2.5f64), Duration::ZERO)
        .await
        .unwrap();
    cache
        .set("yes", CacheValue::from(true), Duration::ZERO)
        .await
        .unwrap();
    cache
        .set("no", CacheValue::from(false), Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(store.get("int").await.unwrap().as_deref(), Some("7"));
    assert_eq!(store.get("float").await.unwrap().as_deref(), Some("2.5"));
    assert_eq!(store.get("yes").await.unwrap().as_deref(), Some("1"));
    assert_eq!(store.get("no").await.unwrap().as_deref(), Some("0"));
}

#[tokio::test]
async fn test_typed_getters() {
    let (cache, _) = cache();
    cache
        .set("n", CacheValue::from(123), Duration::ZERO)
        .await
        .unwrap();
    cache
        .set("big", CacheValue::from(5_000_000_000i64), Duration::ZERO)
        .await
        .unwrap();
    cache
        .set("pi", CacheValue::from(3.25f32), Duration::ZERO)
        .await
        .unwrap();
    cache
        .set("flag", CacheValue::from(true), Duration::ZERO)
        .await
        .unwrap();
    cache
        .set("name", CacheValue::from("alice"), Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(cache.get_int("n").await.unwrap(), Some(123));
    assert_eq!(cache.get_int64("big").await.unwrap(), Some(5_000_000_000));
    assert_eq!(cache.get_float32("pi").await.unwrap(), Some(3.25));
    assert_eq!(cache.get_float64("pi").await.unwrap(), Some(3.25));
    assert_eq!(cache.get_bool("flag").await.unwrap(), Some(true));
    assert_eq!(cache.get_string("name").await.unwrap().as_deref(), Some("alice"));
    assert_eq!(cache.get_string("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_int_overflow_is_decode_error() {
    let (cache, _) = cache();
    cache
        .set("big", CacheValue::from(5_000_000_000i64), Duration::ZERO)
        .await
        .unwrap();

    let err = cache.get_int("big").await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn test_non_boolean_text_reads_as_absent() {
    let (cache, store) = cache();
    store.set("flag", "true", None).await.unwrap();
    assert_eq!(cache.get_bool("flag").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_ttl_is_passed_to_the_store() {
    let (cache, _) = cache();
    cache
        .set("short", CacheValue::from("x"), Duration::from_secs(1))
        .await
        .unwrap();
    cache
        .set("forever", CacheValue::from("y"), Duration::ZERO)
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(2)).await;

    assert!(!cache.exists("short").await.unwrap());
    assert!(cache.exists("forever").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_set_default_uses_configured_ttl() {
    let registry = BackendRegistry::with_registered_backends();
    let config =
        CacheConfig::new("Scratch", "memory").with_default_ttl(Duration::from_secs(3));
    let backend = registry.create(&config).await.unwrap();
    assert_eq!(backend.default_ttl(), Duration::from_secs(3));

    backend
        .set_default("k", CacheValue::from(1))
        .await
        .unwrap();
    tokio::time::advance(Duration::from_secs(4)).await;
    assert!(!backend.exists("k").await.unwrap());

    let (plain, _) = cache();
    assert_eq!(plain.default_ttl(), Duration::ZERO);
}

#[tokio::test]
async fn test_del_and_exists() {
    let (cache, _) = cache();
    cache
        .set("k", CacheValue::from(1), Duration::ZERO)
        .await
        .unwrap();

    assert!(cache.exists("k").await.unwrap());
    assert!(cache.del("k").await.unwrap());
    assert!(!cache.exists("k").await.unwrap());
    assert!(!cache.del("k").await.unwrap());
}

#[tokio::test]
async fn test_exposes_remote_store() {
    let (cache, _) = cache();
    assert_eq!(cache.backend_name(), "memory");
    assert!(cache.remote_store().is_some());
    assert_eq!(cache.sweep_expired().await.unwrap(), 0);
}
