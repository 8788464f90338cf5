//! Cache manager tests

use osdk_application::BackendRegistry;
use osdk_domain::error::Error;
use osdk_domain::ports::providers::CacheBackend;
use osdk_domain::value_objects::{CacheConfig, CacheValue};
use osdk_infrastructure::cache::CacheManager;
use osdk_providers::cache::LocalTtlCache;
use std::sync::Arc;
use std::time::Duration;

fn configs() -> Vec<CacheConfig> {
    vec![
        CacheConfig::local("Session", Duration::from_secs(60)),
        CacheConfig::new("Shared", "memory"),
    ]
}

#[tokio::test]
async fn test_builds_every_configured_cache() {
    let registry = BackendRegistry::with_registered_backends();
    let manager = CacheManager::from_configs(&registry, &configs())
        .await
        .unwrap();

    assert_eq!(manager.keys(), vec!["Session", "Shared"]);
    assert_eq!(manager.len(), 2);
    assert_eq!(manager.get("Session").unwrap().backend_name(), "local");
    assert_eq!(manager.get("Shared").unwrap().backend_name(), "memory");
    assert!(manager.get("Missing").is_none());
}

#[tokio::test]
async fn test_duplicate_keys_fail_before_construction() {
    let mut registry = BackendRegistry::new();
    registry.register("local", |_config| async {
        Err::<Arc<dyn CacheBackend>, _>(Error::infrastructure("constructed despite duplicate keys"))
    });

    let configs = vec![
        CacheConfig::local("A", Duration::ZERO),
        CacheConfig::local("A", Duration::ZERO),
    ];
    let err = CacheManager::from_configs(&registry, &configs)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }), "{err}");
}

#[tokio::test]
async fn test_unknown_backend_type_fails_fast() {
    let registry = BackendRegistry::with_registered_backends();
    let configs = vec![
        CacheConfig::local("Session", Duration::ZERO),
        CacheConfig::new("Odd", "memcached"),
    ];

    let err = CacheManager::from_configs(&registry, &configs)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BackendNotRegistered { .. }), "{err}");
}

#[tokio::test]
async fn test_mailbox_requires_remote_backend() {
    let registry = BackendRegistry::with_registered_backends();
    let manager = CacheManager::from_configs(&registry, &configs())
        .await
        .unwrap();

    let mailbox = manager.mailbox("Shared").unwrap();
    mailbox.insert_at("7", "hello", "sys", false, 1).await.unwrap();
    assert_eq!(mailbox.messages("7").await.unwrap().len(), 1);

    assert!(matches!(
        manager.mailbox("Session").unwrap_err(),
        Error::InvalidArgument { .. }
    ));
    assert!(matches!(
        manager.mailbox("Missing").unwrap_err(),
        Error::InvalidArgument { .. }
    ));
}

#[tokio::test]
async fn test_health_check_reports_every_cache() {
    let registry = BackendRegistry::with_registered_backends();
    let manager = CacheManager::from_configs(&registry, &configs())
        .await
        .unwrap();

    let report = manager.health_check().await;
    assert_eq!(report.len(), 2);
    assert!(report.iter().all(|h| h.healthy && h.details.is_none()));
    assert!(report.iter().any(|h| h.key == "Session" && h.backend == "local"));
}

#[tokio::test(start_paused = true)]
async fn test_sweep_totals_evictions() {
    let first: Arc<LocalTtlCache> = Arc::new(LocalTtlCache::new(Duration::from_secs(1)));
    let second: Arc<LocalTtlCache> = Arc::new(LocalTtlCache::new(Duration::from_secs(1)));
    first.insert("a", CacheValue::from(1));
    first.insert("b", CacheValue::from(2));
    second.insert("c", CacheValue::from(3));
    second.insert_with_ttl("d", CacheValue::from(4), Duration::ZERO);

    let mut manager = CacheManager::default();
    manager.insert("First", Arc::clone(&first) as Arc<dyn CacheBackend>);
    manager.insert("Second", Arc::clone(&second) as Arc<dyn CacheBackend>);

    tokio::time::advance(Duration::from_secs(2)).await;

    assert_eq!(manager.sweep_expired().await, 3);
    assert!(first.is_empty());
    assert_eq!(second.len(), 1);
}
