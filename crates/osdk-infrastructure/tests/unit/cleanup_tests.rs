//! Cleanup driver tests

use osdk_domain::ports::providers::CacheBackend;
use osdk_domain::value_objects::CacheValue;
use osdk_infrastructure::cache::{CacheManager, CleanupDriver};
use osdk_providers::cache::LocalTtlCache;
use std::sync::Arc;
use std::time::Duration;

fn manager_with(cache: &Arc<LocalTtlCache>) -> Arc<CacheManager> {
    let mut manager = CacheManager::default();
    manager.insert("Session", Arc::clone(cache) as Arc<dyn CacheBackend>);
    Arc::new(manager)
}

#[tokio::test(start_paused = true)]
async fn test_driver_evicts_expired_entries_each_period() {
    let cache: Arc<LocalTtlCache> = Arc::new(LocalTtlCache::new(Duration::from_secs(1)));
    cache.insert("k", CacheValue::from(1));
    let driver = CleanupDriver::spawn(manager_with(&cache), Duration::from_secs(5)).unwrap();

    // Before the first period nothing is swept
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(cache.len(), 1);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(cache.len(), 0);

    driver.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_the_task() {
    let cache: Arc<LocalTtlCache> = Arc::new(LocalTtlCache::new(Duration::from_secs(1)));
    let driver = CleanupDriver::spawn(manager_with(&cache), Duration::from_secs(5)).unwrap();
    let token = driver.cancellation_token();

    driver.shutdown().await.unwrap();
    assert!(token.is_cancelled());

    // Entries outlive their TTL once the driver is gone
    cache.insert("k", CacheValue::from(1));
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_zero_interval_is_rejected() {
    let cache: Arc<LocalTtlCache> = Arc::new(LocalTtlCache::default());
    assert!(CleanupDriver::spawn(manager_with(&cache), Duration::ZERO).is_err());
}
