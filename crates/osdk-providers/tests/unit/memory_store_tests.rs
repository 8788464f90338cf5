//! In-memory remote store tests

use osdk_domain::ports::providers::{MemberSwap, RemoteStore, ScoreBound};
use osdk_providers::remote::InMemoryStore;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_string_expiry() {
    let store = InMemoryStore::new();
    store
        .set("k", "v", Some(Duration::from_millis(500)))
        .await
        .unwrap();

    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    tokio::time::advance(Duration::from_millis(500)).await;
    assert_eq!(store.get("k").await.unwrap(), None);
    assert!(!store.exists("k").await.unwrap());
}

#[tokio::test]
async fn test_range_by_score_is_inclusive_and_ascending() {
    let store = InMemoryStore::new();
    store.zadd("z", "ten", 10.0).await.unwrap();
    store.zadd("z", "thirty", 30.0).await.unwrap();
    store.zadd("z", "twenty", 20.0).await.unwrap();

    let upto = store
        .zrange_by_score("z", ScoreBound::NegInfinity, ScoreBound::at(20))
        .await
        .unwrap();
    assert_eq!(upto, vec!["ten", "twenty"]);

    let window = store
        .zrange_by_score("z", ScoreBound::at(15), ScoreBound::PosInfinity)
        .await
        .unwrap();
    assert_eq!(window, vec!["twenty", "thirty"]);
}

#[tokio::test]
async fn test_zadd_existing_member_updates_score() {
    let store = InMemoryStore::new();
    store.zadd("z", "m", 1.0).await.unwrap();
    store.zadd("z", "n", 2.0).await.unwrap();
    store.zadd("z", "m", 3.0).await.unwrap();

    let all = store
        .zrange_by_score("z", ScoreBound::NegInfinity, ScoreBound::PosInfinity)
        .await
        .unwrap();
    assert_eq!(all, vec!["n", "m"]);
}

#[tokio::test]
async fn test_removing_every_member_drops_the_key() {
    let store = InMemoryStore::new();
    store.zadd("z", "a", 1.0).await.unwrap();
    store.zadd("z", "b", 2.0).await.unwrap();

    let removed = store
        .zrem_range_by_score("z", ScoreBound::NegInfinity, ScoreBound::at(2))
        .await
        .unwrap();
    assert_eq!(removed, 2);
    assert!(!store.exists("z").await.unwrap());
    assert!(!store.del("z").await.unwrap());
}

#[tokio::test]
async fn test_zrem_on_missing_key_removes_nothing() {
    let store = InMemoryStore::new();
    let removed = store
        .zrem_range_by_score("missing", ScoreBound::NegInfinity, ScoreBound::PosInfinity)
        .await
        .unwrap();
    assert_eq!(removed, 0);
    assert!(!store.exists("missing").await.unwrap());
}

#[tokio::test]
async fn test_zswap_swaps_members() {
    let store = InMemoryStore::new();
    store.zadd("z", "old", 5.0).await.unwrap();
    store.zadd("z", "keep", 6.0).await.unwrap();

    let applied = store
        .zswap("z", &[MemberSwap::new("old", "new", 5.0)])
        .await
        .unwrap();
    assert_eq!(applied, 1);

    let all = store
        .zrange_by_score("z", ScoreBound::NegInfinity, ScoreBound::PosInfinity)
        .await
        .unwrap();
    assert_eq!(all, vec!["new", "keep"]);
}

#[tokio::test]
async fn test_get_on_sorted_set_is_wrong_type() {
    let store = InMemoryStore::new();
    store.zadd("z", "a", 1.0).await.unwrap();
    assert!(store.get("z").await.is_err());

    // SET replaces the sorted set
    store.set("z", "plain", None).await.unwrap();
    assert_eq!(store.get("z").await.unwrap().as_deref(), Some("plain"));
}

#[tokio::test]
async fn test_store_name_and_ping() {
    let store = InMemoryStore::new();
    assert!(store.ping().await.is_ok());
    assert_eq!(store.store_name(), "memory");
}
