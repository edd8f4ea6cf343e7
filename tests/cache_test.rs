use std::time::Duration;

use playlist_index::{
    cache::{self, CacheStore, MemoryStore, RedisStore},
    error::LibraryError,
};

#[tokio::test(start_paused = true)]
async fn test_expired_entries_of_other_keys_are_purged_on_write() {
    let store = MemoryStore::new();
    for i in 0..1000 {
        store
            .set(&format!("library:user{i}"), b"{}", Duration::from_secs(1))
            .await
            .unwrap();
    }
    assert_eq!(store.len().await, 1000);

    tokio::time::advance(Duration::from_secs(10)).await;
    store
        .set("library:fresh", b"{}", Duration::from_secs(900))
        .await
        .unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(
        store.get("library:fresh").await.unwrap().as_deref(),
        Some(&b"{}"[..])
    );
}

#[tokio::test(start_paused = true)]
async fn test_expired_entry_reads_as_missing() {
    let store = MemoryStore::new();
    store.set("k", b"v", Duration::from_secs(5)).await.unwrap();

    tokio::time::advance(Duration::from_secs(4)).await;
    assert!(store.get("k").await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(store.get("k").await.unwrap().is_none());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_least_recently_used_entry_is_evicted_at_capacity() {
    let store = MemoryStore::with_capacity(2);
    let ttl = Duration::from_secs(60);

    store.set("a", b"1", ttl).await.unwrap();
    store.set("b", b"2", ttl).await.unwrap();
    // Touch "a" so "b" becomes the oldest.
    store.get("a").await.unwrap();
    store.set("c", b"3", ttl).await.unwrap();

    assert_eq!(store.len().await, 2);
    assert!(store.get("a").await.unwrap().is_some());
    assert!(store.get("b").await.unwrap().is_none());
    assert!(store.get("c").await.unwrap().is_some());
}

#[tokio::test]
async fn test_set_replaces_value() {
    let store = MemoryStore::new();
    let ttl = Duration::from_secs(60);

    store.set("k", b"old", ttl).await.unwrap();
    store.set("k", b"new", ttl).await.unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some(&b"new"[..]));
}

#[tokio::test]
async fn test_zero_capacity_is_clamped() {
    let store = MemoryStore::with_capacity(0);
    assert_eq!(store.capacity().await, 1);
    assert_eq!(MemoryStore::new().capacity().await, 10_000);
}

#[tokio::test]
async fn test_open_memory_store() {
    let store = cache::open("memory", 8).unwrap();
    store.set("k", b"v", Duration::from_secs(60)).await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some(&b"v"[..]));
}

#[test]
fn test_redis_store_connects_lazily() {
    // Nothing listens here; construction must not try to connect.
    assert!(RedisStore::new("redis://127.0.0.1:1/").is_ok());
    assert!(cache::open("redis://127.0.0.1:1/", 8).is_ok());
}

#[test]
fn test_invalid_redis_url_is_a_cache_error() {
    assert!(matches!(
        RedisStore::new("not a url"),
        Err(LibraryError::Cache(_))
    ));
}
