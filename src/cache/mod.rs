//! Key-value stores backing the library cache gate.
//!
//! The gate only needs `get` and `set` with an expiry, so the store is a
//! trait. [`MemoryStore`] keeps entries in-process and [`RedisStore`] talks
//! to a Redis server.

mod memory;
mod redis_store;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Stored bytes for `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value, for `ttl`.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;
}

/// Picks a store from a `CACHE_URL` value: `memory` or a `redis://` URL.
///
/// `capacity` bounds the in-process store; Redis manages its own memory.
pub fn open(url: &str, capacity: usize) -> Result<Arc<dyn CacheStore>> {
    if url.trim().eq_ignore_ascii_case("memory") {
        return Ok(Arc::new(MemoryStore::with_capacity(capacity)));
    }
    Ok(Arc::new(RedisStore::new(url)?))
}
