use std::{sync::Arc, time::Duration};

use tracing::{debug, info};

use crate::{
    cache::{self, CacheStore},
    config::{DEFAULT_CACHE_TTL_SECS, Settings},
    error::{LibraryError, Result},
    spotify::{PlaylistSource, SpotifyClient},
};

use super::Aggregator;

/// Read-through / write-through cache in front of the aggregation pipeline.
///
/// Entries are keyed by user id only. A rotated or different token still
/// hits a live entry, so a user's index can be up to one TTL old.
pub struct LibraryManager {
    source: Arc<dyn PlaylistSource>,
    aggregator: Aggregator,
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl LibraryManager {
    pub fn new(
        source: Arc<dyn PlaylistSource>,
        aggregator: Aggregator,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            source,
            aggregator,
            store,
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }

    /// Wires the Spotify client, the cache store named by `CACHE_URL` and an
    /// aggregator with the configured ceiling.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let source: Arc<dyn PlaylistSource> = Arc::new(SpotifyClient::from_settings(settings)?);
        let aggregator = Aggregator::new(Arc::clone(&source), settings.fetch_concurrency);
        let store = cache::open(&settings.cache_url, settings.cache_capacity)?;
        Ok(Self::new(source, aggregator, store).with_ttl(settings.cache_ttl))
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cache key of a user's serialized index.
    pub fn cache_key(user_id: &str) -> String {
        format!("library:{user_id}")
    }

    /// Serialized track index of `user_id`, from cache when present.
    ///
    /// On a miss the playlists are discovered and aggregated, the index is
    /// serialized, stored for the TTL and returned. Failures are never
    /// cached.
    pub async fn get_or_compute(&self, user_id: &str, token: &str) -> Result<Vec<u8>> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(LibraryError::BadRequest("userId is required".to_string()));
        }

        let key = Self::cache_key(user_id);
        if let Some(bytes) = self.store.get(&key).await? {
            debug!(user_id, bytes = bytes.len(), "Library cache hit");
            return Ok(bytes);
        }

        debug!(user_id, "Library cache miss");
        let playlists = self.source.discover_playlists(user_id, token).await?;
        let playlist_count = playlists.len();
        let index = self.aggregator.aggregate(playlists, token).await?;
        let bytes = serde_json::to_vec(&index)?;

        self.store.set(&key, &bytes, self.ttl).await?;
        info!(
            user_id,
            playlists = playlist_count,
            tracks = index.len(),
            ttl_secs = self.ttl.as_secs(),
            "Cached user library"
        );

        Ok(bytes)
    }
}
