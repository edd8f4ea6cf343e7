#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use playlist_index::{
    cache::{CacheStore, MemoryStore},
    error::{LibraryError, Result},
    management::{Aggregator, LibraryManager},
    spotify::PlaylistSource,
    types::{PlaylistRef, Track},
};

/// In-memory playlist source that counts calls and tracks concurrency.
#[derive(Default)]
pub struct FakeSource {
    playlists: Vec<PlaylistRef>,
    tracks: HashMap<String, Vec<Track>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    pub discover_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub tokens_seen: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(mut self, id: &str, tracks: &[(&str, &str)]) -> Self {
        self.playlists.push(playlist(id));
        self.tracks.insert(
            id.to_string(),
            tracks.iter().map(|(id, name)| track(id, name)).collect(),
        );
        self
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn with_playlist_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    pub fn playlists(&self) -> Vec<PlaylistRef> {
        self.playlists.clone()
    }

    pub fn discover_count(&self) -> usize {
        self.discover_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaylistSource for FakeSource {
    async fn discover_playlists(&self, _user_id: &str, token: &str) -> Result<Vec<PlaylistRef>> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen.lock().unwrap().push(token.to_string());
        Ok(self.playlists.clone())
    }

    async fn fetch_tracks(&self, playlist_id: &str, _token: &str) -> Result<Vec<Track>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .delays
            .get(playlist_id)
            .copied()
            .unwrap_or(self.default_delay);
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(playlist_id) {
            return Err(LibraryError::Upstream {
                status: 500,
                url: format!("fake://playlists/{playlist_id}/tracks"),
                message: "boom".to_string(),
            });
        }

        Ok(self.tracks.get(playlist_id).cloned().unwrap_or_default())
    }
}

/// Store whose every operation fails, standing in for an unreachable server.
pub struct DownStore;

#[async_trait]
impl CacheStore for DownStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(LibraryError::Cache("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<()> {
        Err(LibraryError::Cache("connection refused".to_string()))
    }
}

/// Store that reads fine but refuses every write.
#[derive(Default)]
pub struct ReadOnlyStore {
    pub writes: AtomicUsize,
}

#[async_trait]
impl CacheStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(LibraryError::Cache("READONLY You can't write against a read only replica".to_string()))
    }
}

pub fn playlist(id: &str) -> PlaylistRef {
    PlaylistRef {
        id: id.to_string(),
        name: format!("Playlist {id}"),
    }
}

pub fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn manager(source: Arc<FakeSource>, store: Arc<dyn CacheStore>) -> LibraryManager {
    let aggregator = Aggregator::new(source.clone(), 2);
    LibraryManager::new(source, aggregator, store)
}

pub fn memory_manager(source: Arc<FakeSource>) -> (LibraryManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (manager(source, store.clone()), store)
}
