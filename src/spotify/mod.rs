//! # Spotify Integration Module
//!
//! Thin client over the parts of the Spotify Web API the library index needs:
//! cursor-paginated reads of a user's playlists and of a playlist's tracks,
//! plus the client-credentials token request.
//!
//! ## Architecture
//!
//! ```text
//! Management Layer (aggregation, cache gate, token supplier)
//!          ↓
//! PlaylistSource trait
//!          ↓
//! SpotifyClient
//!     ├── pagination  (follows `next` links, page cap)
//!     ├── playlists   (discovery + eligibility filter)
//!     ├── tracks      (per-playlist track listing)
//!     └── auth        (client-credentials grant)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## API Coverage
//!
//! - `GET /users/{user_id}/playlists` - all playlists of a user
//! - `GET /playlists/{playlist_id}/tracks` - track ids and names of a playlist
//! - `POST /api/token` - client-credentials token
//!
//! ## Error Handling
//!
//! Nothing here retries. A failing page aborts the whole listing and the
//! error is returned to the caller as a [`LibraryError`](crate::error::LibraryError)
//! that keeps the failure kind (transport, status, decode, page cap).

pub mod auth;
pub mod pagination;
pub mod playlists;
pub mod tracks;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    config::Settings,
    error::{LibraryError, Result},
    types::{PlaylistRef, Track},
};

/// Source of playlists and playlist tracks for the aggregation engine.
///
/// [`SpotifyClient`] is the production implementation; tests plug in fakes
/// to count calls or observe concurrency.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Playlists of `user_id` that are eligible for aggregation, in page order.
    async fn discover_playlists(&self, user_id: &str, token: &str) -> Result<Vec<PlaylistRef>>;

    /// Every track of `playlist_id`, in page order.
    async fn fetch_tracks(&self, playlist_id: &str, token: &str) -> Result<Vec<Track>>;
}

/// HTTP client bound to one Spotify Web API base URL.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: Url,
    max_pages: usize,
}

impl SpotifyClient {
    /// Create a client for `api_url` (e.g. `https://api.spotify.com/v1`).
    ///
    /// `max_pages` caps every paginated listing; `timeout` bounds each request.
    pub fn new(api_url: &str, max_pages: usize, timeout: Duration) -> Result<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| LibraryError::Config(format!("Invalid API URL {api_url:?}: {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(LibraryError::Config(format!(
                "API URL {api_url} cannot carry a path"
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http,
            api_url,
            max_pages: max_pages.max(1),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.api_url, settings.max_pages, settings.http_timeout)
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Builds `{api_url}/{segments...}?{query}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.api_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| LibraryError::Config(format!("Invalid API URL {}", self.api_url)))?;
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

#[async_trait]
impl PlaylistSource for SpotifyClient {
    async fn discover_playlists(&self, user_id: &str, token: &str) -> Result<Vec<PlaylistRef>> {
        self.get_eligible_playlists(user_id, token).await
    }

    async fn fetch_tracks(&self, playlist_id: &str, token: &str) -> Result<Vec<Track>> {
        self.get_playlist_tracks(playlist_id, token).await
    }
}
