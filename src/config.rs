//! Configuration management for the playlist index service.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every knob has a default except the
//! Spotify client credentials, which are only needed when requests arrive
//! without a bearer token of their own.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::error::{LibraryError, Result};

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_CACHE_URL: &str = "memory";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 900;
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;
pub const DEFAULT_FETCH_CONCURRENCY: usize = 2;
pub const DEFAULT_MAX_PAGES: usize = 1000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `playlist-index/.env`:
/// - Linux: `~/.local/share/playlist-index/.env`
/// - macOS: `~/Library/Application Support/playlist-index/.env`
/// - Windows: `%LOCALAPPDATA%/playlist-index/.env`
///
/// A missing file is fine; variables already present in the process
/// environment are never overwritten.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created.
pub async fn load_env() -> Result<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| LibraryError::Config(e.to_string()))?;
    }

    if dotenv::from_path(&path).is_err() {
        tracing::debug!(path = %path.display(), "No .env file loaded");
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlist-index/.env");
    path
}

/// Address the HTTP front door binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Spotify accounts token endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string())
}

/// Spotify application client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Spotify application client secret (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// Never log this value.
pub fn spotify_client_secret() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Cache store location (`CACHE_URL`): `memory` or a `redis://` URL.
pub fn cache_url() -> String {
    env::var("CACHE_URL").unwrap_or_else(|_| DEFAULT_CACHE_URL.to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| LibraryError::Config(format!("{name} must be a number, got {raw:?}"))),
        Err(_) => Ok(default),
    }
}

/// Client credentials for the token supplier.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Everything the service needs, gathered once and passed to constructors.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub api_url: String,
    pub token_url: String,
    pub credentials: Option<Credentials>,
    pub cache_url: String,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub fetch_concurrency: usize,
    pub max_pages: usize,
    pub http_timeout: Duration,
}

impl Settings {
    /// Reads the current process environment.
    ///
    /// # Errors
    ///
    /// Fails with [`LibraryError::Config`] when a numeric variable does not parse
    /// or a limit is zero.
    pub fn from_env() -> Result<Self> {
        let credentials = match (spotify_client_id(), spotify_client_secret()) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        let fetch_concurrency = parsed_var("FETCH_CONCURRENCY", DEFAULT_FETCH_CONCURRENCY)?;
        if fetch_concurrency == 0 {
            return Err(LibraryError::Config(
                "FETCH_CONCURRENCY must be at least 1".to_string(),
            ));
        }

        let cache_capacity = parsed_var("LIBRARY_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;
        if cache_capacity == 0 {
            return Err(LibraryError::Config(
                "LIBRARY_CACHE_CAPACITY must be at least 1".to_string(),
            ));
        }

        let max_pages = parsed_var("MAX_PAGES", DEFAULT_MAX_PAGES)?;
        if max_pages == 0 {
            return Err(LibraryError::Config("MAX_PAGES must be at least 1".to_string()));
        }

        Ok(Settings {
            server_addr: server_addr(),
            api_url: spotify_apiurl(),
            token_url: spotify_apitoken_url(),
            credentials,
            cache_url: cache_url(),
            cache_ttl: Duration::from_secs(parsed_var(
                "LIBRARY_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )?),
            cache_capacity,
            fetch_concurrency,
            max_pages,
            http_timeout: Duration::from_secs(parsed_var(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            token_url: DEFAULT_SPOTIFY_API_TOKEN_URL.to_string(),
            credentials: None,
            cache_url: DEFAULT_CACHE_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            max_pages: DEFAULT_MAX_PAGES,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}
