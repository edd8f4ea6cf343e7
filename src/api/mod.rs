//! # API Module
//!
//! HTTP endpoints of the playlist index server.
//!
//! ## Endpoints
//!
//! - [`user_library`] - `GET /api/user?userId=<id>` returns the user's track
//!   index as a JSON object mapping track id to
//!   `{trackName, playlists: [{playlistId, playlistName}]}`. The bearer token
//!   is taken from the `Authorization` header, then the `accessToken` cookie,
//!   then the configured [`TokenManager`].
//! - [`health`] - liveness check with the running version.
//!
//! Failures answer with a JSON string message and a status code matching
//! the error kind, see [`ApiError`].
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use playlist_index::{api::AppState, server::router};
//!
//! let app = router(AppState { library, tokens: None });
//! ```

mod error;
mod health;
mod user;

pub use error::ApiError;
pub use error::status_code;
pub use health::health;
pub use user::user_library;

use std::sync::Arc;

use crate::{
    config::Settings,
    error::Result,
    management::{LibraryManager, TokenManager},
};

/// Shared handler state, injected with an `Extension` layer.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<LibraryManager>,
    pub tokens: Option<Arc<TokenManager>>,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(AppState {
            library: Arc::new(LibraryManager::from_settings(settings)?),
            tokens: TokenManager::from_settings(settings)?.map(Arc::new),
        })
    }
}
