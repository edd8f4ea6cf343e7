use std::{net::SocketAddr, str::FromStr};

use axum::{Extension, Router, routing::get};
use tracing::info;

use crate::{
    api::{self, AppState},
    error::{LibraryError, Result},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/user", get(api::user_library))
        .layer(Extension(state))
}

pub async fn start_api_server(addr: &str, state: AppState) -> Result<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| LibraryError::Config(format!("Failed to parse server address {addr:?}: {e}")))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LibraryError::Config(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "Listening");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| LibraryError::Config(format!("Server error: {e}")))
}
