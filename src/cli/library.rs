use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Settings,
    error, info,
    management::{LibraryManager, TokenManager},
    success,
    types::{PlaylistTableRow, TrackIndex},
    utils, warning,
};

/// What to print once the index is available.
#[derive(Debug, Clone, Default)]
pub struct LibraryView {
    /// Print JSON instead of a table.
    pub json: bool,
    /// Only tracks contained in this playlist.
    pub playlist: Option<String>,
    /// List the distinct playlists instead of tracks.
    pub playlists: bool,
}

/// Runs the aggregation pipeline once for `user_id` and prints the result.
///
/// With a `redis://` `CACHE_URL` the run shares the server's cache and may be
/// answered from it. The default `memory` store lives only for this run.
pub async fn library(user_id: String, token: Option<String>, view: LibraryView) {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let manager = match LibraryManager::from_settings(&settings) {
        Ok(manager) => manager,
        Err(e) => error!("Cannot set up library pipeline: {}", e),
    };

    let token = match token {
        Some(token) => token,
        None => resolve_token(&settings).await,
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Building track index for {}...", user_id));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let bytes = match manager.get_or_compute(&user_id, &token).await {
        Ok(bytes) => {
            pb.finish_and_clear();
            bytes
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Error fetching user library for {}: {}", user_id, e);
        }
    };

    if view.json && view.playlist.is_none() && !view.playlists {
        println!("{}", String::from_utf8_lossy(&bytes));
        return;
    }

    let mut index: TrackIndex = match serde_json::from_slice(&bytes) {
        Ok(index) => index,
        Err(e) => error!("Cached library for {} is unreadable: {}", user_id, e),
    };

    if let Some(playlist_id) = &view.playlist {
        index = utils::tracks_in_playlist(&index, playlist_id);
        if index.is_empty() {
            warning!("No tracks of playlist {} in the library of {}", playlist_id, user_id);
            return;
        }
    }

    if view.playlists {
        print_playlists(&index, view.json);
        return;
    }

    if view.json {
        match serde_json::to_string_pretty(&index) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Cannot render library: {}", e),
        }
        return;
    }

    let rows = utils::build_library_rows(&index);
    println!("{}", Table::new(rows));
    success!(
        "{} tracks across {} playlists",
        index.len(),
        utils::unique_playlists(&index).len()
    );
}

async fn resolve_token(settings: &Settings) -> String {
    match TokenManager::from_settings(settings) {
        Ok(Some(tokens)) => match tokens.get_valid_token().await {
            Ok(token) => token,
            Err(e) => error!("Cannot obtain access token: {}", e),
        },
        Ok(None) => {
            warning!("No --token given and no client credentials configured; requests will be unauthorized");
            String::new()
        }
        Err(e) => error!("Cannot set up token supplier: {}", e),
    }
}

fn print_playlists(index: &TrackIndex, json: bool) {
    let playlists = utils::unique_playlists(index);

    if json {
        match serde_json::to_string_pretty(&playlists) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Cannot render playlists: {}", e),
        }
        return;
    }

    info!("{} playlists", playlists.len());
    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            tracks: utils::tracks_in_playlist(index, &p.playlist_id).len(),
            id: p.playlist_id,
            name: p.playlist_name,
        })
        .collect();
    println!("{}", Table::new(rows));
}
