use std::{cmp::Ordering, collections::BTreeMap};

use axum::http::{HeaderMap, header};

use crate::types::{LibraryTableRow, PlaylistMembership, TrackIndex};

/// Name of the cookie the token middleware stores the access token in.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Bearer token of a request: the `Authorization: Bearer` header first, then
/// the `accessToken` cookie. Blank values count as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
        .filter(|token| !token.is_empty());

    if let Some(token) = from_header {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ACCESS_TOKEN_COOKIE)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Distinct playlists referenced anywhere in the index, sorted by name then id.
pub fn unique_playlists(index: &TrackIndex) -> Vec<PlaylistMembership> {
    let mut by_id: BTreeMap<&str, &str> = BTreeMap::new();
    for entry in index.values() {
        for membership in &entry.playlists {
            by_id
                .entry(membership.playlist_id.as_str())
                .or_insert(membership.playlist_name.as_str());
        }
    }

    let mut playlists: Vec<PlaylistMembership> = by_id
        .into_iter()
        .map(|(id, name)| PlaylistMembership {
            playlist_id: id.to_string(),
            playlist_name: name.to_string(),
        })
        .collect();
    playlists.sort_by(|a, b| {
        a.playlist_name
            .cmp(&b.playlist_name)
            .then_with(|| a.playlist_id.cmp(&b.playlist_id))
    });
    playlists
}

/// The part of the index whose tracks appear in `playlist_id`.
pub fn tracks_in_playlist(index: &TrackIndex, playlist_id: &str) -> TrackIndex {
    index
        .iter()
        .filter(|(_, entry)| entry.playlists.iter().any(|p| p.playlist_id == playlist_id))
        .map(|(id, entry)| (id.clone(), entry.clone()))
        .collect()
}

/// One table row per track, listing the playlists it appears in.
pub fn build_library_rows(index: &TrackIndex) -> Vec<LibraryTableRow> {
    let mut rows: Vec<LibraryTableRow> = index
        .values()
        .map(|entry| LibraryTableRow {
            track: entry.track_name.clone(),
            count: entry.playlists.len(),
            playlists: entry
                .playlists
                .iter()
                .map(|p| p.playlist_name.as_str())
                .collect::<Vec<&str>>()
                .join(", "),
        })
        .collect();

    sort_library_rows(&mut rows);
    rows
}

/// Most shared tracks first, then by track name.
pub fn sort_library_rows(rows: &mut [LibraryTableRow]) {
    rows.sort_by(|a, b| match b.count.cmp(&a.count) {
        Ordering::Equal => a.track.cmp(&b.track),
        other => other,
    });
}
