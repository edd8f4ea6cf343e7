use tracing::debug;

use crate::{
    error::Result,
    types::{PlaylistTrackItem, Track},
};

use super::SpotifyClient;

/// Response field filter so pages only carry `next` and track ids/names.
pub const PLAYLIST_TRACK_FIELDS: &str = "next,items(track(id,name))";

impl SpotifyClient {
    /// All tracks of `playlist_id`.
    ///
    /// Items without a track (deleted or region-blocked) and tracks without an
    /// id (local files) are dropped. A missing or null name becomes empty.
    pub async fn get_playlist_tracks(&self, playlist_id: &str, token: &str) -> Result<Vec<Track>> {
        let url = self.endpoint(
            &["playlists", playlist_id, "tracks"],
            &[("fields", PLAYLIST_TRACK_FIELDS), ("limit", "50")],
        )?;

        let items: Vec<PlaylistTrackItem> = self.fetch_all(url, token).await?;
        let listed = items.len();

        let tracks: Vec<Track> = items
            .into_iter()
            .filter_map(|item| item.track)
            .filter_map(|track| {
                track.id.map(|id| Track {
                    id,
                    name: track.name.unwrap_or_default(),
                })
            })
            .collect();

        debug!(playlist_id, listed, kept = tracks.len(), "Fetched playlist tracks");

        Ok(tracks)
    }
}
