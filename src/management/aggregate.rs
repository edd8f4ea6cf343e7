use std::sync::Arc;

use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, info, warn};

use crate::{
    error::{LibraryError, Result},
    spotify::PlaylistSource,
    types::{PlaylistMembership, PlaylistRef, Track, TrackIndex, TrackIndexEntry},
};

/// Fetches the tracks of many playlists concurrently and folds them into a
/// [`TrackIndex`].
///
/// At most `max_in_flight` track listings run at once for the whole
/// aggregator, not per call, so sharing one instance across requests keeps
/// the provider's rate limit in check.
pub struct Aggregator {
    source: Arc<dyn PlaylistSource>,
    limit: Arc<Semaphore>,
    max_in_flight: usize,
}

impl Aggregator {
    /// `max_in_flight` below 1 is treated as 1.
    pub fn new(source: Arc<dyn PlaylistSource>, max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            source,
            limit: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Builds the index for `playlists`.
    ///
    /// Either every playlist is fetched and merged, or the first failure is
    /// returned and no index is built. Listings still running when a sibling
    /// fails are left to finish on their own.
    pub async fn aggregate(&self, playlists: Vec<PlaylistRef>, token: &str) -> Result<TrackIndex> {
        let total = playlists.len();
        let mut units = JoinSet::new();

        for playlist in playlists {
            let source = Arc::clone(&self.source);
            let limit = Arc::clone(&self.limit);
            let token = token.to_string();

            units.spawn(async move {
                let _permit = limit
                    .acquire_owned()
                    .await
                    .map_err(|e| LibraryError::Task(e.to_string()))?;
                let tracks = source.fetch_tracks(&playlist.id, &token).await?;
                Ok::<_, LibraryError>((playlist, tracks))
            });
        }

        // Completion order, not discovery order.
        let mut fetched: Vec<(PlaylistRef, Vec<Track>)> = Vec::with_capacity(total);
        while let Some(joined) = units.join_next().await {
            let outcome = joined
                .map_err(|e| LibraryError::Task(e.to_string()))
                .and_then(|unit| unit);

            match outcome {
                Ok((playlist, tracks)) => {
                    debug!(
                        playlist_id = %playlist.id,
                        tracks = tracks.len(),
                        done = fetched.len() + 1,
                        total,
                        "Playlist fetched"
                    );
                    fetched.push((playlist, tracks));
                }
                Err(e) => {
                    warn!(error = %e, pending = units.len(), "Playlist fetch failed, abandoning aggregation");
                    units.detach_all();
                    return Err(e);
                }
            }
        }

        let mut index = TrackIndex::new();
        for (playlist, tracks) in fetched {
            merge_playlist(&mut index, &playlist, tracks);
        }

        info!(playlists = total, tracks = index.len(), "Aggregated track index");
        Ok(index)
    }
}

/// Adds every track of `playlist` to `index`.
///
/// A track seen for the first time keeps this occurrence's name. A
/// membership is appended for every occurrence, so a track listed twice in
/// the same playlist gets two identical memberships.
pub fn merge_playlist<I>(index: &mut TrackIndex, playlist: &PlaylistRef, tracks: I)
where
    I: IntoIterator<Item = Track>,
{
    let membership = PlaylistMembership::from(playlist);
    for Track { id, name } in tracks {
        index
            .entry(id)
            .or_insert_with(|| TrackIndexEntry {
                track_name: name,
                playlists: Vec::new(),
            })
            .playlists
            .push(membership.clone());
    }
}
