use tracing::debug;

use crate::{
    error::Result,
    types::{Playlist, PlaylistRef},
};

use super::SpotifyClient;

/// Owner URI of Spotify's own editorial playlists.
pub const SPOTIFY_CURATOR_URI: &str = "spotify:user:spotify";

/// Whether a playlist takes part in the library index.
///
/// It must be public, not owned by the Spotify curator account, and hold at
/// least one track. A missing `public` flag or track count counts as "no".
pub fn is_aggregatable(playlist: &Playlist) -> bool {
    playlist.public == Some(true)
        && playlist.owner.uri != SPOTIFY_CURATOR_URI
        && playlist.tracks.as_ref().is_some_and(|t| t.total > 0)
}

impl SpotifyClient {
    /// Every playlist listed for `user_id`, unfiltered.
    pub async fn get_user_playlists(&self, user_id: &str, token: &str) -> Result<Vec<Playlist>> {
        let url = self.endpoint(
            &["users", user_id, "playlists"],
            &[("limit", "50"), ("offset", "0")],
        )?;
        self.fetch_all(url, token).await
    }

    /// Playlists of `user_id` that pass [`is_aggregatable`], in page order.
    pub async fn get_eligible_playlists(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Vec<PlaylistRef>> {
        let playlists = self.get_user_playlists(user_id, token).await?;
        let listed = playlists.len();

        let eligible: Vec<PlaylistRef> = playlists
            .into_iter()
            .filter(is_aggregatable)
            .map(|p| PlaylistRef {
                id: p.id,
                name: p.name,
            })
            .collect();

        debug!(
            user_id,
            listed,
            eligible = eligible.len(),
            "Discovered playlists"
        );

        Ok(eligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlaylistOwner, PlaylistTracksRef};

    fn playlist(public: Option<bool>, owner_uri: &str, total: Option<u64>) -> Playlist {
        Playlist {
            id: "p".to_string(),
            name: "P".to_string(),
            public,
            owner: PlaylistOwner {
                id: "owner".to_string(),
                uri: owner_uri.to_string(),
            },
            tracks: total.map(|total| PlaylistTracksRef { total }),
        }
    }

    #[test]
    fn test_filter_combinations() {
        for public in [Some(true), Some(false), None] {
            for owner in ["spotify:user:alice", SPOTIFY_CURATOR_URI] {
                for total in [Some(0), Some(3), None] {
                    let expected = public == Some(true)
                        && owner != SPOTIFY_CURATOR_URI
                        && total.is_some_and(|t| t > 0);
                    assert_eq!(
                        is_aggregatable(&playlist(public, owner, total)),
                        expected,
                        "public={public:?} owner={owner} total={total:?}"
                    );
                }
            }
        }
    }
}
