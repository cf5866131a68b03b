use std::collections::HashSet;

use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, playlist::MAX_TRACKS_PER_REQUEST},
    types::Playlist,
    view::ItemPage,
};

pub const DEFAULT_PLAYLIST_NAME: &str = "My Generated Playlist";
pub const DEFAULT_PLAYLIST_DESCRIPTION: &str = "Playlist created with Spotistats";

#[derive(Debug, Clone)]
pub struct PlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

impl Default for PlaylistRequest {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYLIST_NAME.to_string(),
            description: DEFAULT_PLAYLIST_DESCRIPTION.to_string(),
            public: false,
        }
    }
}

pub fn track_uri(id: &str) -> String {
    format!("spotify:track:{}", id)
}

/// Creates a playlist from the selected items of `page`.
///
/// Looks up the current user, creates the playlist and adds the selected
/// tracks, in that order. The first failing step aborts the whole operation
/// and leaves `page` untouched. On success the page is reset.
pub async fn generate_playlist(
    client: &SpotifyClient,
    page: &mut ItemPage,
    request: &PlaylistRequest,
) -> Result<Playlist> {
    if page.selection().is_empty() {
        return Err(Error::EmptySelection);
    }

    let mut seen = HashSet::new();
    let uris: Vec<String> = page
        .selected_items()
        .into_iter()
        .filter(|item| seen.insert(item.id.as_str()))
        .map(|item| track_uri(&item.id))
        .collect();

    let user = client.get_current_user().await?;
    let playlist = client
        .create_playlist(&user.id, &request.name, &request.description, request.public)
        .await?;

    for chunk in uris.chunks(MAX_TRACKS_PER_REQUEST) {
        client.add_tracks_to_playlist(&playlist.id, chunk).await?;
    }

    tracing::info!(playlist = %playlist.id, tracks = uris.len(), "playlist generated");
    page.reset();
    Ok(playlist)
}
