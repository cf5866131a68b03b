use crate::{
    error::Result,
    spotify::{RequestOptions, SpotifyClient, endpoint_path},
    types::{
        AddTracksToPlaylistRequest, AddTracksToPlaylistResponse, CreatePlaylistRequest, Playlist,
    },
};

/// Spotify accepts at most this many URIs per add-tracks request.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

impl SpotifyClient {
    /// Creates an empty playlist owned by `user_id`.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner, as returned by [`SpotifyClient::get_current_user`]
    /// * `name` - Playlist name
    /// * `description` - Free text shown under the name
    /// * `is_public` - Whether the playlist shows up on the user's profile
    ///
    /// # Errors
    ///
    /// Returns [`Error::ApiRequest`] if Spotify refuses the playlist, for
    /// example when the session lacks the playlist-modify scopes.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let user = client.get_current_user().await?;
    /// let playlist = client
    ///     .create_playlist(&user.id, "Weekend", "Picked by hand", false)
    ///     .await?;
    /// ```
    ///
    /// [`Error::ApiRequest`]: crate::error::Error::ApiRequest
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        is_public: bool,
    ) -> Result<Playlist> {
        let body = serde_json::to_value(CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public: is_public,
        })?;

        let endpoint = endpoint_path(&["users", user_id, "playlists"])?;
        self.authenticated_request(&endpoint, RequestOptions::post(body))
            .await
    }

    /// Appends `track_uris` (`spotify:track:<id>`) to a playlist.
    ///
    /// At most [`MAX_TRACKS_PER_REQUEST`] URIs are accepted per call; callers
    /// with more split them up. Returns the playlist's new snapshot id.
    pub async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> Result<AddTracksToPlaylistResponse> {
        let body = serde_json::to_value(AddTracksToPlaylistRequest {
            uris: track_uris.to_vec(),
        })?;

        let endpoint = endpoint_path(&["playlists", playlist_id, "tracks"])?;
        self.authenticated_request(&endpoint, RequestOptions::post(body))
            .await
    }
}
