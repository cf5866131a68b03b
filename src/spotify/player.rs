use crate::{
    error::Result,
    spotify::{RequestOptions, SpotifyClient},
    types::{Paging, PlayHistory},
};

impl SpotifyClient {
    /// Tracks the user played most recently, newest first.
    ///
    /// # Arguments
    ///
    /// * `limit` - Number of plays to return (Spotify accepts 1-50)
    ///
    /// # Returns
    ///
    /// A [`Paging`] of [`PlayHistory`] entries, each holding the full track and
    /// the ISO 8601 timestamp it was played at.
    ///
    /// # Errors
    ///
    /// Fails like [`SpotifyClient::authenticated_request`]; a rejected or
    /// unrefreshable session ends in [`Error::ReauthenticationRequired`].
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let plays = client.get_recently_played(20).await?;
    /// for play in plays.items {
    ///     println!("{} at {}", play.track.name, play.played_at);
    /// }
    /// ```
    ///
    /// [`Error::ReauthenticationRequired`]: crate::error::Error::ReauthenticationRequired
    pub async fn get_recently_played(&self, limit: u32) -> Result<Paging<PlayHistory>> {
        let endpoint = format!("/me/player/recently-played?limit={}", limit);
        self.authenticated_request(&endpoint, RequestOptions::get())
            .await
    }
}
