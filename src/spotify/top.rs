use crate::{
    error::Result,
    spotify::{RequestOptions, SpotifyClient},
    types::{Artist, Paging, TimeRange, Track},
};

impl SpotifyClient {
    /// The user's most listened tracks over `time_range`.
    ///
    /// # Arguments
    ///
    /// * `time_range` - Window the affinity is computed over
    /// * `limit` - Number of items to return (Spotify accepts 1-50)
    ///
    /// # Errors
    ///
    /// - [`Error::ReauthenticationRequired`] if the session is gone
    /// - [`Error::ApiRequest`] for any other rejected request
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let top = client.get_top_tracks(TimeRange::ShortTerm, 10).await?;
    /// println!("Your top track lately: {}", top.items[0].name);
    /// ```
    ///
    /// [`Error::ReauthenticationRequired`]: crate::error::Error::ReauthenticationRequired
    /// [`Error::ApiRequest`]: crate::error::Error::ApiRequest
    pub async fn get_top_tracks(&self, time_range: TimeRange, limit: u32) -> Result<Paging<Track>> {
        let endpoint = format!(
            "/me/top/tracks?time_range={time_range}&limit={limit}",
            time_range = time_range.as_str(),
            limit = limit
        );
        self.authenticated_request(&endpoint, RequestOptions::get())
            .await
    }

    /// The user's most listened artists over `time_range`.
    ///
    /// Artists carry their genres, which is what the genre summary is built
    /// from. Takes the same arguments and fails the same way as
    /// [`SpotifyClient::get_top_tracks`].
    pub async fn get_top_artists(&self, time_range: TimeRange, limit: u32) -> Result<Paging<Artist>> {
        let endpoint = format!(
            "/me/top/artists?time_range={time_range}&limit={limit}",
            time_range = time_range.as_str(),
            limit = limit
        );
        self.authenticated_request(&endpoint, RequestOptions::get())
            .await
    }
}
