use crate::{
    error::Result,
    spotify::{RequestOptions, SpotifyClient},
    types::User,
};

impl SpotifyClient {
    /// Profile of the logged in user (`GET /me`).
    ///
    /// Playlist creation needs the user id returned here.
    pub async fn get_current_user(&self) -> Result<User> {
        self.authenticated_request("/me", RequestOptions::get())
            .await
    }
}
