use clap::ValueEnum;

use crate::{
    error::Result,
    spotify::SpotifyClient,
    types::{Artist, DisplayItem, PlayHistory, TimeRange, Track},
};

/// Placeholder used when Spotify has no genres for an item.
pub const DEFAULT_GENRE: &str = "default";

/// Where a listing of items comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ItemSource {
    TopTracks,
    TopArtists,
    RecentlyPlayed,
}

impl ItemSource {
    pub fn label(&self) -> &'static str {
        match self {
            ItemSource::TopTracks => "Top Tracks",
            ItemSource::TopArtists => "Top Artists",
            ItemSource::RecentlyPlayed => "Recently Played",
        }
    }

    /// Fetches the source and maps every entry into a [`DisplayItem`].
    ///
    /// `time_range` is ignored for recently played tracks.
    pub async fn fetch(
        &self,
        client: &SpotifyClient,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<DisplayItem>> {
        let items = match self {
            ItemSource::TopTracks => client
                .get_top_tracks(time_range, limit)
                .await?
                .items
                .iter()
                .map(track_item)
                .collect(),
            ItemSource::TopArtists => client
                .get_top_artists(time_range, limit)
                .await?
                .items
                .iter()
                .map(artist_item)
                .collect(),
            ItemSource::RecentlyPlayed => client
                .get_recently_played(limit)
                .await?
                .items
                .iter()
                .map(play_item)
                .collect(),
        };
        Ok(items)
    }
}

pub fn track_item(track: &Track) -> DisplayItem {
    DisplayItem {
        id: track.id.clone(),
        name: track.name.clone(),
        artists: track.artists.iter().map(|a| a.name.clone()).collect(),
        cover_url: track
            .album
            .images
            .first()
            .map(|i| i.url.clone())
            .unwrap_or_default(),
        release_date: track.album.release_date.clone(),
        // tracks carry no genres
        genres: vec![DEFAULT_GENRE.to_string()],
        album_name: track.album.name.clone(),
    }
}

pub fn artist_item(artist: &Artist) -> DisplayItem {
    let genres = if artist.genres.is_empty() {
        vec![DEFAULT_GENRE.to_string()]
    } else {
        artist.genres.clone()
    };

    DisplayItem {
        id: artist.id.clone(),
        name: artist.name.clone(),
        artists: Vec::new(),
        cover_url: artist
            .images
            .first()
            .map(|i| i.url.clone())
            .unwrap_or_default(),
        release_date: String::new(),
        genres,
        album_name: String::new(),
    }
}

pub fn play_item(play: &PlayHistory) -> DisplayItem {
    track_item(&play.track)
}
