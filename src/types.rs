use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Payload returned by the token endpoint for both grant types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Absolute expiry for a response received at `now_ms`, `None` if
    /// `expires_in` is out of range.
    pub fn expires_at_ms(&self, now_ms: i64) -> Option<i64> {
        i64::try_from(self.expires_in)
            .ok()
            .and_then(|secs| secs.checked_mul(1000))
            .and_then(|ms| ms.checked_add(now_ms))
    }
}

/// Stored OAuth credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at_ms: Option<i64>,
}

impl Credential {
    /// Tokens closer than this to their expiry are treated as expired.
    pub const EXPIRY_BUFFER_MS: i64 = 60_000;

    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        match self.expires_at_ms {
            Some(expires_at) => expires_at - now_ms > Self::EXPIRY_BUFFER_MS,
            None => false,
        }
    }
}

/// Secrets generated for one pending authorization redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceSession {
    pub code_verifier: String,
    pub state: String,
}

/// Lifetime summary of the stored credential.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub expires_at_ms: Option<i64>,
    pub expires_in_secs: i64,
    pub is_valid: bool,
    pub has_refresh_token: bool,
}

impl TokenInfo {
    pub fn expires_in_display(&self) -> String {
        if !self.is_valid {
            if self.has_refresh_token {
                "Expired (will refresh on next use)".to_string()
            } else {
                "Expired".to_string()
            }
        } else {
            let hours = self.expires_in_secs / 3600;
            let minutes = (self.expires_in_secs % 3600) / 60;
            format!("{}h {}m", hours, minutes)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Approximately last 4 weeks
    ShortTerm,
    /// Approximately last 6 months
    #[default]
    MediumTerm,
    /// Approximately last year
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    pub artists: Vec<SimpleArtist>,
    pub album: Album,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistory {
    pub track: Track,
    pub played_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub snapshot_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistResponse {
    pub snapshot_id: String,
}

/// Track, artist or play flattened into one shape for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub cover_url: String,
    pub release_date: String,
    pub genres: Vec<String>,
    pub album_name: String,
}

#[derive(Tabled)]
pub struct DisplayItemTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "sel")]
    pub selected: String,
    pub name: String,
    pub artists: String,
    pub album: String,
    pub released: String,
    pub genres: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Tabled)]
pub struct GenreTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub genre: String,
    pub artists: usize,
}
