//! # View Module
//!
//! Presentation state shared by the CLI commands: the unified [`DisplayItem`]
//! shape every listing is rendered from, the per-page selection of items, and
//! the playlist generation flow built on top of a selection.
//!
//! [`DisplayItem`]: crate::types::DisplayItem

mod genres;
mod items;
mod page;
mod playlist;

pub use genres::top_genres;
pub use items::ItemSource;
pub use items::artist_item;
pub use items::play_item;
pub use items::track_item;
pub use page::ItemPage;
pub use page::SelectionSet;
pub use playlist::DEFAULT_PLAYLIST_DESCRIPTION;
pub use playlist::DEFAULT_PLAYLIST_NAME;
pub use playlist::PlaylistRequest;
pub use playlist::generate_playlist;
pub use playlist::track_uri;
