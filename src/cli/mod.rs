//! # CLI Module
//!
//! This module provides the command-line interface layer for Spotistats. Each
//! command checks the stored session, calls the shared [`SpotifyClient`],
//! maps the responses into display items and renders them as tables.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the OAuth 2.0 PKCE login through the browser
//! - [`logout`] - Forgets the stored credentials
//! - [`status`] - Shows whether a session exists and when it expires
//! - [`list`] - Lists top tracks, top artists or recently played tracks
//! - [`genres`] - Summarizes the genres of the top artists
//! - [`playlist`] - Builds a playlist from selected items of a listing
//!
//! ## Error Handling
//!
//! Failures stop the spinner and print a colored status line. Authentication
//! failures point the user at `spotistats auth`; data failures leave nothing
//! half done behind.
//!
//! [`SpotifyClient`]: crate::spotify::SpotifyClient

mod auth;
mod playlist;
mod top;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use auth::auth;
pub use auth::logout;
pub use auth::status;
pub use playlist::PlaylistSource;
pub use playlist::Selection;
pub use playlist::playlist;
pub use top::genres;
pub use top::list;

use crate::{error, error::Error, spotify::SpotifyClient};

/// Exits unless there is a session the client can use or refresh.
async fn require_session(client: &SpotifyClient) {
    if !client.is_authenticated().await && !client.has_refresh_token().await {
        error!("Not authenticated. Please run spotistats auth");
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

fn fail(context: &str, e: Error) -> ! {
    if e.is_auth_error() {
        error!("{}: {}\nPlease run spotistats auth", context, e);
    }
    error!("{}: {}", context, e);
}
