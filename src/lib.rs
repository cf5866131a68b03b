//! Spotistats CLI Library
//!
//! This library provides a command-line client for exploring personal
//! listening statistics on Spotify and building playlists from them. It
//! includes the OAuth 2.0 PKCE client with its token lifecycle, a pluggable
//! key-value storage for credentials, and the view logic behind the CLI
//! commands.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error type shared across the crate
//! - `management` - Credential and key-value storage
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Authenticated Spotify Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers and small utilities
//! - `view` - Display items, selections and playlist generation
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spotistats::{config, management::FileStore, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spotistats::Result<()> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::new(
//!         config::Config::from_env()?,
//!         Arc::new(FileStore::default_location()),
//!     );
//!     println!("authenticated: {}", client.is_authenticated().await);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod view;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Waiting for authorization in your browser...");
/// info!("Creating playlist with {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to give positive feedback when an operation completed.
///
/// # Example
///
/// ```
/// success!("Authentication successful!");
/// success!("Playlist \"{}\" created successfully!", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing, so it
/// should only be used for failures the command cannot recover from.
///
/// # Example
///
/// ```
/// error!("Not authenticated. Please run spotistats auth");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser. Please navigate to the following URL manually:\n{}", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
