//! # API Module
//!
//! HTTP endpoints served by the local callback server while `spotistats auth`
//! is waiting for the user to authorize the application in the browser.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the OAuth redirect (`code`, `state` or `error`)
//!   and completes the PKCE code exchange through the shared client.
//! - [`health`] - Returns application status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotistats::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
