//! Error types shared by the Spotify client, the storage layer and the views.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while talking to Spotify or managing credentials.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The authorization server redirected back with an error or incomplete parameters.
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// The `state` returned by the authorization redirect does not match the stored one.
    #[error("State parameter mismatch")]
    StateMismatch,

    /// No PKCE code verifier is stored for the pending login.
    #[error("Code verifier not found")]
    MissingVerifier,

    /// The token endpoint rejected the authorization code exchange.
    #[error("Failed to exchange code for token: {0}")]
    TokenExchange(String),

    /// The token endpoint rejected the refresh request.
    #[error("Failed to refresh token: {0}")]
    TokenRefresh(String),

    /// A refresh was requested but no refresh token is stored.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// Stored credentials are unusable and have been cleared.
    #[error("Authentication failed. Please run spotistats auth")]
    ReauthenticationRequired,

    /// The resource API answered with a non-success status.
    #[error("API request failed: {status_code}")]
    ApiRequest { status_code: u16 },

    /// Transport level failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The key-value storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// A playlist was requested without any selected items.
    #[error("No items selected")]
    EmptySelection,
}

impl Error {
    /// Whether the user has to log in again to recover from this error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::Authorization(_)
                | Error::StateMismatch
                | Error::MissingVerifier
                | Error::TokenExchange(_)
                | Error::TokenRefresh(_)
                | Error::NoRefreshToken
                | Error::ReauthenticationRequired
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Storage(e.to_string())
    }
}
