use std::sync::Arc;

use crate::{
    error::{Error, Result},
    management::KeyValueStore,
    types::{Credential, PkceSession, TokenResponse},
};

pub const ACCESS_TOKEN_KEY: &str = "spotify_access_token";
pub const REFRESH_TOKEN_KEY: &str = "spotify_refresh_token";
pub const EXPIRES_AT_KEY: &str = "spotify_token_expires_at";
pub const CODE_VERIFIER_KEY: &str = "code_verifier";
pub const AUTH_STATE_KEY: &str = "auth_state";

/// Reads and writes credentials and the pending PKCE session through a
/// [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns `None` when no access token is stored.
    pub async fn load(&self) -> Result<Option<Credential>> {
        let Some(access_token) = self.store.get(ACCESS_TOKEN_KEY).await? else {
            return Ok(None);
        };

        let refresh_token = self.refresh_token().await?;
        // an unparsable expiry is treated like a missing one
        let expires_at_ms = self
            .store
            .get(EXPIRES_AT_KEY)
            .await?
            .and_then(|v| v.trim().parse::<i64>().ok());

        Ok(Some(Credential {
            access_token,
            refresh_token,
            expires_at_ms,
        }))
    }

    pub async fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(REFRESH_TOKEN_KEY)
            .await?
            .filter(|t| !t.is_empty()))
    }

    /// Stores a token endpoint response received at `now_ms`.
    ///
    /// The refresh token is only overwritten when the response carries one.
    /// Nothing is written if `expires_in` is out of range.
    pub async fn save(&self, response: &TokenResponse, now_ms: i64) -> Result<()> {
        let expires_at = response.expires_at_ms(now_ms).ok_or_else(|| {
            Error::Storage(format!("token lifetime out of range: {}", response.expires_in))
        })?;

        self.store
            .set(ACCESS_TOKEN_KEY, &response.access_token)
            .await?;

        if let Some(refresh_token) = response.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            self.store.set(REFRESH_TOKEN_KEY, refresh_token).await?;
        }

        self.store
            .set(EXPIRES_AT_KEY, &expires_at.to_string())
            .await
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.delete(ACCESS_TOKEN_KEY).await?;
        self.store.delete(REFRESH_TOKEN_KEY).await?;
        self.store.delete(EXPIRES_AT_KEY).await
    }

    pub async fn save_pkce(&self, session: &PkceSession) -> Result<()> {
        self.store
            .set(CODE_VERIFIER_KEY, &session.code_verifier)
            .await?;
        self.store.set(AUTH_STATE_KEY, &session.state).await
    }

    pub async fn pkce_state(&self) -> Result<Option<String>> {
        self.store.get(AUTH_STATE_KEY).await
    }

    pub async fn pkce_verifier(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(CODE_VERIFIER_KEY)
            .await?
            .filter(|v| !v.is_empty()))
    }

    pub async fn clear_pkce(&self) -> Result<()> {
        self.store.delete(CODE_VERIFIER_KEY).await?;
        self.store.delete(AUTH_STATE_KEY).await
    }
}
