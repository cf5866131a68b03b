use reqwest::{Response, Url};

use crate::{
    error::{Error, Result},
    spotify::SpotifyClient,
    types::{PkceSession, TokenInfo, TokenResponse},
    utils,
};

impl SpotifyClient {
    /// Starts a PKCE login and returns the authorization URL to open.
    ///
    /// Generates a fresh code verifier and state, stores both and derives the
    /// S256 code challenge sent along with the request. Any previous pending
    /// session is overwritten.
    pub async fn initiate_login(&self) -> Result<Url> {
        let session = PkceSession {
            code_verifier: utils::generate_code_verifier(),
            state: utils::generate_state(),
        };
        let code_challenge = utils::generate_code_challenge(&session.code_verifier);
        let scope = self.config.scope();

        self.credentials.save_pkce(&session).await?;

        Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("scope", scope.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("state", session.state.as_str()),
                ("code_challenge_method", "S256"),
                ("code_challenge", code_challenge.as_str()),
            ],
        )
        .map_err(|e| Error::Config(format!("Invalid auth url: {}", e)))
    }

    /// Exchanges the authorization code received on the callback for tokens.
    ///
    /// # Errors
    ///
    /// - [`Error::StateMismatch`] if `returned_state` is not the stored state.
    ///   The token endpoint is not contacted.
    /// - [`Error::MissingVerifier`] if no code verifier is stored.
    /// - [`Error::TokenExchange`] if the token endpoint rejects the code.
    pub async fn complete_login(&self, code: &str, returned_state: &str) -> Result<TokenResponse> {
        let stored_state = self.credentials.pkce_state().await?;
        if stored_state.as_deref() != Some(returned_state) {
            return Err(Error::StateMismatch);
        }

        let code_verifier = self
            .credentials
            .pkce_verifier()
            .await?
            .ok_or(Error::MissingVerifier)?;

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("code_verifier", code_verifier.as_str()),
            ])
            .send()
            .await?;

        let token = read_token_response(response)
            .await
            .map_err(Error::TokenExchange)?;

        self.credentials.save(&token, utils::now_millis()).await?;
        self.credentials.clear_pkce().await?;

        tracing::info!("authorization code exchanged");
        Ok(token)
    }

    /// Obtains a new access token with the stored refresh token.
    ///
    /// The stored refresh token is kept when the response does not carry a
    /// new one.
    pub async fn refresh(&self) -> Result<TokenResponse> {
        let _guard = self.refresh_guard.lock().await;
        self.refresh_locked().await
    }

    /// True iff an access token is stored and expires more than a minute from now.
    pub async fn is_authenticated(&self) -> bool {
        match self.credentials.load().await {
            Ok(Some(credential)) => credential.is_valid_at(utils::now_millis()),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored credentials");
                false
            }
        }
    }

    /// Whether a refresh token is stored.
    ///
    /// An expired session with a refresh token is still usable: the next
    /// request refreshes it. Storage failures count as no token.
    pub async fn has_refresh_token(&self) -> bool {
        matches!(self.credentials.refresh_token().await, Ok(Some(_)))
    }

    /// Lifetime summary of the stored credential, `None` when logged out.
    ///
    /// # Returns
    ///
    /// - `expires_at_ms` - Stored expiry, if any
    /// - `expires_in_secs` - Seconds left, `0` once expired
    /// - `is_valid` - Same test as [`SpotifyClient::is_authenticated`]
    /// - `has_refresh_token` - Whether the session can be refreshed
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the credential cannot be read.
    pub async fn token_info(&self) -> Result<Option<TokenInfo>> {
        let Some(credential) = self.credentials.load().await? else {
            return Ok(None);
        };

        let now = utils::now_millis();
        let expires_in_secs = credential
            .expires_at_ms
            .map(|at| ((at - now) / 1000).max(0))
            .unwrap_or(0);

        Ok(Some(TokenInfo {
            expires_at_ms: credential.expires_at_ms,
            expires_in_secs,
            is_valid: credential.is_valid_at(now),
            has_refresh_token: credential.refresh_token.is_some(),
        }))
    }

    /// Removes every stored credential field. Calling it twice is harmless.
    pub async fn logout(&self) -> Result<()> {
        self.credentials.clear().await
    }

    /// Returns a valid access token, refreshing it first when needed.
    pub(crate) async fn valid_access_token(&self) -> Result<String> {
        if let Some(token) = self.current_valid_token(None).await? {
            return Ok(token);
        }

        let _guard = self.refresh_guard.lock().await;
        // another caller may have refreshed while we waited for the guard
        if let Some(token) = self.current_valid_token(None).await? {
            return Ok(token);
        }

        tracing::debug!("access token missing or expired, refreshing");
        Ok(self.refresh_locked().await?.access_token)
    }

    /// Returns a token to retry with after `rejected` got a 401.
    pub(crate) async fn refresh_rejected(&self, rejected: &str) -> Result<String> {
        let _guard = self.refresh_guard.lock().await;
        if let Some(token) = self.current_valid_token(Some(rejected)).await? {
            tracing::debug!("token already rotated by a concurrent refresh");
            return Ok(token);
        }

        Ok(self.refresh_locked().await?.access_token)
    }

    async fn current_valid_token(&self, except: Option<&str>) -> Result<Option<String>> {
        Ok(self
            .credentials
            .load()
            .await?
            .filter(|c| c.is_valid_at(utils::now_millis()))
            .filter(|c| Some(c.access_token.as_str()) != except)
            .map(|c| c.access_token))
    }

    /// Caller must hold `refresh_guard`.
    async fn refresh_locked(&self) -> Result<TokenResponse> {
        let refresh_token = self
            .credentials
            .refresh_token()
            .await?
            .ok_or(Error::NoRefreshToken)?;

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await?;

        let token = read_token_response(response)
            .await
            .map_err(Error::TokenRefresh)?;

        self.credentials.save(&token, utils::now_millis()).await?;

        tracing::info!(
            rotated = token.refresh_token.is_some(),
            "access token refreshed"
        );
        Ok(token)
    }
}

async fn read_token_response(response: Response) -> std::result::Result<TokenResponse, String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("status {}: {}", status.as_u16(), body.trim()));
    }

    let token = response
        .json::<TokenResponse>()
        .await
        .map_err(|e| e.to_string())?;

    if token.expires_at_ms(utils::now_millis()).is_none() {
        return Err(format!("expires_in out of range: {}", token.expires_in));
    }
    Ok(token)
}
