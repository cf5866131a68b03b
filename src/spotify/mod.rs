//! # Spotify Integration Module
//!
//! This module provides the authenticated client for the Spotify Web API. It owns
//! the OAuth 2.0 PKCE handshake, the lifecycle of the stored access and refresh
//! tokens, and the single entry point through which every resource request is
//! sent.
//!
//! ## Architecture
//!
//! ```text
//! CLI / View Layer
//!          ↓
//! SpotifyClient
//!     ├── Authentication (PKCE login, refresh, logout)      [`auth`]
//!     ├── Authenticated requests (bearer, retry once on 401)
//!     ├── User profile                                       [`user`]
//!     ├── Top tracks and artists                             [`top`]
//!     ├── Recently played                                    [`player`]
//!     └── Playlist creation                                  [`playlist`]
//!          ↓
//! CredentialStore → KeyValueStore (file or memory)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Request Lifecycle
//!
//! [`SpotifyClient::authenticated_request`] runs every resource call through the
//! same sequence:
//!
//! 1. **Token check**: an expired or missing token is refreshed first. If that
//!    fails the credentials are cleared and no request is sent.
//! 2. **Request**: the call is sent with `Authorization: Bearer <token>`.
//! 3. **Single retry**: a `401` triggers exactly one refresh and one retry. If
//!    either fails the credentials are cleared.
//! 4. **Result**: other error statuses become [`Error::ApiRequest`], success
//!    bodies are parsed as JSON.
//!
//! Refreshes are serialized so concurrent callers share one in-flight refresh
//! instead of rotating the refresh token several times.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use spotistats::{config::Config, management::FileStore, spotify::SpotifyClient};
//!
//! let client = SpotifyClient::new(Config::from_env()?, Arc::new(FileStore::default_location()));
//! let user = client.get_current_user().await?;
//! ```

pub mod auth;
pub mod player;
pub mod playlist;
pub mod top;
pub mod user;

use std::sync::Arc;

use reqwest::{
    Client, Method, Response, StatusCode, Url,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::{Error, Result},
    management::{CredentialStore, KeyValueStore},
};

/// Method, extra headers and JSON body of a resource request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    /// Adds a header. `Authorization` is always replaced by the current token.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Authenticated Spotify Web API client.
///
/// Construct once and share it by `Arc`; all state lives in the injected
/// storage.
#[derive(Debug)]
pub struct SpotifyClient {
    config: Config,
    http: Client,
    credentials: CredentialStore,
    refresh_guard: Mutex<()>,
}

impl SpotifyClient {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_http_client(config, store, Client::new())
    }

    pub fn with_http_client(config: Config, store: Arc<dyn KeyValueStore>, http: Client) -> Self {
        Self {
            config,
            http,
            credentials: CredentialStore::new(store),
            refresh_guard: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sends a request to `API_BASE_URL + endpoint` and parses the JSON answer.
    ///
    /// # Errors
    ///
    /// - [`Error::ReauthenticationRequired`] if no usable token could be
    ///   obtained, or if the request was rejected with `401` and the single
    ///   refresh-and-retry failed. Stored credentials are cleared in both cases.
    /// - [`Error::ApiRequest`] for any other non-success status.
    /// - [`Error::Network`] if the first attempt could not be sent.
    /// - [`Error::Serialization`] if the body is not the expected JSON.
    pub async fn authenticated_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let token = match self.valid_access_token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "no usable access token");
                self.discard_credentials().await;
                return Err(Error::ReauthenticationRequired);
            }
        };

        let response = self.send(endpoint, &options, &token).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!(endpoint, "access token rejected, refreshing once");
            return self.retry_unauthorized(endpoint, &options, &token).await;
        }

        parse_response(response).await
    }

    async fn retry_unauthorized<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        rejected_token: &str,
    ) -> Result<T> {
        let token = match self.refresh_rejected(rejected_token).await {
            Ok(token) => token,
            Err(e) => return self.give_up(e).await,
        };

        let response = match self.send(endpoint, options, &token).await {
            Ok(response) => response,
            Err(e) => return self.give_up(e).await,
        };

        let status = response.status();
        if !status.is_success() {
            return self
                .give_up(Error::ApiRequest {
                    status_code: status.as_u16(),
                })
                .await;
        }

        parse_body(response).await
    }

    async fn give_up<T>(&self, cause: Error) -> Result<T> {
        tracing::warn!(error = %cause, "retry after 401 failed, clearing credentials");
        self.discard_credentials().await;
        Err(Error::ReauthenticationRequired)
    }

    async fn discard_credentials(&self) {
        if let Err(e) = self.logout().await {
            tracing::warn!(error = %e, "failed to clear stored credentials");
        }
    }

    async fn send(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        token: &str,
    ) -> Result<Response> {
        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), endpoint);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::TokenRefresh(format!("invalid access token: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);

        let mut request = self
            .http
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        tracing::debug!(method = %options.method, %url, "sending request");
        Ok(request.send().await?)
    }
}

/// Joins `segments` into an endpoint path, percent-encoding each one.
pub(crate) fn endpoint_path(segments: &[&str]) -> Result<String> {
    let mut url = Url::parse("http://localhost/")
        .map_err(|e| Error::Config(format!("Invalid endpoint base: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| Error::Config("Cannot build endpoint path".to_string()))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::ApiRequest {
            status_code: status.as_u16(),
        });
    }
    parse_body(response).await
}

async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
