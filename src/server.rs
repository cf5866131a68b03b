use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use reqwest::Url;
use tokio::{
    net::TcpListener,
    sync::{mpsc, oneshot},
};

use crate::{
    api,
    error::{Error, Result},
    spotify::SpotifyClient,
    types::TokenResponse,
};

/// Shared with the callback handler.
#[derive(Debug, Clone)]
pub struct CallbackState {
    pub client: Arc<SpotifyClient>,
    pub outcome: mpsc::Sender<Result<TokenResponse>>,
}

/// Binds the callback server to the configured address.
pub async fn bind_callback_server(server_addr: &str) -> Result<TcpListener> {
    let addr = SocketAddr::from_str(server_addr)
        .map_err(|e| Error::Config(format!("Failed to parse server address: {}", e)))?;

    TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Config(format!("Failed to bind {}: {}", addr, e)))
}

/// Path component of the redirect URI, `/callback` if it cannot be parsed.
pub fn callback_path(redirect_uri: &str) -> String {
    Url::parse(redirect_uri)
        .ok()
        .map(|u| u.path().to_string())
        .filter(|p| p.len() > 1)
        .unwrap_or_else(|| "/callback".to_string())
}

pub fn router(state: CallbackState) -> Router {
    let path = callback_path(&state.client.config().redirect_uri);

    Router::new()
        .route("/health", get(api::health))
        .route(&path, get(api::callback))
        .layer(Extension(state))
}

/// Serves the callback routes until `shutdown` fires.
pub async fn start_api_server(
    listener: TcpListener,
    state: CallbackState,
    shutdown: oneshot::Receiver<()>,
) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = shutdown.await;
        })
        .await
        .map_err(|e| Error::Config(format!("Callback server failed: {}", e)))
}
