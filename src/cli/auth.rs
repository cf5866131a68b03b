use std::{sync::Arc, time::Duration};

use chrono::{Local, TimeZone};
use tokio::sync::{mpsc, oneshot};

use crate::{
    cli::fail,
    error, info,
    server::{self, CallbackState},
    spotify::SpotifyClient,
    success, warning,
};

/// How long `auth` waits for the browser to come back to the callback.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the browser login.
///
/// Starts the callback server, opens the authorization URL and waits up to
/// two minutes for the redirect. Skipped when a valid session exists unless
/// `force` is set.
pub async fn auth(client: Arc<SpotifyClient>, force: bool) {
    if !force && client.is_authenticated().await {
        success!("Already authenticated. Use --force to log in again.");
        return;
    }

    let listener = match server::bind_callback_server(&client.config().server_addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Cannot start callback server. Err: {}", e),
    };

    let (outcome_tx, mut outcome_rx) = mpsc::channel(1);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let state = CallbackState {
        client: Arc::clone(&client),
        outcome: outcome_tx,
    };
    let server = tokio::spawn(server::start_api_server(listener, state, shutdown_rx));

    let auth_url = match client.initiate_login().await {
        Ok(url) => url,
        Err(e) => fail("Cannot start login", e),
    };

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for authorization in your browser...");
    }

    let outcome = tokio::time::timeout(LOGIN_TIMEOUT, outcome_rx.recv()).await;

    let _ = shutdown_tx.send(());
    match server.await {
        Ok(Err(e)) => tracing::warn!(error = %e, "callback server stopped with an error"),
        Err(e) => tracing::warn!(error = %e, "callback server task failed"),
        Ok(Ok(())) => {}
    }

    match outcome {
        Ok(Some(Ok(_))) => success!("Authentication successful!"),
        Ok(Some(Err(e))) => error!("{}\nPlease run spotistats auth again.", e),
        Ok(None) | Err(_) => error!("Authentication failed or timed out."),
    }
}

/// Forgets the stored session.
pub async fn logout(client: &SpotifyClient) {
    match client.logout().await {
        Ok(()) => success!("Logged out."),
        Err(e) => error!("Failed to clear credentials. Err: {}", e),
    }
}

/// Shows how long the stored token is valid and whose account it belongs to.
pub async fn status(client: &SpotifyClient) {
    let token_info = match client.token_info().await {
        Ok(Some(info)) => info,
        Ok(None) => {
            warning!("Not authenticated. Please run spotistats auth");
            return;
        }
        Err(e) => error!("Failed to read credentials. Err: {}", e),
    };

    let expires_at = token_info
        .expires_at_ms
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if token_info.is_valid {
        success!(
            "Authenticated. Token valid for {} (until {})",
            token_info.expires_in_display(),
            expires_at
        );
    } else {
        warning!("Access token: {}", token_info.expires_in_display());
        if !token_info.has_refresh_token {
            warning!("No refresh token stored. Please run spotistats auth");
            return;
        }
    }

    match client.get_current_user().await {
        Ok(user) => info!(
            "Logged in as {} ({})",
            user.display_name.unwrap_or_else(|| user.id.clone()),
            user.id
        ),
        Err(e) => fail("Failed to load profile", e),
    }
}
