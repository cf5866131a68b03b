use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{error::Error, server::CallbackState, warning};

/// Handles the authorization redirect.
///
/// Reports the outcome of the login back to the waiting `auth` command and
/// renders a short status page for the browser window.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<CallbackState>,
) -> Html<String> {
    let outcome = if let Some(error) = params.get("error") {
        Err(Error::Authorization(error.clone()))
    } else {
        match (params.get("code"), params.get("state")) {
            (Some(code), Some(returned_state)) => {
                state.client.complete_login(code, returned_state).await
            }
            _ => Err(Error::Authorization(
                "Invalid callback parameters".to_string(),
            )),
        }
    };

    let page = match &outcome {
        Ok(_) => {
            "<h2>Login successful.</h2><p>You can close this browser window.</p>".to_string()
        }
        Err(e) => {
            warning!("Login failed: {}", e);
            format!(
                "<h2>Login failed.</h2><p>{}</p><p>Run <code>spotistats auth</code> to try again.</p>",
                escape_html(&e.to_string())
            )
        }
    };

    if state.outcome.send(outcome).await.is_err() {
        tracing::debug!("no one is waiting for the login outcome");
    }

    Html(page)
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
