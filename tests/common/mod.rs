#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use spotistats::{
    config::Config,
    management::{
        ACCESS_TOKEN_KEY, EXPIRES_AT_KEY, KeyValueStore, MemoryStore, REFRESH_TOKEN_KEY,
    },
    spotify::SpotifyClient,
    utils,
};
use wiremock::MockServer;

pub const TOKEN_PATH: &str = "/api/token";

// Config pointing every endpoint at the mock server
pub fn test_config(server: &MockServer) -> Config {
    Config {
        client_id: "test-client".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        auth_url: "https://accounts.example.com/authorize".to_string(),
        token_url: format!("{}{}", server.uri(), TOKEN_PATH),
        api_url: format!("{}/v1", server.uri()),
        server_addr: "127.0.0.1:0".to_string(),
    }
}

pub fn test_client(server: &MockServer) -> (SpotifyClient, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let client = SpotifyClient::new(test_config(server), store.clone());
    (client, store)
}

// Stores a credential expiring `expires_in_ms` from now (negative for expired)
pub async fn seed_credential(
    store: &MemoryStore,
    access_token: &str,
    refresh_token: Option<&str>,
    expires_in_ms: i64,
) {
    store.set(ACCESS_TOKEN_KEY, access_token).await.unwrap();
    if let Some(refresh_token) = refresh_token {
        store.set(REFRESH_TOKEN_KEY, refresh_token).await.unwrap();
    }
    let expires_at = utils::now_millis() + expires_in_ms;
    store
        .set(EXPIRES_AT_KEY, &expires_at.to_string())
        .await
        .unwrap();
}

pub fn token_body(access_token: &str, refresh_token: Option<&str>) -> Value {
    match refresh_token {
        Some(refresh_token) => json!({
            "access_token": access_token,
            "refresh_token": refresh_token,
            "token_type": "Bearer",
            "expires_in": 3600
        }),
        None => json!({
            "access_token": access_token,
            "token_type": "Bearer",
            "expires_in": 3600
        }),
    }
}

pub fn user_body(id: &str) -> Value {
    json!({
        "id": id,
        "display_name": "Test User",
        "email": "test@example.com",
        "country": "DE",
        "product": "premium"
    })
}

pub fn track_body(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "artists": [
            { "id": "a1", "name": "Zedd" },
            { "id": "a2", "name": "Foxes" }
        ],
        "album": {
            "id": "al1",
            "name": "Clarity",
            "release_date": "2012-10-02",
            "images": [
                { "url": "https://i.scdn.co/image/large", "height": 640, "width": 640 },
                { "url": "https://i.scdn.co/image/small", "height": 64, "width": 64 }
            ]
        }
    })
}

pub fn artist_body(id: &str, name: &str, genres: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "genres": genres,
        "images": [],
        "followers": { "total": 42 },
        "popularity": 70
    })
}

// Decodes an application/x-www-form-urlencoded body into key/value pairs
pub fn form_pairs(body: &[u8]) -> Vec<(String, String)> {
    let body = String::from_utf8_lossy(body);
    reqwest::Url::parse(&format!("http://localhost/?{}", body))
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn form_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}
