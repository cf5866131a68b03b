use std::sync::Arc;

use spotistats::{
    config::Config,
    management::{
        ACCESS_TOKEN_KEY, AUTH_STATE_KEY, CODE_VERIFIER_KEY, CredentialStore, EXPIRES_AT_KEY,
        FileStore, KeyValueStore, MemoryStore, REFRESH_TOKEN_KEY,
    },
    spotify::SpotifyClient,
    types::{PkceSession, TokenResponse},
};
use tempfile::TempDir;

fn token(access_token: &str, refresh_token: Option<&str>) -> TokenResponse {
    TokenResponse {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.map(str::to_string),
        expires_in: 3600,
        scope: None,
        token_type: Some("Bearer".to_string()),
    }
}

#[tokio::test]
async fn test_file_store_missing_file_reads_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("storage.json"));

    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.unwrap(), None);
    store.delete(ACCESS_TOKEN_KEY).await.unwrap();
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_file_store_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let store = FileStore::new(path.clone());
    store.set("a", "1").await.unwrap();
    store.set("b", "2").await.unwrap();
    store.set("a", "3").await.unwrap();

    let reopened = FileStore::new(path.clone());
    assert_eq!(reopened.get("a").await.unwrap().as_deref(), Some("3"));
    assert_eq!(reopened.get("b").await.unwrap().as_deref(), Some("2"));

    reopened.delete("a").await.unwrap();
    reopened.delete("a").await.unwrap();
    assert_eq!(store.get("a").await.unwrap(), None);

    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json, serde_json::json!({ "b": "2" }));
}

#[tokio::test]
async fn test_file_store_rejects_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").unwrap();

    let store = FileStore::new(path);
    assert!(matches!(
        store.get("a").await,
        Err(spotistats::Error::Serialization(_))
    ));
}

#[tokio::test]
async fn test_file_store_write_leaves_no_temporary_file() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("storage.json"));

    store.set("a", "1").await.unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["storage.json"]);
}

#[tokio::test]
async fn test_corrupt_file_does_not_block_logout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{\"spotify_access_token\": \"trunc").unwrap();

    let credentials = CredentialStore::new(Arc::new(FileStore::new(path.clone())));
    credentials.clear().await.unwrap();

    assert_eq!(credentials.load().await.unwrap(), None);
    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json, serde_json::json!({}));
}

#[tokio::test]
async fn test_corrupt_file_does_not_block_login() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").unwrap();

    let store = Arc::new(FileStore::new(path));
    let config = Config {
        client_id: "test-client".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        auth_url: "https://accounts.example.com/authorize".to_string(),
        token_url: "http://127.0.0.1:9/api/token".to_string(),
        api_url: "http://127.0.0.1:9/v1".to_string(),
        server_addr: "127.0.0.1:0".to_string(),
    };
    let client = SpotifyClient::new(config, store.clone());

    client.initiate_login().await.unwrap();
    assert_eq!(store.get(AUTH_STATE_KEY).await.unwrap().unwrap().len(), 16);
    assert_eq!(store.get(CODE_VERIFIER_KEY).await.unwrap().unwrap().len(), 128);
}

#[tokio::test]
async fn test_memory_store() {
    let store = MemoryStore::new();
    assert!(store.is_empty().await);

    store.set("a", "1").await.unwrap();
    assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
    assert_eq!(store.len().await, 1);

    store.delete("a").await.unwrap();
    store.delete("a").await.unwrap();
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_credential_store_save_and_load() {
    let store = Arc::new(MemoryStore::new());
    let credentials = CredentialStore::new(store.clone());
    assert_eq!(credentials.load().await.unwrap(), None);

    credentials
        .save(&token("access-1", Some("refresh-1")), 1_000)
        .await
        .unwrap();

    let credential = credentials.load().await.unwrap().unwrap();
    assert_eq!(credential.access_token, "access-1");
    assert_eq!(credential.refresh_token.as_deref(), Some("refresh-1"));
    assert_eq!(credential.expires_at_ms, Some(3_601_000));
    assert_eq!(
        store.get(EXPIRES_AT_KEY).await.unwrap().as_deref(),
        Some("3601000")
    );
}

#[tokio::test]
async fn test_credential_store_keeps_refresh_token_when_omitted() {
    let store = Arc::new(MemoryStore::new());
    let credentials = CredentialStore::new(store.clone());

    credentials
        .save(&token("access-1", Some("refresh-1")), 0)
        .await
        .unwrap();
    credentials.save(&token("access-2", None), 0).await.unwrap();
    credentials
        .save(&token("access-3", Some("")), 0)
        .await
        .unwrap();

    assert_eq!(
        store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
        Some("access-3")
    );
    assert_eq!(
        store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(),
        Some("refresh-1")
    );
}

#[tokio::test]
async fn test_credential_store_rejects_out_of_range_lifetime() {
    let store = Arc::new(MemoryStore::new());
    let credentials = CredentialStore::new(store.clone());

    let mut response = token("access-1", Some("refresh-1"));
    response.expires_in = u64::MAX;
    let result = credentials.save(&response, 1_000).await;

    assert!(matches!(result, Err(spotistats::Error::Storage(_))));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_credential_store_clear_keeps_pkce_session() {
    let store = Arc::new(MemoryStore::new());
    let credentials = CredentialStore::new(store.clone());

    credentials
        .save(&token("access-1", Some("refresh-1")), 0)
        .await
        .unwrap();
    credentials
        .save_pkce(&PkceSession {
            code_verifier: "verifier".to_string(),
            state: "state".to_string(),
        })
        .await
        .unwrap();

    credentials.clear().await.unwrap();
    assert_eq!(credentials.load().await.unwrap(), None);
    assert_eq!(credentials.refresh_token().await.unwrap(), None);
    assert_eq!(store.len().await, 2);

    credentials.clear_pkce().await.unwrap();
    assert_eq!(store.get(CODE_VERIFIER_KEY).await.unwrap(), None);
    assert_eq!(store.get(AUTH_STATE_KEY).await.unwrap(), None);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_credential_store_over_file_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    let credentials = CredentialStore::new(Arc::new(FileStore::new(path.clone())));
    credentials
        .save(&token("access-1", Some("refresh-1")), 0)
        .await
        .unwrap();

    let reopened = CredentialStore::new(Arc::new(FileStore::new(path)));
    let credential = reopened.load().await.unwrap().unwrap();
    assert_eq!(credential.access_token, "access-1");
    assert_eq!(credential.refresh_token.as_deref(), Some("refresh-1"));
}
