mod common;

use common::*;
use serde_json::json;
use spotistats::{
    Error,
    types::{Artist, DisplayItem, PlayHistory, TimeRange, Track},
    view::{
        self, ItemPage, ItemSource, PlaylistRequest, SelectionSet, artist_item, play_item,
        track_item,
    },
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

fn item(id: &str, genres: &[&str]) -> DisplayItem {
    DisplayItem {
        id: id.to_string(),
        name: format!("Item {}", id),
        artists: vec!["Someone".to_string()],
        cover_url: String::new(),
        release_date: String::new(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        album_name: String::new(),
    }
}

fn page_of(ids: &[&str]) -> ItemPage {
    ItemPage::new(ids.iter().map(|id| item(id, &["default"])).collect())
}

#[test]
fn test_track_item_mapping() {
    let track: Track = serde_json::from_value(track_body("t1", "Clarity")).unwrap();
    let item = track_item(&track);

    assert_eq!(item.id, "t1");
    assert_eq!(item.name, "Clarity");
    assert_eq!(item.artists, vec!["Zedd", "Foxes"]);
    assert_eq!(item.cover_url, "https://i.scdn.co/image/large");
    assert_eq!(item.release_date, "2012-10-02");
    assert_eq!(item.album_name, "Clarity");
    assert_eq!(item.genres, vec!["default"]);
}

#[test]
fn test_track_item_without_images() {
    let mut body = track_body("t1", "Clarity");
    body["album"]["images"] = json!([]);
    let track: Track = serde_json::from_value(body).unwrap();

    assert_eq!(track_item(&track).cover_url, "");
}

#[test]
fn test_artist_item_mapping() {
    let artist: Artist = serde_json::from_value(artist_body("ar1", "Zedd", &["edm", "pop"])).unwrap();
    let item = artist_item(&artist);

    assert_eq!(item.id, "ar1");
    assert_eq!(item.name, "Zedd");
    assert!(item.artists.is_empty());
    assert_eq!(item.cover_url, "");
    assert_eq!(item.release_date, "");
    assert_eq!(item.album_name, "");
    assert_eq!(item.genres, vec!["edm", "pop"]);

    let artist: Artist = serde_json::from_value(artist_body("ar2", "Nobody", &[])).unwrap();
    assert_eq!(artist_item(&artist).genres, vec!["default"]);
}

#[test]
fn test_play_item_uses_track() {
    let play: PlayHistory = serde_json::from_value(json!({
        "track": track_body("t2", "Stay The Night"),
        "played_at": "2024-05-01T10:00:00Z"
    }))
    .unwrap();

    let item = play_item(&play);
    assert_eq!(item.id, "t2");
    assert_eq!(item.genres, vec!["default"]);
}

#[test]
fn test_selection_set_toggle() {
    let mut selection = SelectionSet::new();
    assert!(selection.toggle("a"));
    assert!(selection.is_selected("a"));
    assert!(!selection.toggle("a"));
    assert!(!selection.is_selected("a"));
    assert!(selection.is_empty());

    selection.select_all(["a", "b", "b"]);
    assert_eq!(selection.len(), 2);
    selection.clear();
    assert!(selection.is_empty());
}

#[test]
fn test_item_page_selection() {
    let mut page = page_of(&["a", "b", "c"]);
    assert!(!page.all_selected());

    page.toggle("c");
    page.toggle("a");
    let selected: Vec<&str> = page.selected_items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(selected, vec!["a", "c"]);

    page.select_all();
    assert!(page.all_selected());

    page.clear_selection();
    assert!(page.selection().is_empty());
    assert_eq!(page.items().len(), 3);
}

#[test]
fn test_item_page_replace_clears_selection() {
    let mut page = page_of(&["a", "b"]);
    page.select_all();

    page.replace_items(vec![item("b", &[]), item("c", &[])]);
    assert!(page.selection().is_empty());
    assert!(!page.is_selected("b"));

    page.reset();
    assert!(page.items().is_empty());
}

#[test]
fn test_select_ranks() {
    let mut page = page_of(&["a", "b", "c"]);

    let out_of_range = page.select_ranks(&[1, 3, 7]);
    assert_eq!(out_of_range, vec![7]);
    assert!(page.is_selected("a"));
    assert!(!page.is_selected("b"));
    assert!(page.is_selected("c"));

    // selecting twice keeps the item selected
    page.select_ranks(&[1]);
    assert!(page.is_selected("a"));
}

#[test]
fn test_top_genres() {
    let artists = vec![
        item("1", &["pop", "edm"]),
        item("2", &["edm"]),
        item("3", &["default"]),
        item("4", &["rock", "edm", "pop"]),
    ];

    let genres = view::top_genres(&artists);
    let flat: Vec<(&str, usize)> = genres.iter().map(|g| (g.genre.as_str(), g.count)).collect();
    assert_eq!(flat, vec![("edm", 3), ("pop", 2), ("rock", 1)]);
}

#[test]
fn test_playlist_request_defaults() {
    let request = PlaylistRequest::default();
    assert_eq!(request.name, "My Generated Playlist");
    assert_eq!(request.description, "Playlist created with Spotistats");
    assert!(!request.public);
    assert_eq!(view::track_uri("t1"), "spotify:track:t1");
}

#[tokio::test]
async fn test_fetch_recently_played_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/player/recently-played"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "track": track_body("t1", "Clarity"), "played_at": "2024-05-01T10:00:00Z" },
                { "track": track_body("t2", "Spectrum"), "played_at": "2024-05-01T09:00:00Z" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = test_client(&server);
    seed_credential(&store, "access", Some("refresh"), 3_600_000).await;

    let items = ItemSource::RecentlyPlayed
        .fetch(&client, TimeRange::LongTerm, 2)
        .await
        .unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Clarity", "Spectrum"]);
}

#[tokio::test]
async fn test_generate_playlist_with_empty_selection_sends_nothing() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server);
    seed_credential(&store, "access", Some("refresh"), 3_600_000).await;

    let mut page = page_of(&["a", "b"]);
    let result = view::generate_playlist(&client, &mut page, &PlaylistRequest::default()).await;

    assert!(matches!(result, Err(Error::EmptySelection)));
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(page.items().len(), 2);
}

#[tokio::test]
async fn test_generate_playlist_runs_steps_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("user-1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/users/user-1/playlists"))
        .and(body_json(json!({
            "name": "Weekend",
            "description": "Picked by hand",
            "public": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pl-1",
            "name": "Weekend"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/playlists/pl-1/tracks"))
        .and(body_json(json!({ "uris": ["spotify:track:a", "spotify:track:c"] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap" })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = test_client(&server);
    seed_credential(&store, "access", Some("refresh"), 3_600_000).await;

    let mut page = page_of(&["a", "b", "c"]);
    page.select_ranks(&[3, 1]);

    let request = PlaylistRequest {
        name: "Weekend".to_string(),
        description: "Picked by hand".to_string(),
        public: false,
    };
    let playlist = view::generate_playlist(&client, &mut page, &request)
        .await
        .unwrap();
    assert_eq!(playlist.id, "pl-1");

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        paths,
        vec!["/v1/me", "/v1/users/user-1/playlists", "/v1/playlists/pl-1/tracks"]
    );

    // a successful run resets the page
    assert!(page.items().is_empty());
    assert!(page.selection().is_empty());
}

#[tokio::test]
async fn test_generate_playlist_chunks_large_selections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("user-1")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/users/user-1/playlists"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "pl-1", "name": "Big" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/playlists/pl-1/tracks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap" })))
        .expect(2)
        .mount(&server)
        .await;

    let (client, store) = test_client(&server);
    seed_credential(&store, "access", Some("refresh"), 3_600_000).await;

    let ids: Vec<String> = (0..150).map(|i| format!("t{}", i)).collect();
    let mut page = ItemPage::new(ids.iter().map(|id| item(id, &[])).collect());
    page.select_all();

    view::generate_playlist(&client, &mut page, &PlaylistRequest::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_generate_playlist_aborts_when_creation_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("user-1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/users/user-1/playlists"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/playlists/pl-1/tracks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap" })))
        .expect(0)
        .mount(&server)
        .await;

    let (client, store) = test_client(&server);
    seed_credential(&store, "access", Some("refresh"), 3_600_000).await;

    let mut page = page_of(&["a", "b"]);
    page.toggle("b");

    let result = view::generate_playlist(&client, &mut page, &PlaylistRequest::default()).await;
    assert!(matches!(result, Err(Error::ApiRequest { status_code: 403 })));
    assert_eq!(page.items().len(), 2);
    assert!(page.is_selected("b"));
}
