use tabled::Table;

use crate::{
    cli::{fail, require_session, spinner},
    info,
    spotify::SpotifyClient,
    types::{DisplayItem, DisplayItemTableRow, GenreTableRow, TimeRange},
    utils,
    view::{self, ItemPage, ItemSource},
};

/// Lists top tracks, top artists or recently played tracks as a table.
///
/// # Arguments
///
/// * `client` - Shared Spotify client
/// * `source` - Which listing to fetch
/// * `time_range` - Window for top listings, ignored for recently played
/// * `limit` - Number of items to fetch (1-50)
///
/// Exits the process when there is no session or the fetch fails.
pub async fn list(client: &SpotifyClient, source: ItemSource, time_range: TimeRange, limit: u32) {
    require_session(client).await;

    let pb = spinner(&format!("Fetching {}...", source.label().to_lowercase()));
    let items = match source.fetch(client, time_range, limit).await {
        Ok(items) => items,
        Err(e) => {
            pb.finish_and_clear();
            fail(&format!("Failed to fetch {}", source.label().to_lowercase()), e)
        }
    };
    pb.finish_and_clear();

    if items.is_empty() {
        info!("No {} to display.", source.label().to_lowercase());
        return;
    }

    println!("{}", render_items(&ItemPage::new(items)));
}

/// Prints the genres of the user's top artists, most frequent first.
///
/// The table counts how many of the fetched artists carry each genre, so a
/// larger `limit` gives a broader picture.
pub async fn genres(client: &SpotifyClient, time_range: TimeRange, limit: u32) {
    require_session(client).await;

    let pb = spinner("Fetching top artists...");
    let artists = match ItemSource::TopArtists.fetch(client, time_range, limit).await {
        Ok(artists) => artists,
        Err(e) => {
            pb.finish_and_clear();
            fail("Failed to fetch top artists", e)
        }
    };
    pb.finish_and_clear();

    let genres = view::top_genres(&artists);
    if genres.is_empty() {
        info!("No genres found for your top artists.");
        return;
    }

    let rows: Vec<GenreTableRow> = genres
        .into_iter()
        .enumerate()
        .map(|(i, g)| GenreTableRow {
            rank: i + 1,
            genre: g.genre,
            artists: g.count,
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub(crate) fn render_items(page: &ItemPage) -> Table {
    let rows: Vec<DisplayItemTableRow> = page
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| table_row(i + 1, item, page.is_selected(&item.id)))
        .collect();

    Table::new(rows)
}

fn table_row(rank: usize, item: &DisplayItem, selected: bool) -> DisplayItemTableRow {
    DisplayItemTableRow {
        rank,
        selected: if selected { "✓" } else { "" }.to_string(),
        name: item.name.clone(),
        artists: utils::join_or_dash(&item.artists),
        album: if item.album_name.is_empty() {
            "-".to_string()
        } else {
            item.album_name.clone()
        },
        released: if item.release_date.is_empty() {
            "-".to_string()
        } else {
            item.release_date.clone()
        },
        genres: item
            .genres
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(","),
    }
}
