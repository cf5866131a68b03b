use clap::ValueEnum;

use crate::{
    cli::{fail, require_session, spinner, top::render_items},
    error, info,
    spotify::SpotifyClient,
    success,
    types::TimeRange,
    view::{self, ItemPage, ItemSource, PlaylistRequest},
    warning,
};

/// Listings whose items are tracks and can therefore be added to a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlaylistSource {
    TopTracks,
    RecentlyPlayed,
}

impl From<PlaylistSource> for ItemSource {
    fn from(source: PlaylistSource) -> Self {
        match source {
            PlaylistSource::TopTracks => ItemSource::TopTracks,
            PlaylistSource::RecentlyPlayed => ItemSource::RecentlyPlayed,
        }
    }
}

/// Which listed items go into the playlist.
#[derive(Debug, Clone)]
pub enum Selection {
    All,
    Ranks(Vec<usize>),
}

/// Fetches a track listing, selects items from it and turns them into a playlist.
///
/// # Arguments
///
/// * `source` - Track listing to pick from
/// * `time_range` - Window for top tracks
/// * `limit` - Number of tracks to list
/// * `selection` - All listed tracks, or the given 1-based ranks
/// * `request` - Name, description and visibility of the new playlist
///
/// Ranks past the end of the listing are reported and skipped. Exits the
/// process if nothing ends up selected or any step fails.
pub async fn playlist(
    client: &SpotifyClient,
    source: PlaylistSource,
    time_range: TimeRange,
    limit: u32,
    selection: Selection,
    request: PlaylistRequest,
) {
    require_session(client).await;
    let source = ItemSource::from(source);

    let pb = spinner(&format!("Fetching {}...", source.label().to_lowercase()));
    let items = match source.fetch(client, time_range, limit).await {
        Ok(items) => items,
        Err(e) => {
            pb.finish_and_clear();
            fail(&format!("Failed to fetch {}", source.label().to_lowercase()), e)
        }
    };
    pb.finish_and_clear();

    let mut page = ItemPage::new(items);
    match selection {
        Selection::All => page.select_all(),
        Selection::Ranks(ranks) => {
            let out_of_range = page.select_ranks(&ranks);
            if !out_of_range.is_empty() {
                warning!(
                    "Ignoring ranks outside the listing of {} items: {:?}",
                    page.items().len(),
                    out_of_range
                );
            }
        }
    }

    if page.selection().is_empty() {
        error!("Nothing selected. Use --select or --all.");
    }

    println!("{}", render_items(&page));
    info!(
        "Creating playlist \"{}\" with {} selected items",
        request.name,
        page.selection().len()
    );

    let pb = spinner("Creating playlist...");
    match view::generate_playlist(client, &mut page, &request).await {
        Ok(created) => {
            pb.finish_and_clear();
            success!("Playlist \"{}\" created successfully!", created.name);
            if let Some(uri) = created.uri {
                info!("{}", uri);
            }
        }
        Err(e) => {
            pb.finish_and_clear();
            fail("Failed to create playlist", e)
        }
    }
}
