use std::collections::HashMap;

use crate::{
    types::{DisplayItem, GenreCount},
    view::items::DEFAULT_GENRE,
};

/// Counts how many of the given artists are tagged with each genre.
///
/// The placeholder genre is skipped. Sorted by count descending, then name.
pub fn top_genres(artists: &[DisplayItem]) -> Vec<GenreCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for artist in artists {
        for genre in artist.genres.iter().filter(|g| *g != DEFAULT_GENRE) {
            *counts.entry(genre.as_str()).or_default() += 1;
        }
    }

    let mut genres: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_string(),
            count,
        })
        .collect();

    genres.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
    genres
}
