//! Placeholder catalog shown on the home screen.
//!
//! These entries have no content locator; playing one fails with an
//! unavailable-source error.

use super::model::Track;

const CATALOG_SIZE: usize = 10;

fn picsum(seed: usize) -> String {
    format!("https://picsum.photos/200/300?random={seed}")
}

pub fn recommendations() -> Vec<Track> {
    (0..CATALOG_SIZE)
        .map(|i| {
            Track::new(format!("rec{i}"), format!("Recommendation {i}"), format!("Artist {i}"))
                .with_album_art(picsum(i))
        })
        .collect()
}

pub fn trending() -> Vec<Track> {
    (0..CATALOG_SIZE)
        .map(|i| {
            Track::new(
                format!("trend{i}"),
                format!("Trending {i}"),
                format!("Trending Artist {i}"),
            )
            .with_album_art(picsum(i + 100))
        })
        .collect()
}
