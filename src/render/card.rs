// file: src/render/card.rs
// description: text card describing a beatmap

use crate::models::BeatmapIdentity;
use colored::Colorize;

/// Full card: title, difficulty, artist, mapper and link.
pub fn render_card(beatmap: &BeatmapIdentity) -> String {
    [
        beatmap.title.bold().to_string(),
        format!("[{}]", beatmap.version).dimmed().to_string(),
        format!("by {}", beatmap.artist),
        format!("Mapped by {}", beatmap.creator.bold()),
        format!("Visit Beatmap: {}", beatmap.page_url().cyan()),
        format!("Cover: {}", beatmap.cover_url()),
    ]
    .join("\n")
}

/// One-line entry for listings.
pub fn render_card_line(beatmap: &BeatmapIdentity) -> String {
    format!(
        "{} [{}] by {} (mapped by {}) {}/{}",
        beatmap.title.bold(),
        beatmap.version,
        beatmap.artist,
        beatmap.creator,
        beatmap.beatmapset_id,
        beatmap.beatmap_id
    )
}
