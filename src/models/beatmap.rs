// file: src/models/beatmap.rs
// description: beatmap identity and stored prediction records
// reference: shapes returned by the /beatmaps endpoints

use super::category::{Category, CategoryScores};
use serde::{Deserialize, Deserializer, Serialize};

const BEATMAP_PAGE_BASE: &str = "https://osu.ppy.sh/beatmapsets";
const BEATMAP_ASSETS_BASE: &str = "https://assets.ppy.sh/beatmaps";

/// Fields that identify a beatmap and describe its song.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BeatmapIdentity {
    #[serde(deserialize_with = "lenient_id")]
    pub beatmap_id: i64,

    /// Prediction responses spell this `beatmap_set_id`. Unsubmitted maps
    /// carry `-1`.
    #[serde(alias = "beatmap_set_id", deserialize_with = "lenient_id")]
    pub beatmapset_id: i64,

    #[serde(deserialize_with = "lenient_text")]
    pub artist: String,
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub creator: String,

    /// Difficulty name
    #[serde(deserialize_with = "lenient_text")]
    pub version: String,
}

/// Listing entries carry identity fields only.
pub type BeatmapSummary = BeatmapIdentity;

impl BeatmapIdentity {
    pub fn page_url(&self) -> String {
        format!(
            "{}/{}#osu/{}",
            BEATMAP_PAGE_BASE, self.beatmapset_id, self.beatmap_id
        )
    }

    pub fn cover_url(&self) -> String {
        format!(
            "{}/{}/covers/cover.jpg",
            BEATMAP_ASSETS_BASE, self.beatmapset_id
        )
    }
}

/// A beatmap previously classified by the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Beatmap {
    #[serde(flatten)]
    pub identity: BeatmapIdentity,

    #[serde(default)]
    pub alternate_p: f64,
    #[serde(default)]
    pub fingercontrol_p: f64,
    #[serde(default)]
    pub jump_p: f64,
    #[serde(default)]
    pub speed_p: f64,
    #[serde(default)]
    pub stamina_p: f64,
    #[serde(default)]
    pub stream_p: f64,
    #[serde(default)]
    pub tech_p: f64,

    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Beatmap {
    pub fn score(&self, category: Category) -> f64 {
        match category {
            Category::Alternate => self.alternate_p,
            Category::FingerControl => self.fingercontrol_p,
            Category::Jump => self.jump_p,
            Category::Speed => self.speed_p,
            Category::Stamina => self.stamina_p,
            Category::Stream => self.stream_p,
            Category::Tech => self.tech_p,
        }
    }

    pub fn scores(&self) -> CategoryScores {
        Category::ALL
            .iter()
            .fold(CategoryScores::new(), |scores, &c| scores.with(c, self.score(c)))
    }
}

/// Accepts ids sent either as JSON numbers or as (signed) numeric strings.
fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Number(id) => Ok(id),
        Id::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Metadata made only of digits (a title like `1984`) arrives as a number.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::Text(text) => text,
        Text::Number(number) => number.to_string(),
    })
}
