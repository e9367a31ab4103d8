// file: src/models/category.rs
// description: the seven beatmap categories and their per-category scores
// reference: identifiers match the classifier's label table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Gameplay style a beatmap is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Alternate,
    FingerControl,
    Jump,
    Speed,
    Stamina,
    Stream,
    Tech,
}

impl Category {
    pub const COUNT: usize = 7;

    /// Display order used by every chart and summary.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Alternate,
        Category::FingerControl,
        Category::Jump,
        Category::Speed,
        Category::Stamina,
        Category::Stream,
        Category::Tech,
    ];

    /// Identifier used by the prediction API (`predicted_type` keys).
    pub fn key(self) -> &'static str {
        match self {
            Category::Alternate => "alternate",
            Category::FingerControl => "fingercontrol",
            Category::Jump => "jump",
            Category::Speed => "speed",
            Category::Stamina => "stamina",
            Category::Stream => "stream",
            Category::Tech => "tech",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Alternate => "Alternate",
            Category::FingerControl => "Finger Control",
            Category::Jump => "Jump",
            Category::Speed => "Speed",
            Category::Stamina => "Stamina",
            Category::Stream => "Stream",
            Category::Tech => "Tech",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "alternate" => Some(Category::Alternate),
            "fingercontrol" => Some(Category::FingerControl),
            "jump" => Some(Category::Jump),
            "speed" => Some(Category::Speed),
            "stamina" => Some(Category::Stamina),
            "stream" => Some(Category::Stream),
            "tech" => Some(Category::Tech),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One probability per [`Category`].
///
/// Decodes from the API's `{ "alternate": 0.9, ... }` mapping. Keys that are
/// absent score 0.0; keys that name no known category are logged and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct CategoryScores {
    values: [f64; Category::COUNT],
}

impl CategoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> f64 {
        self.values[category.index()]
    }

    pub fn set(&mut self, category: Category, value: f64) {
        self.values[category.index()] = value;
    }

    pub fn with(mut self, category: Category, value: f64) -> Self {
        self.set(category, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(|&c| (c, self.get(c)))
    }
}

impl From<BTreeMap<String, f64>> for CategoryScores {
    fn from(map: BTreeMap<String, f64>) -> Self {
        let mut scores = CategoryScores::default();
        for (key, value) in map {
            match Category::from_key(&key) {
                Some(category) => scores.set(category, value),
                None => warn!("Ignoring unknown category '{}' ({})", key, value),
            }
        }
        scores
    }
}

impl From<CategoryScores> for BTreeMap<String, f64> {
    fn from(scores: CategoryScores) -> Self {
        scores
            .iter()
            .map(|(category, value)| (category.key().to_string(), value))
            .collect()
    }
}
