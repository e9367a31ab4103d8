// file: src/pipeline/projector.rs
// description: projection of category scores into chart rows and a summary line

use crate::config::ProjectionConfig;
use crate::models::{Category, CategoryScores};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartEntry {
    #[serde(skip)]
    pub category: Category,
    #[serde(rename = "name")]
    pub label: &'static str,
    pub value: f64,
}

/// Bar chart rows: always one per category, in [`Category::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChartProjection {
    entries: [ChartEntry; Category::COUNT],
}

impl ChartProjection {
    fn from_scores(scores: &CategoryScores) -> Self {
        Self {
            entries: Category::ALL.map(|category| ChartEntry {
                category,
                label: category.label(),
                value: scores.get(category),
            }),
        }
    }

    pub fn entries(&self) -> &[ChartEntry; Category::COUNT] {
        &self.entries
    }

    pub fn pairs(&self) -> Vec<(&'static str, f64)> {
        self.entries.iter().map(|e| (e.label, e.value)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartEntry> {
        self.entries.iter()
    }
}

impl Default for ChartProjection {
    fn default() -> Self {
        Self::from_scores(&CategoryScores::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseProjector {
    config: ProjectionConfig,
}

impl ResponseProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn project(&self, scores: &CategoryScores) -> ChartProjection {
        ChartProjection::from_scores(scores)
    }

    /// Labels scoring at or above the threshold, comma separated.
    pub fn summary(&self, scores: &CategoryScores) -> String {
        scores
            .iter()
            .filter(|(_, value)| *value >= self.config.summary_threshold)
            .map(|(category, _)| category.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
