// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod beatmap;
pub mod category;
pub mod prediction;
pub mod response;
pub mod upload;

pub use beatmap::{Beatmap, BeatmapIdentity, BeatmapSummary};
pub use category::{Category, CategoryScores};
pub use prediction::{PredictionData, PredictionRejection, PredictionResult};
pub use response::{ApiEnvelope, BeatmapListPayload, BeatmapPayload};
pub use upload::UploadCandidate;
