// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod api;
pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod utils;

pub use api::{
    BeatmapCatalog, BeatmapPager, ListingKind, OsuClassyClient, PredictionRequest,
    PredictionTransport,
};
pub use config::{ApiConfig, Config, DisplayConfig, ListingConfig, ProjectionConfig, UploadConfig};
pub use error::{PipelineError, PredictionError, Result};
pub use exporter::{ExportedPrediction, JsonExporter};
pub use models::{
    Beatmap, BeatmapIdentity, BeatmapSummary, Category, CategoryScores, PredictionResult,
    UploadCandidate,
};
pub use pipeline::{
    ChartProjection, DisplayState, PredictionSession, ProcessingIndicator, ResponseProjector,
    SelectOutcome, SubmitOutcome,
};
pub use utils::{AcceptedUpload, RejectReason, ValidationVerdict, Validator};
