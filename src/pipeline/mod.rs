// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod display;
mod progress;
pub mod projector;
pub mod session;

pub use display::{BannerTimer, DisplayMachine, DisplayState};
pub use progress::ProcessingIndicator;
pub use projector::{ChartEntry, ChartProjection, ResponseProjector};
pub use session::{PredictionSession, SelectOutcome, SubmitOutcome};
