// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use crate::utils::validation::RejectReason;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Rejected(#[from] RejectReason),

    #[error("{0}")]
    Prediction(#[from] PredictionError),

    #[error("Beatmap lookup failed: {0}")]
    Lookup(String),

    #[error("Cannot {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Outcome of a failed prediction request, as shown to the user.
///
/// Only a 400 response carrying a `reason` is surfaced verbatim. Every other
/// failure collapses into [`PredictionError::Unknown`]; its cause is logged
/// where it happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictionError {
    #[error("{0}")]
    UserFacing(String),

    #[error("Unknown error")]
    Unknown,
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_error_messages() {
        assert_eq!(
            PredictionError::UserFacing("Corrupted file".to_string()).to_string(),
            "Corrupted file"
        );
        assert_eq!(PredictionError::Unknown.to_string(), "Unknown error");
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = PipelineError::InvalidTransition {
            state: "idle",
            event: "complete a submission",
        };
        assert_eq!(err.to_string(), "Cannot complete a submission while idle");
    }
}
