// file: src/pipeline/session.rs
// description: upload -> validate -> submit -> project pipeline for one view
// reference: one submission in flight at a time, results never partially replaced

use crate::api::{PredictionRequest, PredictionTransport};
use crate::config::Config;
use crate::error::{PipelineError, PredictionError, Result};
use crate::models::{PredictionResult, UploadCandidate};
use crate::pipeline::display::{DisplayMachine, DisplayState};
use crate::pipeline::projector::{ChartProjection, ResponseProjector};
use crate::utils::{AcceptedUpload, RejectReason, Validator};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// What happened to a file selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// No file was chosen; nothing changed.
    Ignored,
    /// A submission is still running; intake is disabled.
    Busy,
    Rejected(RejectReason),
    /// The file is now the active candidate and the view is processing.
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Predicted,
    Failed(PredictionError),
}

pub struct PredictionSession<T> {
    transport: T,
    validator: Validator,
    projector: ResponseProjector,
    display: DisplayMachine,
    candidate: Option<AcceptedUpload>,
    prediction: Option<PredictionResult>,
    chart: ChartProjection,
    summary: String,
}

impl<T> PredictionSession<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self::with_parts(
            transport,
            Validator::new(config.upload.clone()),
            ResponseProjector::new(config.projection.clone()),
            config.display.banner_timeout(),
        )
    }

    pub fn with_parts(
        transport: T,
        validator: Validator,
        projector: ResponseProjector,
        banner_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            validator,
            projector,
            display: DisplayMachine::new(banner_timeout),
            candidate: None,
            prediction: None,
            chart: ChartProjection::default(),
            summary: String::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn display_state(&self) -> &DisplayState {
        self.display.state()
    }

    pub fn is_processing(&self) -> bool {
        self.display.is_processing()
    }

    pub fn candidate(&self) -> Option<&UploadCandidate> {
        self.candidate.as_ref().map(AcceptedUpload::candidate)
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    pub fn chart(&self) -> &ChartProjection {
        &self.chart
    }

    /// Categories at or above the summary threshold for the current prediction.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.display.next_deadline()
    }

    /// Handle a file selection. Accepted files move the view to `Processing`
    /// immediately; the request itself is sent by [`Self::submit`] or by the
    /// caller via [`Self::prepare_request`] and [`Self::complete`].
    pub fn select(&mut self, candidate: Option<UploadCandidate>, now: Instant) -> SelectOutcome {
        let Some(candidate) = candidate else {
            return SelectOutcome::Ignored;
        };

        if self.display.is_processing() {
            warn!(
                "Ignoring {}: a prediction is already in progress",
                candidate.file_name()
            );
            return SelectOutcome::Busy;
        }

        match self.validator.accept(candidate) {
            Err(reason) => {
                info!("Rejected upload: {}", reason);
                if let Err(e) = self.display.reject(reason.to_string(), now) {
                    warn!("Could not show rejection: {}", e);
                }
                SelectOutcome::Rejected(reason)
            }
            Ok(upload) => match self.display.begin_processing() {
                Ok(()) => {
                    info!(
                        "Accepted {} ({} bytes)",
                        upload.candidate().file_name(),
                        upload.candidate().size()
                    );
                    self.candidate = Some(upload);
                    SelectOutcome::Accepted
                }
                Err(e) => {
                    warn!("Could not start processing: {}", e);
                    SelectOutcome::Busy
                }
            },
        }
    }

    /// Read the active candidate into a request. Only valid while processing.
    pub async fn prepare_request(&self) -> Result<PredictionRequest> {
        match (&self.candidate, self.display.is_processing()) {
            (Some(upload), true) => PredictionRequest::from_upload(upload).await,
            _ => Err(PipelineError::InvalidTransition {
                state: self.display.state().name(),
                event: "build a prediction request",
            }),
        }
    }

    /// Apply the transport outcome. A failure keeps the previous prediction
    /// and the active candidate; a success replaces the prediction and
    /// clears the candidate.
    pub fn complete(
        &mut self,
        outcome: std::result::Result<PredictionResult, PredictionError>,
        now: Instant,
    ) -> Result<SubmitOutcome> {
        match outcome {
            Ok(result) => {
                self.display.succeed(result.success_message(), now)?;
                self.chart = self.projector.project(result.scores());
                self.summary = self.projector.summary(result.scores());
                info!(
                    "Predicted {} - {} [{}]: {}",
                    result.beatmap().artist,
                    result.beatmap().title,
                    result.beatmap().version,
                    if self.summary.is_empty() {
                        "no dominant category"
                    } else {
                        self.summary.as_str()
                    }
                );
                self.prediction = Some(result);
                self.candidate = None;
                Ok(SubmitOutcome::Predicted)
            }
            Err(err) => {
                self.display.fail(err.to_string(), now)?;
                Ok(SubmitOutcome::Failed(err))
            }
        }
    }

    /// Dismiss an expired banner. Returns true if the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.display.tick(now)
    }
}

impl<T: PredictionTransport> PredictionSession<T> {
    /// Send the active candidate and apply the result.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let outcome = match self.prepare_request().await {
            Ok(request) => self.transport.predict(request).await,
            Err(e @ PipelineError::InvalidTransition { .. }) => return Err(e),
            Err(e) => {
                error!("Failed to read upload: {}", e);
                Err(PredictionError::Unknown)
            }
        };
        self.complete(outcome, Instant::now())
    }

    /// Selection followed by submission when the file is accepted.
    pub async fn handle_selection(
        &mut self,
        candidate: Option<UploadCandidate>,
        now: Instant,
    ) -> Result<(SelectOutcome, Option<SubmitOutcome>)> {
        let selected = self.select(candidate, now);
        if selected != SelectOutcome::Accepted {
            return Ok((selected, None));
        }
        let submitted = self.submit().await?;
        Ok((selected, Some(submitted)))
    }
}
