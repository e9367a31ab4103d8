// file: src/pipeline/display.rs
// description: banner state machine with auto-dismissing, cancellable timers
// reference: Idle -> Processing -> SuccessVisible | ErrorVisible -> Idle

use crate::error::{PipelineError, Result};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Processing,
    SuccessVisible { message: String },
    ErrorVisible { message: String },
}

impl DisplayState {
    pub fn name(&self) -> &'static str {
        match self {
            DisplayState::Idle => "idle",
            DisplayState::Processing => "processing",
            DisplayState::SuccessVisible { .. } => "showing a success banner",
            DisplayState::ErrorVisible { .. } => "showing an error banner",
        }
    }
}

/// Pending auto-hide for the banner currently on screen.
///
/// The generation ties the timer to the banner that armed it, so a timer
/// from a replaced banner can never dismiss its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTimer {
    generation: u64,
    deadline: Instant,
}

impl BannerTimer {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

#[derive(Debug, Clone)]
pub struct DisplayMachine {
    state: DisplayState,
    timer: Option<BannerTimer>,
    banner_timeout: Duration,
    generation: u64,
}

impl DisplayMachine {
    pub fn new(banner_timeout: Duration) -> Self {
        Self {
            state: DisplayState::Idle,
            timer: None,
            banner_timeout,
            generation: 0,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn timer(&self) -> Option<&BannerTimer> {
        self.timer.as_ref()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.map(|t| t.deadline)
    }

    pub fn is_processing(&self) -> bool {
        self.state == DisplayState::Processing
    }

    /// Enter `Processing`, dropping any visible banner and its timer.
    pub fn begin_processing(&mut self) -> Result<()> {
        if self.is_processing() {
            return Err(self.invalid("start a submission"));
        }
        self.cancel_timer();
        self.state = DisplayState::Processing;
        Ok(())
    }

    pub fn succeed(&mut self, message: impl Into<String>, now: Instant) -> Result<()> {
        if !self.is_processing() {
            return Err(self.invalid("show a prediction"));
        }
        self.show(
            DisplayState::SuccessVisible {
                message: message.into(),
            },
            now,
        );
        Ok(())
    }

    pub fn fail(&mut self, message: impl Into<String>, now: Instant) -> Result<()> {
        if !self.is_processing() {
            return Err(self.invalid("show a submission failure"));
        }
        self.show(
            DisplayState::ErrorVisible {
                message: message.into(),
            },
            now,
        );
        Ok(())
    }

    /// A validation rejection, shown without ever entering `Processing`.
    pub fn reject(&mut self, message: impl Into<String>, now: Instant) -> Result<()> {
        if self.is_processing() {
            return Err(self.invalid("show a rejection"));
        }
        self.show(
            DisplayState::ErrorVisible {
                message: message.into(),
            },
            now,
        );
        Ok(())
    }

    /// Hide the banner if its timer has elapsed. Returns true on a transition.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.timer {
            Some(timer) if timer.is_due(now) => {}
            _ => return false,
        }
        let generation = self.generation;
        self.expire(generation)
    }

    /// Dismiss the banner armed under `generation`; stale generations are ignored.
    pub fn expire(&mut self, generation: u64) -> bool {
        let armed = self.timer.map(|t| t.generation);
        if armed != Some(generation) {
            return false;
        }
        debug!("Banner {} dismissed ({})", generation, self.state.name());
        self.timer = None;
        self.state = DisplayState::Idle;
        true
    }

    fn show(&mut self, state: DisplayState, now: Instant) {
        self.cancel_timer();
        self.generation += 1;
        self.timer = Some(BannerTimer {
            generation: self.generation,
            deadline: now + self.banner_timeout,
        });
        self.state = state;
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!("Cancelled banner timer {}", timer.generation);
        }
    }

    fn invalid(&self, event: &'static str) -> PipelineError {
        PipelineError::InvalidTransition {
            state: self.state.name(),
            event,
        }
    }
}
