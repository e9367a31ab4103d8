// file: src/pipeline/progress.rs
// description: spinner shown while a prediction request is in flight
// reference: uses indicatif for the spinner and tracks request timing

use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

const TICK_INTERVAL: Duration = Duration::from_millis(120);

pub struct ProcessingIndicator {
    spinner: ProgressBar,
    started: Instant,
}

impl ProcessingIndicator {
    pub fn start(file_name: &str, colored: bool) -> Self {
        Self::with_bar(create_spinner(colored), file_name)
    }

    /// Indicator that never draws, for non-interactive output.
    pub fn hidden(file_name: &str) -> Self {
        Self::with_bar(ProgressBar::hidden(), file_name)
    }

    fn with_bar(spinner: ProgressBar, file_name: &str) -> Self {
        spinner.set_message(format!("Predicting {}...", file_name));
        spinner.enable_steady_tick(TICK_INTERVAL);
        Self {
            spinner,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn message(&self) -> String {
        self.spinner.message()
    }

    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for ProcessingIndicator {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_spinner(colored: bool) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let template = if colored {
        "{spinner:.magenta} [{elapsed_precise}] {msg}"
    } else {
        "{spinner} [{elapsed_precise}] {msg}"
    };
    match ProgressStyle::default_spinner().template(template) {
        Ok(style) => spinner.set_style(style),
        Err(e) => tracing::debug!("Falling back to default spinner style: {}", e),
    }
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_indicator_tracks_message_and_time() {
        let indicator = ProcessingIndicator::hidden("map.osu");
        assert_eq!(indicator.message(), "Predicting map.osu...");
        std::thread::sleep(Duration::from_millis(5));
        assert!(indicator.elapsed() >= Duration::from_millis(5));
        indicator.finish();
    }
}
