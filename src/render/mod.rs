// file: src/render/mod.rs
// description: terminal rendering of charts, beatmap cards and banners
// reference: internal module structure

pub mod card;
pub mod chart;

pub use card::{render_card, render_card_line};
pub use chart::render_chart;

use crate::pipeline::{DisplayState, PredictionSession};
use crate::utils::logging::{format_error, format_info, format_success};

pub const CPU_INFERENCE_NOTICE: &str = "Backend server for predicting the beatmap type is currently using cpu inference, so performance might be slow.";

/// Banner line for the current state, if one is visible.
pub fn render_banner(state: &DisplayState) -> Option<String> {
    match state {
        DisplayState::Idle => None,
        DisplayState::Processing => Some(format_info("Processing...")),
        DisplayState::SuccessVisible { message } => Some(format_success(message)),
        DisplayState::ErrorVisible { message } => Some(format_error(message)),
    }
}

/// Chart, beatmap card (once a prediction exists) and the visible banner.
pub fn render_view<T>(session: &PredictionSession<T>, chart_width: usize) -> String {
    let mut sections = vec![render_chart(session.chart(), chart_width)];

    if let Some(prediction) = session.prediction() {
        sections.push(render_card(prediction.beatmap()));
        if !session.summary().is_empty() {
            sections.push(format!("Predicted type: {}", session.summary()));
        }
    }

    if let Some(banner) = render_banner(session.display_state()) {
        sections.push(banner);
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_idle_has_no_banner() {
        assert!(render_banner(&DisplayState::Idle).is_none());
    }

    #[test]
    fn test_error_banner_carries_message() {
        colored::control::set_override(false);
        let banner = render_banner(&DisplayState::ErrorVisible {
            message: "Only .osu file is supported.".to_string(),
        })
        .unwrap();
        assert_eq!(banner, "✗ Only .osu file is supported.");
    }

    #[test]
    fn test_initial_view_is_zero_chart_only() {
        colored::control::set_override(false);
        let session = PredictionSession::new((), &Config::default_config());
        let view = render_view(&session, 4);
        assert_eq!(view.lines().count(), 7);
        assert!(view.lines().all(|l| l.ends_with("░░░░ 0.00")));
    }
}
