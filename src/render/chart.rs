// file: src/render/chart.rs
// description: horizontal text bar chart over the [0, 1] probability domain

use crate::pipeline::ChartProjection;
use colored::Colorize;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Render one row per chart entry, labels right-aligned, bars `width` cells wide.
pub fn render_chart(chart: &ChartProjection, width: usize) -> String {
    let label_width = chart.iter().map(|e| e.label.len()).max().unwrap_or(0);

    chart
        .iter()
        .map(|entry| {
            let filled = filled_cells(entry.value, width);
            let bar: String = std::iter::repeat_n(FILLED, filled).collect();
            let rest: String = std::iter::repeat_n(EMPTY, width - filled).collect();
            format!(
                "{:>label_width$} {}{} {:.2}",
                entry.label,
                bar.magenta(),
                rest.dimmed(),
                entry.value,
                label_width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn filled_cells(value: f64, width: usize) -> usize {
    if !value.is_finite() {
        return 0;
    }
    let clamped = value.clamp(0.0, 1.0);
    ((clamped * width as f64).round() as usize).min(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryScores};
    use crate::pipeline::ResponseProjector;

    #[test]
    fn test_filled_cells_clamps_to_domain() {
        assert_eq!(filled_cells(0.0, 10), 0);
        assert_eq!(filled_cells(0.5, 10), 5);
        assert_eq!(filled_cells(1.0, 10), 10);
        assert_eq!(filled_cells(1.7, 10), 10);
        assert_eq!(filled_cells(-0.2, 10), 0);
        assert_eq!(filled_cells(f64::NAN, 10), 0);
    }

    #[test]
    fn test_chart_has_row_per_category() {
        colored::control::set_override(false);
        let chart = ResponseProjector::default()
            .project(&CategoryScores::new().with(Category::Stream, 0.8));
        let rendered = render_chart(&chart, 10);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "     Alternate ░░░░░░░░░░ 0.00");
        assert_eq!(lines[1], "Finger Control ░░░░░░░░░░ 0.00");
        assert_eq!(lines[5], "        Stream ████████░░ 0.80");
    }
}
