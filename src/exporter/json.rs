// file: src/exporter/json.rs
// description: json export of prediction results

use crate::error::Result;
use crate::models::PredictionResult;
use crate::pipeline::ChartProjection;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedPrediction<'a> {
    pub exported_at: String,
    pub source_file: &'a str,
    pub summary: &'a str,
    pub chart: &'a ChartProjection,
    pub prediction: &'a PredictionResult,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn export_prediction(
        &self,
        source_file: &str,
        prediction: &PredictionResult,
        chart: &ChartProjection,
        summary: &str,
        pretty: bool,
    ) -> Result<PathBuf> {
        let now = Utc::now();
        let exported = ExportedPrediction {
            exported_at: now.to_rfc3339(),
            source_file,
            summary,
            chart,
            prediction,
        };

        let beatmap = prediction.beatmap();
        let path = self.output_dir.join(format!(
            "prediction-{}-{}-{}.json",
            beatmap.beatmapset_id,
            beatmap.beatmap_id,
            now.format("%Y%m%dT%H%M%S")
        ));

        let json = if pretty {
            serde_json::to_string_pretty(&exported)?
        } else {
            serde_json::to_string(&exported)?
        };
        fs::write(&path, json)?;

        info!("Exported prediction to {}", path.display());
        Ok(path)
    }
}
