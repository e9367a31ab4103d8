// file: src/models/prediction.rs
// description: prediction API payloads
// reference: POST /predict success and 400 bodies

use super::beatmap::BeatmapIdentity;
use super::category::CategoryScores;
use serde::{Deserialize, Deserializer, Serialize};

/// Decoded body of a successful `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub code: i64,
    pub message: String,
    pub data: PredictionData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionData {
    /// Human readable duration, e.g. "2.31 seconds"
    #[serde(deserialize_with = "duration_text")]
    pub processing_time: String,

    #[serde(flatten)]
    pub beatmap: BeatmapIdentity,

    pub predicted_type: CategoryScores,
}

impl PredictionResult {
    pub fn beatmap(&self) -> &BeatmapIdentity {
        &self.data.beatmap
    }

    pub fn scores(&self) -> &CategoryScores {
        &self.data.predicted_type
    }

    /// Text of the banner shown once the prediction arrives.
    pub fn success_message(&self) -> String {
        format!(
            "{} Processing time: {}",
            self.message, self.data.processing_time
        )
    }
}

/// Body of a 400 response.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRejection {
    #[serde(default)]
    pub code: Option<i64>,
    pub reason: String,
}

/// Processing time is normally a string, but a bare number of seconds is kept too.
fn duration_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Duration {
        Text(String),
        Seconds(f64),
    }

    Ok(match Duration::deserialize(deserializer)? {
        Duration::Text(text) => text,
        Duration::Seconds(secs) => format!("{} seconds", secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    const BODY: &str = r#"{
        "code": 0,
        "message": "Successfully predicted beatmap type!",
        "data": {
            "processing_time": "1.52 seconds",
            "beatmap_id": 129891,
            "beatmap_set_id": 39804,
            "artist": "xi",
            "title": "FREEDOM DiVE",
            "creator": "Nakagawa-Kanon",
            "version": "FOUR DIMENSIONS",
            "predicted_type": {
                "alternate": 0.12, "fingercontrol": 0.05, "jump": 0.2,
                "speed": 0.7, "stamina": 0.4, "stream": 0.91, "tech": 0.33
            }
        }
    }"#;

    #[test]
    fn test_decode_success_body() {
        let result: PredictionResult = serde_json::from_str(BODY).unwrap();
        assert_eq!(result.code, 0);
        assert_eq!(result.beatmap().beatmapset_id, 39804);
        assert_eq!(result.beatmap().title, "FREEDOM DiVE");
        assert_eq!(result.scores().get(Category::Stream), 0.91);
        assert_eq!(
            result.success_message(),
            "Successfully predicted beatmap type! Processing time: 1.52 seconds"
        );
    }

    #[test]
    fn test_numeric_processing_time() {
        let body = BODY.replace("\"1.52 seconds\"", "1.5");
        let result: PredictionResult = serde_json::from_str(&body).unwrap();
        assert_eq!(result.data.processing_time, "1.5 seconds");
    }

    #[test]
    fn test_decode_rejection() {
        let rejection: PredictionRejection =
            serde_json::from_str(r#"{"code": 1, "reason": "Corrupted file"}"#).unwrap();
        assert_eq!(rejection.code, Some(1));
        assert_eq!(rejection.reason, "Corrupted file");

        let rejection: PredictionRejection =
            serde_json::from_str(r#"{"reason": "Beatmap is too long."}"#).unwrap();
        assert_eq!(rejection.code, None);
    }
}
