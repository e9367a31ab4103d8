// file: src/api/transport.rs
// description: prediction transport seam and response classification
// reference: a single multipart POST per accepted upload

use crate::error::{PredictionError, Result};
use crate::models::{PredictionRejection, PredictionResult};
use crate::utils::AcceptedUpload;
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error};

/// Multipart payload for one prediction: a single `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    file_name: String,
    content: Vec<u8>,
}

impl PredictionRequest {
    pub const FIELD: &'static str = "file";

    pub async fn from_upload(upload: &AcceptedUpload) -> Result<Self> {
        let candidate = upload.candidate();
        let content = candidate.read_content().await?;
        Ok(Self {
            file_name: candidate.file_name().to_string(),
            content,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.file_name, self.content)
    }
}

#[async_trait]
pub trait PredictionTransport: Send + Sync {
    /// Issue exactly one prediction request. No retries.
    async fn predict(
        &self,
        request: PredictionRequest,
    ) -> std::result::Result<PredictionResult, PredictionError>;
}

/// Map an HTTP status and raw body to the prediction outcome.
///
/// 2xx must decode as a [`PredictionResult`]; 400 must carry a `reason`.
/// Everything else is [`PredictionError::Unknown`] and the cause is logged.
pub fn classify_response(
    status: StatusCode,
    body: &[u8],
) -> std::result::Result<PredictionResult, PredictionError> {
    if status.is_success() {
        return serde_json::from_slice::<PredictionResult>(body).map_err(|e| {
            error!("Malformed prediction response ({}): {}", status, e);
            PredictionError::Unknown
        });
    }

    if status == StatusCode::BAD_REQUEST {
        return match serde_json::from_slice::<PredictionRejection>(body) {
            Ok(rejection) => {
                debug!(
                    "Prediction rejected by server (code {:?}): {}",
                    rejection.code, rejection.reason
                );
                Err(PredictionError::UserFacing(rejection.reason))
            }
            Err(e) => {
                error!("400 response without a usable reason: {}", e);
                Err(PredictionError::Unknown)
            }
        };
    }

    error!(
        "Prediction request failed with status {}: {}",
        status,
        String::from_utf8_lossy(body)
    );
    Err(PredictionError::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, UploadCandidate};
    use crate::utils::Validator;

    const SUCCESS: &str = r#"{
        "code": 0,
        "message": "Successfully predicted beatmap type!",
        "data": {
            "processing_time": "3 seconds",
            "beatmap_id": 1, "beatmapset_id": 2,
            "artist": "a", "title": "t", "creator": "c", "version": "v",
            "predicted_type": {"stream": 0.8}
        }
    }"#;

    #[test]
    fn test_success_body_decodes() {
        let result = classify_response(StatusCode::OK, SUCCESS.as_bytes()).unwrap();
        assert_eq!(result.scores().get(Category::Stream), 0.8);
    }

    #[test]
    fn test_unsubmitted_map_with_numeric_title_decodes() {
        let body = br#"{
            "code": 0,
            "message": "Successfully predicted beatmap type!",
            "data": {
                "processing_time": "2 seconds",
                "beatmap_id": 0, "beatmap_set_id": "-1",
                "artist": "a", "title": 1984, "creator": "c", "version": "v",
                "predicted_type": {"tech": 0.6}
            }
        }"#;
        let result = classify_response(StatusCode::OK, body).unwrap();
        assert_eq!(result.beatmap().beatmapset_id, -1);
        assert_eq!(result.beatmap().title, "1984");
        assert_eq!(result.scores().get(Category::Tech), 0.6);
    }

    #[test]
    fn test_malformed_success_body_is_unknown() {
        assert_eq!(
            classify_response(StatusCode::OK, b"<html>").unwrap_err(),
            PredictionError::Unknown
        );
    }

    #[test]
    fn test_bad_request_reason_is_verbatim() {
        let err = classify_response(
            StatusCode::BAD_REQUEST,
            br#"{"code": 1, "reason": "Corrupted file"}"#,
        )
        .unwrap_err();
        assert_eq!(err, PredictionError::UserFacing("Corrupted file".to_string()));
        assert_eq!(err.to_string(), "Corrupted file");
    }

    #[test]
    fn test_bad_request_without_reason_is_unknown() {
        assert_eq!(
            classify_response(StatusCode::BAD_REQUEST, br#"{"detail": "x"}"#).unwrap_err(),
            PredictionError::Unknown
        );
    }

    #[test]
    fn test_other_statuses_are_unknown() {
        for status in [
            StatusCode::UNPROCESSABLE_ENTITY,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::NOT_FOUND,
        ] {
            let err = classify_response(status, br#"{"reason": "hidden"}"#).unwrap_err();
            assert_eq!(err, PredictionError::Unknown);
        }
    }

    #[tokio::test]
    async fn test_request_built_from_accepted_upload() {
        let upload = Validator::default()
            .accept(UploadCandidate::from_bytes("map.osu", b"osu file format v14".to_vec()))
            .unwrap();
        let request = PredictionRequest::from_upload(&upload).await.unwrap();
        assert_eq!(request.file_name(), "map.osu");
        assert_eq!(request.content(), b"osu file format v14");
    }
}
