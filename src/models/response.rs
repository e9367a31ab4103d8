// file: src/models/response.rs
// description: envelopes wrapping the /beatmaps endpoint payloads

use super::beatmap::{Beatmap, BeatmapSummary};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// `data` of a single beatmap lookup; `null` when the beatmap is unknown.
#[derive(Debug, Clone, Deserialize)]
pub struct BeatmapPayload {
    #[serde(default)]
    pub beatmap: Option<Beatmap>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BeatmapListPayload {
    #[serde(default)]
    pub beatmaps: Vec<BeatmapSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lookup_decodes_to_none() {
        let body = r#"{"code": 0, "message": "Beatmap not found!", "data": {"beatmap": null}}"#;
        let envelope: ApiEnvelope<BeatmapPayload> = serde_json::from_str(body).unwrap();
        assert!(envelope.data.beatmap.is_none());
        assert_eq!(envelope.message, "Beatmap not found!");
    }

    #[test]
    fn test_listing_ignores_extra_fields() {
        let body = r#"{"data": {"beatmaps": [{
            "beatmap_id": 1, "beatmapset_id": 2, "artist": "a", "title": "t",
            "creator": "c", "version": "v", "stream_p": 0.5
        }]}}"#;
        let envelope: ApiEnvelope<BeatmapListPayload> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.beatmaps.len(), 1);
        assert_eq!(envelope.data.beatmaps[0].beatmapset_id, 2);
    }
}
