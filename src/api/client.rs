// file: src/api/client.rs
// description: HTTP client for the OsuClassy prediction and beatmap endpoints
// reference: https://docs.rs/reqwest

use crate::api::pager::{BeatmapCatalog, ListingKind};
use crate::api::transport::{PredictionRequest, PredictionTransport, classify_response};
use crate::config::ApiConfig;
use crate::error::{PipelineError, PredictionError, Result};
use crate::models::{
    ApiEnvelope, Beatmap, BeatmapListPayload, BeatmapPayload, BeatmapSummary, PredictionResult,
};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

const USER_AGENT: &str = concat!("osuclassy/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OsuClassyClient {
    client: Client,
    predict_url: String,
    beatmaps_url: String,
}

impl OsuClassyClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            predict_url: config.predict_url(),
            beatmaps_url: config.beatmaps_url(),
        })
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| PipelineError::Lookup(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Lookup(format!(
                "Request failed with status {}: {}",
                status, error_text
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PipelineError::Lookup(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl PredictionTransport for OsuClassyClient {
    async fn predict(
        &self,
        request: PredictionRequest,
    ) -> std::result::Result<PredictionResult, PredictionError> {
        let (file_name, content) = request.into_parts();
        info!("Uploading {} ({} bytes)", file_name, content.len());

        let part = Part::bytes(content).file_name(file_name);
        let form = Form::new().part(PredictionRequest::FIELD, part);

        let response = self
            .client
            .post(&self.predict_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send prediction request: {}", e);
                PredictionError::Unknown
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read prediction response body: {}", e);
            PredictionError::Unknown
        })?;

        classify_response(status, &body)
    }
}

#[async_trait]
impl BeatmapCatalog for OsuClassyClient {
    async fn beatmap(&self, beatmapset_id: u64, beatmap_id: u64) -> Result<Option<Beatmap>> {
        let url = format!("{}/{}/{}", self.beatmaps_url, beatmapset_id, beatmap_id);
        let envelope: ApiEnvelope<BeatmapPayload> = self.get_json(&url, &[]).await?;
        Ok(envelope.data.beatmap)
    }

    async fn beatmapset(&self, beatmapset_id: u64) -> Result<Vec<BeatmapSummary>> {
        let url = format!("{}/{}", self.beatmaps_url, beatmapset_id);
        let envelope: ApiEnvelope<BeatmapListPayload> = self.get_json(&url, &[]).await?;
        Ok(envelope.data.beatmaps)
    }

    async fn list(
        &self,
        kind: ListingKind,
        page: u32,
        limit: u32,
    ) -> Result<Vec<BeatmapSummary>> {
        let url = match kind.path_segment() {
            "" => self.beatmaps_url.clone(),
            segment => format!("{}/{}", self.beatmaps_url, segment),
        };
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        let envelope: ApiEnvelope<BeatmapListPayload> = self.get_json(&url, &query).await?;
        Ok(envelope.data.beatmaps)
    }
}
