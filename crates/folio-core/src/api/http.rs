//! HTTP implementation of the content API contract.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use super::{ApiError, ContentApi, DEFAULT_TIMEOUT_SECS};
use crate::auth::TokenProvider;
use crate::model::{AudioArtifact, SiblingScope, SiblingUnit};
use crate::staging::StagedSegment;

/// Shared client for connection pooling across API handles
static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

fn shared_client() -> Result<reqwest::Client, ApiError> {
    let client = HTTP_CLIENT.get_or_try_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
    })?;
    Ok(client.clone())
}

/// Content API client over authenticated HTTP.
///
/// The bearer credential comes from an injected [`TokenProvider`] rather
/// than a module-global read, so the orchestration layers stay testable.
pub struct HttpContentApi {
    client: reqwest::Client,
    base_url: String,
    token: Arc<dyn TokenProvider>,
}

impl HttpContentApi {
    /// Create a client against `base_url` (e.g. `https://api.example.com/v1`).
    pub fn new(base_url: &str, token: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let base_url = validate_base_url(base_url)?;
        Ok(Self {
            client: shared_client()?,
            base_url,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<String, ApiError> {
        let token = self
            .token
            .bearer_token()
            .map_err(|e| ApiError::Credential(e.to_string()))?;
        Ok(format!("Bearer {token}"))
    }
}

/// Normalize and validate the configured base URL
fn validate_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidBaseUrl(
            "no API base URL configured".to_string(),
        ));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ApiError::InvalidBaseUrl(format!(
            "must start with http:// or https://, got: {trimmed}"
        )));
    }
    let after_scheme = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .unwrap_or("");
    if after_scheme.is_empty() || after_scheme.starts_with('/') {
        return Err(ApiError::InvalidBaseUrl(format!(
            "missing host, got: {trimmed}"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Check the response status and decode the returned body.
///
/// Mutating endpoints answer with the whole updated parent object; the
/// decoded value is adopted by the caller as the new ground truth.
async fn adopt<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn fetch_artifact(&self, artifact_id: &str) -> Result<AudioArtifact, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("audio-artifacts/{artifact_id}")))
            .header("Authorization", self.bearer()?)
            .send()
            .await?;
        adopt(response).await
    }

    async fn append_segments(
        &self,
        artifact_id: &str,
        segments: &[StagedSegment],
    ) -> Result<AudioArtifact, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for segment in segments {
            form = form.part(
                "segments",
                reqwest::multipart::Part::bytes(segment.data.clone())
                    .file_name(segment.filename.clone())
                    .mime_str(&segment.mime_type)?,
            );
        }

        let response = self
            .client
            .post(self.endpoint(&format!("audio-artifacts/{artifact_id}/segments")))
            .header("Authorization", self.bearer()?)
            .multipart(form)
            .send()
            .await?;
        adopt(response).await
    }

    async fn reorder_segments(
        &self,
        artifact_id: &str,
        ordered_ids: &[String],
    ) -> Result<AudioArtifact, ApiError> {
        let response = self
            .client
            .patch(self.endpoint(&format!("audio-artifacts/{artifact_id}/segments/order")))
            .header("Authorization", self.bearer()?)
            .json(&json!({ "segment_public_ids": ordered_ids }))
            .send()
            .await?;
        adopt(response).await
    }

    async fn remove_segment(
        &self,
        artifact_id: &str,
        public_id: &str,
    ) -> Result<AudioArtifact, ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("audio-artifacts/{artifact_id}/segments")))
            .header("Authorization", self.bearer()?)
            .json(&json!({ "public_id": public_id }))
            .send()
            .await?;
        adopt(response).await
    }

    async fn merge_segments(&self, artifact_id: &str) -> Result<AudioArtifact, ApiError> {
        let response = self
            .client
            .post(self.endpoint(&format!("audio-artifacts/{artifact_id}/merge")))
            .header("Authorization", self.bearer()?)
            .send()
            .await?;
        adopt(response).await
    }

    async fn list_siblings(
        &self,
        parent_id: &str,
        scope: SiblingScope,
        include_unpublished: bool,
    ) -> Result<Vec<SiblingUnit>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(scope.path()))
            .header("Authorization", self.bearer()?)
            .query(&[
                ("parent", parent_id),
                ("include_unpublished", if include_unpublished { "true" } else { "false" }),
            ])
            .send()
            .await?;
        adopt(response).await
    }

    async fn create_sibling(
        &self,
        parent_id: &str,
        scope: SiblingScope,
        title: &str,
        order: u32,
    ) -> Result<SiblingUnit, ApiError> {
        let response = self
            .client
            .post(self.endpoint(scope.path()))
            .header("Authorization", self.bearer()?)
            .json(&json!({
                "parent_id": parent_id,
                "title": title,
                "order": order,
            }))
            .send()
            .await?;
        adopt(response).await
    }
}
