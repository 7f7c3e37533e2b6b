//! Client for the remote content API.
//!
//! All mutating endpoints return the full updated parent object, never a
//! delta. Callers adopt that echo wholesale, which is what lets the client
//! avoid reconciling partial state.

mod http;

pub use http::HttpContentApi;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{AudioArtifact, SiblingScope, SiblingUnit};
use crate::staging::StagedSegment;

/// Request timeout for content API calls, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Failure classes surfaced by the content API client.
///
/// Everything here is recoverable: callers translate these into UI-visible
/// text and leave local state (staging queue, last adopted artifact)
/// untouched so the operation can be retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("missing credential: {0}")]
    Credential(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Operations the content API offers to this client.
///
/// Implemented over HTTP by [`HttpContentApi`]; test code substitutes an
/// in-memory fake so the orchestration layers run without a network.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Fetch an audio artifact with its ordered segment id list.
    async fn fetch_artifact(&self, artifact_id: &str) -> Result<AudioArtifact, ApiError>;

    /// Append segments to the end of the artifact's persisted list, as one
    /// multipart batch in the given order.
    async fn append_segments(
        &self,
        artifact_id: &str,
        segments: &[StagedSegment],
    ) -> Result<AudioArtifact, ApiError>;

    /// Submit a complete proposed ordering of the artifact's segment ids.
    async fn reorder_segments(
        &self,
        artifact_id: &str,
        ordered_ids: &[String],
    ) -> Result<AudioArtifact, ApiError>;

    /// Delete one persisted segment by its public id.
    async fn remove_segment(
        &self,
        artifact_id: &str,
        public_id: &str,
    ) -> Result<AudioArtifact, ApiError>;

    /// Assemble all persisted segments into a single playable file.
    async fn merge_segments(&self, artifact_id: &str) -> Result<AudioArtifact, ApiError>;

    /// List sibling units under a parent, with their orders.
    async fn list_siblings(
        &self,
        parent_id: &str,
        scope: SiblingScope,
        include_unpublished: bool,
    ) -> Result<Vec<SiblingUnit>, ApiError>;

    /// Create a sibling unit carrying a server-confirmed order.
    async fn create_sibling(
        &self,
        parent_id: &str,
        scope: SiblingScope,
        title: &str,
        order: u32,
    ) -> Result<SiblingUnit, ApiError>;
}
