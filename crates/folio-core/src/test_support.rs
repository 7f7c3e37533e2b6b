//! Scriptable in-memory content API for exercising orchestration code
//! without a network.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::api::{ApiError, ContentApi};
use crate::model::{AudioArtifact, SiblingScope, SiblingUnit};
use crate::staging::StagedSegment;

/// One recorded call against the fake, with the arguments that matter to
/// assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Fetch,
    Append { count: usize },
    Reorder { proposed: Vec<String> },
    Remove { public_id: String },
    Merge,
    ListSiblings { parent_id: String },
    CreateSibling { order: u32 },
}

pub struct FakeApi {
    state: Mutex<AudioArtifact>,
    calls: Mutex<Vec<ApiCall>>,
    fail_next: Mutex<Option<String>>,
    echo_override: Mutex<Option<AudioArtifact>>,
    siblings: Mutex<Vec<SiblingUnit>>,
    appended: Mutex<usize>,
}

impl FakeApi {
    pub fn new(segment_ids: &[&str]) -> Self {
        Self {
            state: Mutex::new(AudioArtifact {
                id: "artifact-1".to_string(),
                segment_public_ids: segment_ids.iter().map(|s| s.to_string()).collect(),
                merged_audio_url: None,
                updated_at: None,
            }),
            calls: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
            echo_override: Mutex::new(None),
            siblings: Mutex::new(Vec::new()),
            appended: Mutex::new(0),
        }
    }

    /// Make the next call fail with a 500-style status error.
    pub fn fail_next(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_string());
    }

    /// Replace the echo returned by the next reorder call, simulating the
    /// server diverging from the client's proposal.
    pub fn set_echo(&self, artifact: AudioArtifact) {
        *self.echo_override.lock().unwrap() = Some(artifact);
    }

    pub fn set_siblings(&self, parent_id: &str, orders: &[u32]) {
        let units = orders
            .iter()
            .map(|&order| SiblingUnit {
                id: format!("unit-{order}"),
                order,
                parent_id: parent_id.to_string(),
                published: order % 2 == 0,
                title: None,
            })
            .collect();
        *self.siblings.lock().unwrap() = units;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn current(&self) -> AudioArtifact {
        self.state.lock().unwrap().clone()
    }

    fn take_failure(&self) -> Option<ApiError> {
        self.fail_next
            .lock()
            .unwrap()
            .take()
            .map(|message| ApiError::Status {
                status: 500,
                message,
            })
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ContentApi for FakeApi {
    async fn fetch_artifact(&self, _artifact_id: &str) -> Result<AudioArtifact, ApiError> {
        self.record(ApiCall::Fetch);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.current())
    }

    async fn append_segments(
        &self,
        _artifact_id: &str,
        segments: &[StagedSegment],
    ) -> Result<AudioArtifact, ApiError> {
        self.record(ApiCall::Append {
            count: segments.len(),
        });
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        let mut counter = self.appended.lock().unwrap();
        for _ in segments {
            *counter += 1;
            state.segment_public_ids.push(format!("seg-{counter}", counter = *counter));
        }
        Ok(state.clone())
    }

    async fn reorder_segments(
        &self,
        _artifact_id: &str,
        ordered_ids: &[String],
    ) -> Result<AudioArtifact, ApiError> {
        self.record(ApiCall::Reorder {
            proposed: ordered_ids.to_vec(),
        });
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        if let Some(echo) = self.echo_override.lock().unwrap().take() {
            *state = echo;
        } else {
            state.segment_public_ids = ordered_ids.to_vec();
        }
        Ok(state.clone())
    }

    async fn remove_segment(
        &self,
        _artifact_id: &str,
        public_id: &str,
    ) -> Result<AudioArtifact, ApiError> {
        self.record(ApiCall::Remove {
            public_id: public_id.to_string(),
        });
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        state.segment_public_ids.retain(|id| id != public_id);
        Ok(state.clone())
    }

    async fn merge_segments(&self, _artifact_id: &str) -> Result<AudioArtifact, ApiError> {
        self.record(ApiCall::Merge);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        // Stable for an unchanged segment list, making repeat merges
        // observably equivalent
        state.merged_audio_url = Some(format!("https://cdn.example.test/{}.mp3", state.id));
        Ok(state.clone())
    }

    async fn list_siblings(
        &self,
        parent_id: &str,
        _scope: SiblingScope,
        _include_unpublished: bool,
    ) -> Result<Vec<SiblingUnit>, ApiError> {
        self.record(ApiCall::ListSiblings {
            parent_id: parent_id.to_string(),
        });
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.siblings.lock().unwrap().clone())
    }

    async fn create_sibling(
        &self,
        parent_id: &str,
        _scope: SiblingScope,
        title: &str,
        order: u32,
    ) -> Result<SiblingUnit, ApiError> {
        self.record(ApiCall::CreateSibling { order });
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(SiblingUnit {
            id: format!("unit-new-{order}"),
            order,
            parent_id: parent_id.to_string(),
            published: false,
            title: Some(title.to_string()),
        })
    }
}
