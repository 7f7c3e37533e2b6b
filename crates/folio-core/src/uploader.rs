//! Flushing the staging queue to the content API.

use anyhow::{Context, Result};

use crate::api::ContentApi;
use crate::model::AudioArtifact;
use crate::staging::SegmentStagingQueue;

/// Upload every staged segment as one multipart batch, appending them in
/// queue order to the end of the artifact's persisted list.
///
/// The queue is cleared only after the server confirms the batch; on any
/// failure it is left untouched so the caller can retry without re-selecting
/// files. The returned artifact is the server echo and replaces whatever the
/// caller held before.
pub async fn upload_staged<A>(
    api: &A,
    queue: &mut SegmentStagingQueue,
    artifact_id: &str,
) -> Result<AudioArtifact>
where
    A: ContentApi + ?Sized,
{
    if queue.is_empty() {
        anyhow::bail!("staging queue is empty, nothing to upload");
    }

    let artifact = api
        .append_segments(artifact_id, queue.segments())
        .await
        .context("failed to upload staged segments")?;

    queue.clear();
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staging::StagedSegment;
    use crate::test_support::{ApiCall, FakeApi};

    fn queue_of(names: &[&str]) -> SegmentStagingQueue {
        let mut queue = SegmentStagingQueue::new();
        queue.add_many(names.iter().map(|name| StagedSegment {
            filename: name.to_string(),
            mime_type: "audio/wav".to_string(),
            data: vec![0; 8],
        }));
        queue
    }

    #[tokio::test]
    async fn successful_upload_clears_queue_and_extends_list() {
        let api = FakeApi::new(&["a"]);
        let mut queue = queue_of(&["one.wav", "two.wav"]);

        let artifact = upload_staged(&api, &mut queue, "artifact-1").await.unwrap();

        assert!(queue.is_empty());
        assert_eq!(artifact.segment_public_ids.len(), 3);
        assert_eq!(api.calls(), vec![ApiCall::Append { count: 2 }]);
    }

    #[tokio::test]
    async fn failed_upload_leaves_queue_untouched() {
        let api = FakeApi::new(&["a"]);
        let mut queue = queue_of(&["one.wav", "two.wav"]);

        api.fail_next("storage unavailable");
        let result = upload_staged(&api, &mut queue, "artifact-1").await;

        assert!(result.is_err());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.segments()[0].filename, "one.wav");
        // Server list unchanged too
        assert_eq!(api.current().segment_public_ids, vec!["a"]);
    }

    #[tokio::test]
    async fn empty_queue_is_rejected_without_a_request() {
        let api = FakeApi::new(&[]);
        let mut queue = SegmentStagingQueue::new();

        let result = upload_staged(&api, &mut queue, "artifact-1").await;

        assert!(result.is_err());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn retry_after_failure_succeeds_with_same_content() {
        let api = FakeApi::new(&[]);
        let mut queue = queue_of(&["one.wav"]);

        api.fail_next("timeout");
        assert!(upload_staged(&api, &mut queue, "artifact-1").await.is_err());

        let artifact = upload_staged(&api, &mut queue, "artifact-1").await.unwrap();
        assert!(queue.is_empty());
        assert_eq!(artifact.segment_public_ids.len(), 1);
    }
}
