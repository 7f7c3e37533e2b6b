//! Server-coordinated reorder and removal of persisted segments.
//!
//! The client is always a proposer: it submits the complete proposed id
//! list, then adopts the server echo unconditionally, even when the echo
//! differs from the proposal (mutate → await → replace-wholesale, never
//! patch-in-place).

use anyhow::{Context, Result};
use std::fmt;

use crate::api::ContentApi;
use crate::model::AudioArtifact;

/// Direction for an adjacent-swap move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Earlier,
    Later,
}

impl MoveDirection {
    pub fn offset(self) -> i64 {
        match self {
            MoveDirection::Earlier => -1,
            MoveDirection::Later => 1,
        }
    }

    /// Target index for a move, or `None` when the move would leave the
    /// list bounds (a no-op, not an error).
    fn target(self, source_index: usize, len: usize) -> Option<usize> {
        if source_index >= len {
            return None;
        }
        let target = source_index as i64 + self.offset();
        if target < 0 || target as usize >= len {
            None
        } else {
            Some(target as usize)
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDirection::Earlier => write!(f, "earlier"),
            MoveDirection::Later => write!(f, "later"),
        }
    }
}

impl std::str::FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "earlier" | "up" | "-1" => Ok(MoveDirection::Earlier),
            "later" | "down" | "+1" | "1" => Ok(MoveDirection::Later),
            _ => Err(format!("Unknown direction: {}. Available: earlier, later", s)),
        }
    }
}

/// Swap the segment at `source_index` with its neighbor in `direction` and
/// submit the full proposed ordering.
///
/// An out-of-bounds target is a silent no-op: the current artifact is
/// returned unchanged and no request is sent. Otherwise the server echo is
/// adopted verbatim, whatever it contains.
pub async fn move_segment<A>(
    api: &A,
    artifact: &AudioArtifact,
    source_index: usize,
    direction: MoveDirection,
) -> Result<AudioArtifact>
where
    A: ContentApi + ?Sized,
{
    let ids = &artifact.segment_public_ids;
    let Some(target_index) = direction.target(source_index, ids.len()) else {
        return Ok(artifact.clone());
    };

    let mut proposed = ids.clone();
    proposed.swap(source_index, target_index);

    api.reorder_segments(&artifact.id, &proposed)
        .await
        .context("failed to reorder segments")
}

/// Delete one persisted segment and adopt the shortened echo.
///
/// Segment position is list-index based; removal never renumbers the
/// integer `order` fields of chapters or parts.
pub async fn remove_segment<A>(
    api: &A,
    artifact_id: &str,
    public_id: &str,
) -> Result<AudioArtifact>
where
    A: ContentApi + ?Sized,
{
    api.remove_segment(artifact_id, public_id)
        .await
        .with_context(|| format!("failed to remove segment {public_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ApiCall, FakeApi};

    #[tokio::test]
    async fn adjacent_swap_submits_full_proposed_list() {
        let api = FakeApi::new(&["a", "b", "c"]);
        let artifact = api.current();

        let updated = move_segment(&api, &artifact, 2, MoveDirection::Earlier)
            .await
            .unwrap();

        assert_eq!(updated.segment_public_ids, vec!["a", "c", "b"]);
        assert_eq!(
            api.calls(),
            vec![ApiCall::Reorder {
                proposed: vec!["a".into(), "c".into(), "b".into()],
            }]
        );
    }

    #[tokio::test]
    async fn boundary_moves_are_no_ops_without_requests() {
        let api = FakeApi::new(&["a", "b", "c"]);
        let artifact = api.current();

        let first_up = move_segment(&api, &artifact, 0, MoveDirection::Earlier)
            .await
            .unwrap();
        let last_down = move_segment(&api, &artifact, 2, MoveDirection::Later)
            .await
            .unwrap();
        let out_of_range = move_segment(&api, &artifact, 9, MoveDirection::Earlier)
            .await
            .unwrap();

        assert_eq!(first_up, artifact);
        assert_eq!(last_down, artifact);
        assert_eq!(out_of_range, artifact);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn divergent_server_echo_is_adopted_verbatim() {
        let api = FakeApi::new(&["a", "b", "c"]);
        let artifact = api.current();

        // Another session appended "d" concurrently; the echo differs from
        // the proposal and still wins.
        let mut echo = artifact.clone();
        echo.segment_public_ids = vec!["a".into(), "c".into(), "b".into(), "d".into()];
        api.set_echo(echo.clone());

        let updated = move_segment(&api, &artifact, 2, MoveDirection::Earlier)
            .await
            .unwrap();

        assert_eq!(updated, echo);
    }

    #[tokio::test]
    async fn failed_reorder_leaves_server_list_untouched() {
        let api = FakeApi::new(&["a", "b"]);
        let artifact = api.current();

        api.fail_next("validation failed");
        let result = move_segment(&api, &artifact, 0, MoveDirection::Later).await;

        assert!(result.is_err());
        assert_eq!(api.current().segment_public_ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn removal_adopts_the_shortened_echo() {
        let api = FakeApi::new(&["a", "b", "c"]);

        let updated = remove_segment(&api, "artifact-1", "b").await.unwrap();

        assert_eq!(updated.segment_public_ids, vec!["a", "c"]);
        assert_eq!(api.calls(), vec![ApiCall::Remove { public_id: "b".into() }]);
    }

    #[test]
    fn direction_parses_both_spellings_and_offsets() {
        assert_eq!("earlier".parse::<MoveDirection>().unwrap(), MoveDirection::Earlier);
        assert_eq!("up".parse::<MoveDirection>().unwrap(), MoveDirection::Earlier);
        assert_eq!("-1".parse::<MoveDirection>().unwrap(), MoveDirection::Earlier);
        assert_eq!("later".parse::<MoveDirection>().unwrap(), MoveDirection::Later);
        assert_eq!("+1".parse::<MoveDirection>().unwrap(), MoveDirection::Later);
        assert!("sideways".parse::<MoveDirection>().is_err());

        assert_eq!(MoveDirection::Earlier.offset(), -1);
        assert_eq!(MoveDirection::Later.offset(), 1);
    }
}
