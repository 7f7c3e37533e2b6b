//! Merging persisted segments into one playable file.

use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use crate::api::ContentApi;
use crate::model::AudioArtifact;

/// How long a merge status indicator stays visible
pub const STATUS_FLASH_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// Transient status indicator that self-clears after its TTL.
#[derive(Debug, Clone)]
pub struct StatusFlash {
    kind: FlashKind,
    message: String,
    shown_at: Instant,
    ttl: Duration,
}

impl StatusFlash {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Error, message)
    }

    fn new(kind: FlashKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
            ttl: STATUS_FLASH_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn kind(&self) -> FlashKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible(&self) -> bool {
        self.shown_at.elapsed() < self.ttl
    }
}

/// Triggers server-side assembly and tracks the transient outcome
/// indicator.
///
/// Upload and merge stay independently invocable: merging never flushes the
/// staging queue first, and asks for assembly only when the persisted list
/// is non-empty. Repeated merges over an unchanged list yield an equivalent
/// artifact.
#[derive(Default)]
pub struct MergeCoordinator {
    flash: Option<StatusFlash>,
}

impl MergeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request assembly of the artifact's segments and adopt the echo.
    pub async fn merge<A>(&mut self, api: &A, artifact: &AudioArtifact) -> Result<AudioArtifact>
    where
        A: ContentApi + ?Sized,
    {
        if artifact.segment_public_ids.is_empty() {
            anyhow::bail!("cannot merge: the artifact has no persisted segments");
        }

        match api.merge_segments(&artifact.id).await {
            Ok(echo) => {
                self.flash = Some(StatusFlash::success("Segments merged"));
                Ok(echo)
            }
            Err(err) => {
                self.flash = Some(StatusFlash::error(err.to_string()));
                Err(err).context("failed to merge segments")
            }
        }
    }

    /// Current status indicator, or `None` once it has expired.
    pub fn status(&self) -> Option<&StatusFlash> {
        self.flash.as_ref().filter(|flash| flash.is_visible())
    }
}
