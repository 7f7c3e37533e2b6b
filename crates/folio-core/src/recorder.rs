//! Recording state machine for capturing audio segments.
//!
//! One recorder drives one capture surface: `Idle → Recording → Stopped →
//! Idle`. A stopped clip leaves the machine only by being consumed into a
//! staged segment, or by being discarded when a fresh recording starts.

use anyhow::Result;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::capture::{CaptureBackend, CapturedClip};
use crate::staging::StagedSegment;

enum Phase {
    Idle,
    Recording { started: Instant },
    Stopped { clip: CapturedClip, elapsed_secs: u64 },
}

/// State machine wrapping a [`CaptureBackend`].
pub struct SegmentRecorder<B: CaptureBackend> {
    backend: B,
    phase: Phase,
}

impl<B: CaptureBackend> SegmentRecorder<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            phase: Phase::Idle,
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.phase, Phase::Recording { .. })
    }

    /// Whether a stopped clip is waiting to be consumed or discarded.
    pub fn has_clip(&self) -> bool {
        matches!(self.phase, Phase::Stopped { .. })
    }

    /// Begin a new recording.
    ///
    /// Illegal while already recording. Starting over a stopped clip
    /// discards that clip. On a device-access failure the machine stays
    /// `Idle` and the error is recoverable.
    pub fn start(&mut self) -> Result<()> {
        if self.is_recording() {
            anyhow::bail!("a recording is already in progress");
        }

        // Any unconsumed clip is dropped here
        self.phase = Phase::Idle;
        self.backend.start()?;
        self.phase = Phase::Recording {
            started: Instant::now(),
        };
        Ok(())
    }

    /// Stop the active recording, freezing the elapsed counter and holding
    /// the captured clip. A no-op unless currently recording.
    pub fn stop(&mut self) -> Result<()> {
        let started = match &self.phase {
            Phase::Recording { started } => *started,
            _ => return Ok(()),
        };

        let elapsed_secs = started.elapsed().as_secs();
        match self.backend.stop() {
            Ok(clip) => {
                self.phase = Phase::Stopped { clip, elapsed_secs };
                Ok(())
            }
            Err(err) => {
                // Device already released by the backend; nothing to keep
                self.phase = Phase::Idle;
                Err(err)
            }
        }
    }

    /// Seconds recorded so far: live while recording, frozen once stopped,
    /// zero when idle.
    pub fn elapsed_seconds(&self) -> u64 {
        match &self.phase {
            Phase::Idle => 0,
            Phase::Recording { started } => started.elapsed().as_secs(),
            Phase::Stopped { elapsed_secs, .. } => *elapsed_secs,
        }
    }

    /// Consume the stopped clip into a named staged segment and return the
    /// machine to `Idle`. Returns `None` when there is no clip.
    ///
    /// This is the only path by which a captured clip becomes durable
    /// within the session.
    pub fn take_segment(&mut self) -> Option<StagedSegment> {
        if !self.has_clip() {
            return None;
        }
        let Phase::Stopped { clip, .. } = std::mem::replace(&mut self.phase, Phase::Idle) else {
            unreachable!()
        };

        Some(StagedSegment {
            filename: clip_filename(&clip.mime_type),
            mime_type: clip.mime_type,
            data: clip.data,
        })
    }

    /// Drop a stopped clip without staging it.
    pub fn discard(&mut self) {
        if self.has_clip() {
            self.phase = Phase::Idle;
        }
    }
}

/// Collision-resistant filename for a recorded clip, derived from the
/// current time plus an extension matching the capture content type.
fn clip_filename(mime_type: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let extension = match mime_type {
        "audio/wav" => "wav",
        "audio/mpeg" => "mp3",
        "audio/ogg" => "ogg",
        _ => "bin",
    };
    format!("recording-{millis}.{extension}")
}

/// Format an elapsed-seconds counter as `minutes:seconds`, seconds
/// zero-padded to two digits.
pub fn format_elapsed(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
