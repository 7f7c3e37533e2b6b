//! Data types mirrored from the content API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The server-held parent object for a chapter's audio.
///
/// Every mutating call against the API returns the full updated artifact
/// ("server echo"). Callers adopt it wholesale and never patch a local copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioArtifact {
    pub id: String,

    /// Ordered ids of persisted segments. A segment's position is its index
    /// in this list; there is no separate position field.
    #[serde(default)]
    pub segment_public_ids: Vec<String>,

    /// Single playable file produced by a merge, superseding the segment
    /// list for playback once present.
    #[serde(default)]
    pub merged_audio_url: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

impl AudioArtifact {
    pub fn has_segments(&self) -> bool {
        !self.segment_public_ids.is_empty()
    }

    pub fn is_merged(&self) -> bool {
        self.merged_audio_url.is_some()
    }
}

/// Which sibling collection an ordered unit belongs to.
///
/// Chapters within a book and parts within a chapter share the same
/// order-assignment scheme; only the endpoint path differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingScope {
    Chapters,
    Parts,
}

impl SiblingScope {
    /// Endpoint path component for this collection
    pub fn path(&self) -> &'static str {
        match self {
            SiblingScope::Chapters => "chapters",
            SiblingScope::Parts => "parts",
        }
    }

    /// Singular unit name for messages
    pub fn unit_name(&self) -> &'static str {
        match self {
            SiblingScope::Chapters => "chapter",
            SiblingScope::Parts => "part",
        }
    }
}

impl fmt::Display for SiblingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl std::str::FromStr for SiblingScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chapter" | "chapters" => Ok(SiblingScope::Chapters),
            "part" | "parts" => Ok(SiblingScope::Parts),
            _ => Err(format!("Unknown scope: {}. Available: chapters, parts", s)),
        }
    }
}

/// A sibling entity holding a unique integer order within its parent scope
/// (a chapter within a book, a part within a chapter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiblingUnit {
    pub id: String,

    /// 1-based position, unique among siblings. Assigned at creation and
    /// changed only through an explicit reorder; never edited directly.
    pub order: u32,

    pub parent_id: String,

    #[serde(default)]
    pub published: bool,

    #[serde(default)]
    pub title: Option<String>,
}
