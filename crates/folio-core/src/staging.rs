//! In-memory staging of audio segments pending upload.

use anyhow::{Context, Result};
use std::path::Path;

/// An audio clip held locally until it is uploaded.
///
/// Staged segments carry no position: once uploaded, a segment's position is
/// its index in the server-held list, and the upload appends in queue order.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedSegment {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Ordered queue of segments waiting to be uploaded.
///
/// Segments enter from the recorder or from picked files and leave only
/// through [`clear`](Self::clear) after a confirmed upload, or through an
/// explicit [`remove_at`](Self::remove_at) before one. The queue and the
/// server-held persisted list are always disjoint.
#[derive(Debug, Default)]
pub struct SegmentStagingQueue {
    segments: Vec<StagedSegment>,
}

impl SegmentStagingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[StagedSegment] {
        &self.segments
    }

    /// Append one segment to the end of the queue.
    pub fn add(&mut self, segment: StagedSegment) {
        self.segments.push(segment);
    }

    /// Append several segments, preserving their given order.
    pub fn add_many<I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = StagedSegment>,
    {
        self.segments.extend(segments);
    }

    /// Read a file from disk and stage it under its own filename.
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let data = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("not a file path: {}", path.display()))?;
        let mime_type = mime_for_filename(&filename).to_string();

        self.add(StagedSegment {
            filename,
            mime_type,
            data,
        });
        Ok(())
    }

    /// Drop the segment at `index` before it is uploaded.
    pub fn remove_at(&mut self, index: usize) -> Option<StagedSegment> {
        if index < self.segments.len() {
            Some(self.segments.remove(index))
        } else {
            None
        }
    }

    /// Empty the queue. Called after the server has confirmed an upload.
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

/// Best-effort mime type from a filename extension. The server validates
/// actual content; `application/octet-stream` is an acceptable fallback.
pub fn mime_for_filename(filename: &str) -> &'static str {
    let extension = filename.rsplit('.').next().unwrap_or("");
    match extension.to_ascii_lowercase().as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn segment(name: &str) -> StagedSegment {
        StagedSegment {
            filename: name.to_string(),
            mime_type: "audio/wav".to_string(),
            data: vec![1, 2, 3],
        }
    }

    #[test]
    fn add_preserves_queue_order() {
        let mut queue = SegmentStagingQueue::new();
        queue.add(segment("a.wav"));
        queue.add_many([segment("b.wav"), segment("c.wav")]);

        let names: Vec<&str> = queue.segments().iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(names, ["a.wav", "b.wav", "c.wav"]);
    }

    #[test]
    fn remove_at_drops_only_the_requested_entry() {
        let mut queue = SegmentStagingQueue::new();
        queue.add_many([segment("a.wav"), segment("b.wav"), segment("c.wav")]);

        let removed = queue.remove_at(1).unwrap();
        assert_eq!(removed.filename, "b.wav");
        assert_eq!(queue.len(), 2);

        assert!(queue.remove_at(5).is_none());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn add_file_stages_bytes_with_inferred_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intro.mp3");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not really mp3").unwrap();

        let mut queue = SegmentStagingQueue::new();
        queue.add_file(&path).unwrap();

        let staged = &queue.segments()[0];
        assert_eq!(staged.filename, "intro.mp3");
        assert_eq!(staged.mime_type, "audio/mpeg");
        assert_eq!(staged.data, b"not really mp3");
    }

    #[test]
    fn add_file_missing_path_leaves_queue_unchanged() {
        let mut queue = SegmentStagingQueue::new();
        let result = queue.add_file(Path::new("/nonexistent/clip.wav"));
        assert!(result.is_err());
        assert!(queue.is_empty());
    }

    #[test]
    fn mime_fallback_for_unknown_extension() {
        assert_eq!(mime_for_filename("clip.xyz"), "application/octet-stream");
        assert_eq!(mime_for_filename("noextension"), "application/octet-stream");
        assert_eq!(mime_for_filename("CLIP.WAV"), "audio/wav");
    }
}
