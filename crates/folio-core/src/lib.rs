pub mod api;
pub mod auth;
pub mod capture;
pub mod merge;
pub mod model;
pub mod order;
pub mod ordering;
pub mod recorder;
pub mod settings;
pub mod staging;
pub mod uploader;
pub mod verbose;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiError, ContentApi, DEFAULT_TIMEOUT_SECS, HttpContentApi};
pub use auth::{SettingsToken, StaticToken, TokenProvider};
pub use capture::{
    CaptureBackend, CapturedClip, CpalCaptureBackend, InputDeviceInfo, list_input_devices,
};
pub use merge::{FlashKind, MergeCoordinator, StatusFlash};
pub use model::{AudioArtifact, SiblingScope, SiblingUnit};
pub use order::{next_order, propose_order};
pub use ordering::{MoveDirection, move_segment, remove_segment};
pub use recorder::{SegmentRecorder, format_elapsed};
pub use settings::Settings;
pub use staging::{SegmentStagingQueue, StagedSegment};
pub use uploader::upload_staged;
pub use verbose::set_verbose;
