//! Platform audio capture behind a small capability interface.

mod cpal_backend;
mod devices;

pub use cpal_backend::CpalCaptureBackend;
pub use devices::{InputDeviceInfo, list_input_devices};

use anyhow::Result;

/// One captured clip: encoded container bytes plus their mime type.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedClip {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Capability interface over platform audio capture.
///
/// The recorder state machine is generic over this trait so it can be unit
/// tested without real hardware. Implementations hold the capture device
/// exclusively between `start` and `stop` and release it on either `stop`
/// or a start failure.
pub trait CaptureBackend {
    /// Acquire the capture device and begin buffering audio.
    fn start(&mut self) -> Result<()>;

    /// Release the device and return everything buffered since `start`.
    fn stop(&mut self) -> Result<CapturedClip>;
}
