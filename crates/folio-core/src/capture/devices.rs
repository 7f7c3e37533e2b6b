//! Audio input device enumeration.

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait};

#[cfg(target_os = "linux")]
mod alsa_suppress {
    use std::os::raw::{c_char, c_int};
    use std::sync::Once;

    // ALSA's handler signature is variadic; a non-variadic pointer is
    // ABI-compatible because the handler ignores all arguments.
    type SndLibErrorHandlerT =
        unsafe extern "C" fn(*const c_char, c_int, *const c_char, c_int, *const c_char);

    #[link(name = "asound")]
    unsafe extern "C" {
        fn snd_lib_error_set_handler(handler: Option<SndLibErrorHandlerT>) -> c_int;
    }

    unsafe extern "C" fn silent_error_handler(
        _file: *const c_char,
        _line: c_int,
        _function: *const c_char,
        _err: c_int,
        _fmt: *const c_char,
    ) {
    }

    static INIT: Once = Once::new();

    /// Suppress ALSA's noisy messages about unavailable PCM plugins.
    /// Purely cosmetic; capture works the same without it.
    pub fn init() {
        INIT.call_once(|| {
            // SAFETY: the handler is a valid no-op with a compatible ABI.
            unsafe {
                snd_lib_error_set_handler(Some(silent_error_handler));
            }
        });
    }
}

#[cfg(not(target_os = "linux"))]
mod alsa_suppress {
    pub fn init() {}
}

/// An audio input device as reported by the platform.
#[derive(Debug, Clone)]
pub struct InputDeviceInfo {
    pub name: String,
    pub is_default: bool,
}

/// List all available audio input devices.
///
/// # Errors
/// Returns an error if no input devices are found.
pub fn list_input_devices() -> Result<Vec<InputDeviceInfo>> {
    alsa_suppress::init();

    let host = cpal::default_host();
    let default_name = host
        .default_input_device()
        .and_then(|d| d.description().ok())
        .map(|d| d.to_string());

    let mut devices = Vec::new();
    for device in host.input_devices()? {
        if let Ok(description) = device.description() {
            let name = description.to_string();
            devices.push(InputDeviceInfo {
                is_default: default_name.as_ref() == Some(&name),
                name,
            });
        }
    }

    if devices.is_empty() {
        anyhow::bail!("No audio input devices found");
    }

    Ok(devices)
}

/// Platform-specific audio setup. On Linux this silences ALSA plugin
/// warnings; elsewhere it is a no-op.
pub(super) fn init_platform() {
    alsa_suppress::init();
}
