//! cpal-backed capture producing an in-memory WAV clip.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::{CaptureBackend, CapturedClip, devices};

/// Counter for stream errors, reset per capture session.
/// These are common on Linux (especially USB audio) and non-fatal.
static STREAM_ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

/// Microphone capture via cpal, buffering samples until `stop` encodes them
/// into a single WAV blob.
pub struct CpalCaptureBackend {
    device_name: Option<String>,
    stream: Option<Stream>,
    samples: Arc<Mutex<Vec<f32>>>,
    active_format: Option<(u32, u16)>,
}

impl CpalCaptureBackend {
    /// Capture from the system default input device.
    pub fn new() -> Self {
        Self {
            device_name: None,
            stream: None,
            samples: Arc::new(Mutex::new(Vec::new())),
            active_format: None,
        }
    }

    /// Capture from a named input device.
    pub fn with_device(device_name: impl Into<String>) -> Self {
        Self {
            device_name: Some(device_name.into()),
            ..Self::new()
        }
    }

    fn open_device(&self) -> Result<Device> {
        let host = cpal::default_host();
        match &self.device_name {
            Some(name) => host
                .input_devices()
                .context("failed to enumerate input devices")?
                .find(|d| {
                    d.description()
                        .map(|desc| desc.to_string() == *name)
                        .unwrap_or(false)
                })
                .with_context(|| format!("input device not found: {name}")),
            None => host
                .default_input_device()
                .context("no default input device available"),
        }
    }
}

impl Default for CpalCaptureBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBackend for CpalCaptureBackend {
    fn start(&mut self) -> Result<()> {
        if self.stream.is_some() {
            anyhow::bail!("capture already in progress");
        }

        devices::init_platform();
        let device = self.open_device()?;
        let supported = device
            .default_input_config()
            .context("failed to read default input config")?;
        let sample_rate = supported.sample_rate();
        let channels = supported.channels();
        let config: StreamConfig = supported.config();

        self.samples.lock().unwrap().clear();
        STREAM_ERROR_COUNT.store(0, Ordering::Relaxed);

        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, Arc::clone(&self.samples))?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, Arc::clone(&self.samples))?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, Arc::clone(&self.samples))?,
            other => anyhow::bail!("unsupported sample format: {other:?}"),
        };
        stream.play().context("failed to start capture stream")?;

        self.active_format = Some((sample_rate, channels));
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) -> Result<CapturedClip> {
        let stream = self.stream.take().context("no capture in progress")?;
        // Dropping the stream releases the device
        drop(stream);

        let (sample_rate, channels) = self
            .active_format
            .take()
            .context("no capture in progress")?;
        let samples = std::mem::take(&mut *self.samples.lock().unwrap());

        let errors = STREAM_ERROR_COUNT.load(Ordering::Relaxed);
        if errors > 0 {
            crate::verbose!("capture finished with {errors} non-fatal stream errors");
        }

        let data = encode_wav(&samples, sample_rate, channels)?;
        Ok(CapturedClip {
            data,
            mime_type: "audio/wav".to_string(),
        })
    }
}

/// Build an input stream that appends converted f32 samples to the shared
/// buffer.
fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    samples: Arc<Mutex<Vec<f32>>>,
) -> Result<Stream>
where
    T: cpal::Sample + cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    // Rate-limited error handler for ALSA stream errors
    let err_fn = |err| {
        let count = STREAM_ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
        if count == 0 {
            crate::verbose!("audio stream error (non-fatal, further errors suppressed): {err}");
        } else if count.is_multiple_of(1000) {
            crate::verbose!("audio stream: {count} non-fatal errors so far");
        }
    };

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let mut buffer = samples.lock().unwrap();
            buffer.extend(data.iter().map(|&s| {
                let converted: f32 = cpal::Sample::from_sample(s);
                converted
            }));
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

/// Encode f32 samples as 16-bit PCM WAV bytes.
fn encode_wav(samples: &[f32], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).context("failed to create WAV writer")?;
        for &sample in samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer
                .write_sample((clamped * i16::MAX as f32) as i16)
                .context("failed to write WAV sample")?;
        }
        writer.finalize().context("failed to finalize WAV data")?;
    }
    Ok(cursor.into_inner())
}
