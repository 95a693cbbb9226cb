//! cpal microphone capture provider.
//!
//! Opens the default (or a named) input device at its native rate and
//! delivers mono f32 chunks via the `ChunkCallback`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Sample, SizedSample};
use parking_lot::Mutex;

use mic_capture_core::models::audio_models::InputDevice;
use mic_capture_core::models::config::CaptureConfiguration;
use mic_capture_core::models::error::CaptureError;
use mic_capture_core::traits::audio_input::{AudioInputProvider, ChunkCallback, StreamErrorCallback};

use crate::device_enumerator::DeviceEnumerator;

/// cpal microphone capture.
///
/// cpal streams are not `Send` on every platform, so the stream is built,
/// played and dropped on a dedicated capture thread. `request_stream`
/// returns once that thread reports the stream running (or failing).
pub struct CpalMicInput {
    device_name: Option<String>,
    buffer_size: Option<u32>,
    running: Arc<AtomicBool>,
    capture_handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl CpalMicInput {
    /// Create a capture for the system default microphone.
    pub fn default_device() -> Self {
        Self {
            device_name: None,
            buffer_size: None,
            running: Arc::new(AtomicBool::new(false)),
            capture_handle: Mutex::new(None),
        }
    }

    /// Create a capture for the device and chunk size in `config`.
    pub fn from_config(config: &CaptureConfiguration) -> Result<Self, CaptureError> {
        let mut input = Self::default_device();
        input.apply_configuration(config)?;
        Ok(input)
    }
}

impl AudioInputProvider for CpalMicInput {
    fn apply_configuration(&mut self, config: &CaptureConfiguration) -> Result<(), CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        self.device_name = config.device_name.clone();
        self.buffer_size = Some(config.buffer_size);
        Ok(())
    }

    fn is_available(&self) -> bool {
        DeviceEnumerator::new()
            .find_capture_device(self.device_name.as_deref())
            .is_ok()
    }

    fn request_stream(
        &mut self,
        on_chunk: ChunkCallback,
        on_error: StreamErrorCallback,
    ) -> Result<u32, CaptureError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(CaptureError::StreamFailed("mic capture already running".into()));
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let device_name = self.device_name.clone();
        let buffer_size = self.buffer_size;
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<u32, CaptureError>>(1);

        let spawned = thread::Builder::new()
            .name("cpal-mic-capture".into())
            .spawn(move || {
                let stream = match open_stream(
                    device_name.as_deref(),
                    buffer_size,
                    on_chunk,
                    on_error,
                ) {
                    Ok((stream, rate)) => {
                        let _ = ready_tx.send(Ok(rate));
                        stream
                    }
                    Err(e) => {
                        running.store(false, Ordering::SeqCst);
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                while running.load(Ordering::SeqCst) {
                    thread::park_timeout(Duration::from_millis(100));
                }

                let _ = stream.pause();
                drop(stream);
                log::debug!("Mic stream closed");
            });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                return Err(CaptureError::StreamFailed(format!("failed to spawn mic thread: {}", e)));
            }
        };

        let ready = ready_rx
            .recv()
            .unwrap_or_else(|_| Err(CaptureError::StreamFailed("mic thread exited during setup".into())));

        match ready {
            Ok(rate) => {
                *self.capture_handle.lock() = Some(handle);
                Ok(rate)
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                let _ = handle.join();
                Err(e)
            }
        }
    }

    fn release(&mut self) -> Result<(), CaptureError> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.capture_handle.lock().take() {
            handle.thread().unpark();
            handle
                .join()
                .map_err(|_| CaptureError::StreamFailed("mic thread panicked".into()))?;
        }
        Ok(())
    }

    fn device_info(&self) -> InputDevice {
        match self.device_name {
            Some(ref name) => InputDevice {
                id: name.clone(),
                name: name.clone(),
                is_default: false,
            },
            None => InputDevice {
                id: "default-mic".into(),
                name: DeviceEnumerator::new()
                    .default_capture_device_name()
                    .unwrap_or_else(|| "Default Microphone".into()),
                is_default: true,
            },
        }
    }
}

impl Drop for CpalMicInput {
    fn drop(&mut self) {
        if self.capture_handle.lock().is_some() {
            let _ = self.release();
        }
    }
}

/// Build and start an input stream on the calling thread.
///
/// Returns the running stream and the device's native sample rate.
fn open_stream(
    device_name: Option<&str>,
    buffer_size: Option<u32>,
    on_chunk: ChunkCallback,
    on_error: StreamErrorCallback,
) -> Result<(cpal::Stream, u32), CaptureError> {
    let device = DeviceEnumerator::new().find_capture_device(device_name)?;
    let supported = device
        .default_input_config()
        .map_err(|e| CaptureError::DeviceUnavailable(format!("no usable input config: {}", e)))?;

    let sample_rate = supported.sample_rate().0;
    let sample_format = supported.sample_format();
    let mut config = supported.config();
    if let Some(frames) = buffer_size {
        config.buffer_size = choose_buffer_size(supported.buffer_size(), frames);
    }

    log::info!(
        "Opening mic '{}': {} Hz, {} ch, {:?}, buffer {:?}",
        device.name().unwrap_or_else(|_| "unknown".into()),
        sample_rate,
        config.channels,
        sample_format,
        config.buffer_size
    );

    let stream = match sample_format {
        cpal::SampleFormat::F32 => build_mono_stream::<f32>(&device, &config, on_chunk, on_error)?,
        cpal::SampleFormat::I16 => build_mono_stream::<i16>(&device, &config, on_chunk, on_error)?,
        cpal::SampleFormat::U16 => build_mono_stream::<u16>(&device, &config, on_chunk, on_error)?,
        cpal::SampleFormat::I32 => build_mono_stream::<i32>(&device, &config, on_chunk, on_error)?,
        format => {
            return Err(CaptureError::ConfigurationFailed(format!(
                "unsupported sample format: {:?}",
                format
            )))
        }
    };

    stream
        .play()
        .map_err(|e| CaptureError::DeviceUnavailable(format!("failed to start stream: {}", e)))?;

    Ok((stream, sample_rate))
}

fn build_mono_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    on_chunk: ChunkCallback,
    on_error: StreamErrorCallback,
) -> Result<cpal::Stream, CaptureError>
where
    T: SizedSample + Send + 'static,
    f32: cpal::FromSample<T>,
{
    let channels = config.channels as usize;
    let err_fn = move |err: cpal::StreamError| on_error(map_stream_error(err));
    // Sized once per device period and reused for every callback.
    let mut mono: Vec<f32> = Vec::new();

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                fill_first_channel(data, channels, &mut mono);
                on_chunk(mono.as_slice());
            },
            err_fn,
            None,
        )
        .map_err(map_build_error)
}

fn map_build_error(err: cpal::BuildStreamError) -> CaptureError {
    match err {
        cpal::BuildStreamError::StreamConfigNotSupported | cpal::BuildStreamError::InvalidArgument => {
            CaptureError::ConfigurationFailed(err.to_string())
        }
        other => CaptureError::DeviceUnavailable(other.to_string()),
    }
}

fn map_stream_error(err: cpal::StreamError) -> CaptureError {
    match err {
        cpal::StreamError::DeviceNotAvailable => {
            CaptureError::DeviceUnavailable("input device disconnected".into())
        }
        other => CaptureError::StreamFailed(other.to_string()),
    }
}

/// Pick a fixed buffer size when the device supports it, else let the
/// backend decide.
fn choose_buffer_size(supported: &cpal::SupportedBufferSize, frames: u32) -> cpal::BufferSize {
    match supported {
        cpal::SupportedBufferSize::Range { min, max } if (*min..=*max).contains(&frames) => {
            cpal::BufferSize::Fixed(frames)
        }
        _ => cpal::BufferSize::Default,
    }
}

/// Overwrite `out` with the first channel of interleaved audio, as f32.
///
/// Keeps `out`'s allocation, so steady-state callbacks do not allocate.
fn fill_first_channel<T>(data: &[T], channels: usize, out: &mut Vec<f32>)
where
    T: Sample,
    f32: cpal::FromSample<T>,
{
    out.clear();
    out.extend(data.iter().step_by(channels.max(1)).map(|&s| s.to_sample::<f32>()));
}
