use std::sync::Arc;

use crate::models::audio_models::InputDevice;
use crate::models::config::CaptureConfiguration;
use crate::models::error::CaptureError;

/// Callback invoked for every chunk of mono f32 samples the device delivers.
///
/// The slice is only valid for the duration of the call; receivers that keep
/// samples must copy them.
pub type ChunkCallback = Arc<dyn Fn(&[f32]) + Send + Sync + 'static>;

/// Callback invoked when a running stream fails (device unplugged, backend
/// error). Fires on the provider's audio thread.
pub type StreamErrorCallback = Arc<dyn Fn(CaptureError) + Send + Sync + 'static>;

/// Interface for platform-specific microphone sources.
///
/// Implemented by:
/// - `CpalMicInput` (mic-capture-cpal)
/// - scripted test doubles that replay a fixed chunk sequence
pub trait AudioInputProvider: Send + Sync {
    /// Adopt the session's device selection and chunk size.
    ///
    /// Called once by the session before any stream is requested. Rejects
    /// configurations that fail `CaptureConfiguration::validate`.
    fn apply_configuration(&mut self, config: &CaptureConfiguration) -> Result<(), CaptureError>;

    /// Whether an input device is currently available.
    fn is_available(&self) -> bool;

    /// Acquire the input device and start delivering chunks via `on_chunk`.
    ///
    /// Returns the device's native sample rate. Chunks arrive in temporal
    /// order on a provider-owned thread, one call at a time. Failures after
    /// the stream is running go to `on_error`. Fails with
    /// `CaptureError::DeviceUnavailable` when access is denied or there is
    /// no input device; in that case nothing is left running.
    fn request_stream(
        &mut self,
        on_chunk: ChunkCallback,
        on_error: StreamErrorCallback,
    ) -> Result<u32, CaptureError>;

    /// Stop delivery and release the device.
    ///
    /// Returns once no further chunk callbacks can start.
    fn release(&mut self) -> Result<(), CaptureError>;

    /// Information about the device backing this provider.
    fn device_info(&self) -> InputDevice;
}
