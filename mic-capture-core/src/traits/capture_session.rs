use crate::models::audio_models::CaptureDiagnostics;
use crate::models::error::CaptureError;
use crate::models::recording::Recording;
use crate::models::state::CaptureState;

/// Main capture session interface.
///
/// Transitions: idle → active → closed.
pub trait CaptureSession: Send {
    /// Current session state.
    fn state(&self) -> CaptureState;

    /// Chunk counters for the current or last capture.
    fn diagnostics(&self) -> CaptureDiagnostics;

    /// Start capture. Transitions: idle → active. No-op while active.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Stop capture, release the device and return what was recorded.
    /// Transitions: active → closed. Returns `None` when not active.
    fn stop(&mut self) -> Option<Recording>;
}
