use crate::models::error::CaptureError;
use crate::models::recording::Recording;
use crate::models::state::CaptureState;

/// Event delegate for capture session notifications.
///
/// State and recording notifications are called on the thread driving the
/// session (the caller of start/stop). Stream failures reported by the
/// provider while capturing reach `on_error` from the provider's audio thread.
pub trait CaptureDelegate: Send + Sync {
    /// Called when the session state changes.
    fn on_state_changed(&self, state: CaptureState);

    /// Called when starting, releasing, delivering or a running stream fails.
    fn on_error(&self, error: &CaptureError);

    /// Called when an active session stops and its recording is finalized.
    fn on_recording_finished(&self, recording: &Recording);
}
