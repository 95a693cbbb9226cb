use thiserror::Error;

/// Errors that can occur while capturing or handing off a recording.
///
/// Starting an already active session and stopping with no captured audio
/// are not errors. Encoding has no failure path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Permission denied, or no usable input device.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    /// A closed session cannot be restarted; create a new one.
    #[error("session closed")]
    SessionClosed,

    #[error("stream failed: {0}")]
    StreamFailed(String),

    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = CaptureError::DeviceUnavailable("permission denied".into());
        assert_eq!(err.to_string(), "device unavailable: permission denied");
        assert_eq!(CaptureError::SessionClosed.to_string(), "session closed");
    }
}
