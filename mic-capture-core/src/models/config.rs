use super::audio_models::RecordingPurpose;

/// Smallest and largest chunk sizes, in frames, a session accepts.
pub const MIN_BUFFER_SIZE: u32 = 256;
pub const MAX_BUFFER_SIZE: u32 = 16384;

/// Configuration for a capture session.
///
/// The sample rate is deliberately absent: the session always records at
/// whatever rate the input device runs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfiguration {
    /// Frames per delivered chunk (default: 4096). Power of two in 256..=16384.
    pub buffer_size: u32,

    /// Recording purpose, used to name the encoded artifact.
    pub purpose: RecordingPurpose,

    /// Specific input device name, or None for the system default.
    pub device_name: Option<String>,
}

impl CaptureConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if !self.buffer_size.is_power_of_two() {
            return Err(format!("buffer size must be a power of two: {}", self.buffer_size));
        }
        if !(MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE).contains(&self.buffer_size) {
            return Err(format!(
                "buffer size {} outside {}..={}",
                self.buffer_size, MIN_BUFFER_SIZE, MAX_BUFFER_SIZE
            ));
        }
        if matches!(self.device_name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err("device name must not be blank".into());
        }
        Ok(())
    }
}

impl Default for CaptureConfiguration {
    fn default() -> Self {
        Self {
            buffer_size: 4096,
            purpose: RecordingPurpose::Transcription,
            device_name: None,
        }
    }
}
