use serde::{Deserialize, Serialize};

/// What a recording is for. Picks the file name used when the artifact is
/// handed to the upload layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingPurpose {
    /// Voice sample used to enroll a known speaker.
    Enrollment,
    /// Conversation to transcribe.
    #[default]
    Transcription,
}

impl RecordingPurpose {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Enrollment => "enroll.wav",
            Self::Transcription => "session.wav",
        }
    }
}

/// An audio input device available for capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDevice {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

/// Counters for debugging a capture session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureDiagnostics {
    /// Chunks appended while the session was active.
    pub chunks_accepted: u64,
    /// Chunks that arrived after stop and were dropped.
    pub chunks_discarded: u64,
    pub samples_total: u64,
    /// Runtime stream failures reported by the provider.
    pub stream_errors: u64,
}
