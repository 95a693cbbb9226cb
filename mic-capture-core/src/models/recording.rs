use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::audio_models::RecordingPurpose;
use crate::processing::wav_format::{self, WAV_MEDIA_TYPE};

/// Flattened, immutable samples of one completed capture.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleBuffer {
    samples: Vec<f32>,
}

impl SampleBuffer {
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.samples
    }
}

impl From<Vec<f32>> for SampleBuffer {
    fn from(samples: Vec<f32>) -> Self {
        Self { samples }
    }
}

/// Result of stopping an active session: the samples plus the device's
/// native rate they were captured at.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    samples: SampleBuffer,
    sample_rate: u32,
}

impl Recording {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples: SampleBuffer::from(samples),
            sample_rate,
        }
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Encode as a mono PCM16 WAV artifact named for `purpose`.
    pub fn encode(&self, purpose: RecordingPurpose) -> EncodedArtifact {
        let bytes = wav_format::encode_wav_mono_pcm16(self.samples.as_slice(), self.sample_rate);
        let metadata = ArtifactMetadata::describe(self, purpose, &bytes);
        EncodedArtifact { bytes, metadata }
    }
}

/// A complete WAV file ready for upload. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedArtifact {
    bytes: Vec<u8>,
    metadata: ArtifactMetadata,
}

impl EncodedArtifact {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn file_name(&self) -> &str {
        &self.metadata.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.metadata.media_type
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Description of an encoded artifact, sent alongside it to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub id: String,
    pub created_at: String,
    pub purpose: RecordingPurpose,
    pub file_name: String,
    pub media_type: String,
    pub sample_rate: u32,
    pub sample_count: u64,
    pub duration_secs: f64,
    pub byte_len: u64,
    pub checksum: String,
}

impl ArtifactMetadata {
    fn describe(recording: &Recording, purpose: RecordingPurpose, bytes: &[u8]) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            purpose,
            file_name: purpose.file_name().to_string(),
            media_type: WAV_MEDIA_TYPE.to_string(),
            sample_rate: recording.sample_rate(),
            sample_count: ((bytes.len() - wav_format::WAV_HEADER_SIZE) / 2) as u64,
            duration_secs: recording.duration_secs(),
            byte_len: bytes.len() as u64,
            checksum: sha256_hex(bytes),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes).iter().map(|b| format!("{:02x}", b)).collect()
}
