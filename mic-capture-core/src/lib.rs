//! # mic-capture-core
//!
//! Platform-agnostic microphone capture core library.
//!
//! Accumulates mono sample chunks from an audio input provider between
//! `start` and `stop`, then encodes the result as a self-contained 16-bit
//! PCM WAV file ready for upload. Platform backends (cpal, test doubles)
//! implement the `AudioInputProvider` trait and plug into `MicRecorder`.
//!
//! ## Architecture
//!
//! ```text
//! mic-capture-core (this crate)
//! ├── traits/       ← AudioInputProvider, CaptureSession, CaptureDelegate, ArtifactSink
//! ├── models/       ← CaptureError, CaptureState, CaptureConfiguration, Recording, EncodedArtifact
//! ├── processing/   ← ChunkLog, WAV/PCM16 encoding
//! └── session/      ← MicRecorder (single-use capture session)
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::audio_models::{CaptureDiagnostics, InputDevice, RecordingPurpose};
pub use models::config::CaptureConfiguration;
pub use models::error::CaptureError;
pub use models::recording::{ArtifactMetadata, EncodedArtifact, Recording, SampleBuffer};
pub use models::state::CaptureState;
pub use processing::chunk_log::ChunkLog;
pub use processing::wav_format::{encode_wav_mono_pcm16, quantize_sample, WAV_HEADER_SIZE, WAV_MEDIA_TYPE};
pub use session::recorder::MicRecorder;
pub use traits::artifact_sink::ArtifactSink;
pub use traits::audio_input::{AudioInputProvider, ChunkCallback, StreamErrorCallback};
pub use traits::capture_delegate::CaptureDelegate;
pub use traits::capture_session::CaptureSession;
