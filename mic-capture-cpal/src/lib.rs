//! # mic-capture-cpal
//!
//! cpal backend for mic-capture-core.
//!
//! Provides:
//! - `CpalMicInput` — Microphone capture at the device's native rate
//! - `DeviceEnumerator` — Input device listing via the default cpal host
//! - `permissions` — Microphone access check
//!
//! ## Usage
//! ```ignore
//! use mic_capture_core::{CaptureConfiguration, MicRecorder};
//! use mic_capture_cpal::CpalMicInput;
//!
//! let config = CaptureConfiguration::default();
//! let mut recorder = MicRecorder::new(CpalMicInput::default_device(), config)?;
//! recorder.start()?;
//! // ...
//! let artifact = recorder.stop_and_encode();
//! ```

pub mod cpal_mic;
pub mod device_enumerator;
pub mod permissions;

pub use cpal_mic::CpalMicInput;
pub use device_enumerator::DeviceEnumerator;
pub use permissions::check_microphone_access;
