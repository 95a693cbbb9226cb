use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::audio_models::CaptureDiagnostics;
use crate::models::config::CaptureConfiguration;
use crate::models::error::CaptureError;
use crate::models::recording::{EncodedArtifact, Recording};
use crate::models::state::CaptureState;
use crate::processing::chunk_log::ChunkLog;
use crate::traits::artifact_sink::ArtifactSink;
use crate::traits::audio_input::{AudioInputProvider, ChunkCallback, StreamErrorCallback};
use crate::traits::capture_delegate::CaptureDelegate;
use crate::traits::capture_session::CaptureSession;

/// State shared between the session and the provider's audio callback.
///
/// `active` and `log` live under one lock: once `stop` flips `active`
/// while holding it, no callback can touch the log again.
#[derive(Default)]
struct CaptureGate {
    active: bool,
    log: ChunkLog,
    diagnostics: CaptureDiagnostics,
    last_stream_error: Option<CaptureError>,
}

/// Single-use microphone recording session.
///
/// Owns its input provider exclusively and is the single source of its
/// configuration: `new` pushes device selection and chunk size into the
/// provider. Several recorders can coexist, each with its own device stream.
///
/// ```text
/// [AudioInputProvider] → callback → [CaptureGate: ChunkLog] → stop() → Recording → encode() → EncodedArtifact
/// ```
pub struct MicRecorder<P: AudioInputProvider> {
    input: P,
    config: CaptureConfiguration,
    state: CaptureState,
    gate: Arc<Mutex<CaptureGate>>,
    sample_rate: Option<u32>,
    stream_open: bool,
    delegate: Option<Arc<dyn CaptureDelegate>>,
}

impl<P: AudioInputProvider> MicRecorder<P> {
    pub fn new(mut input: P, config: CaptureConfiguration) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        input.apply_configuration(&config)?;
        Ok(Self {
            input,
            config,
            state: CaptureState::Idle,
            gate: Arc::new(Mutex::new(CaptureGate::default())),
            sample_rate: None,
            stream_open: false,
            delegate: None,
        })
    }

    /// Set before `start` so stream failures are forwarded as well.
    pub fn set_delegate(&mut self, delegate: Arc<dyn CaptureDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn config(&self) -> &CaptureConfiguration {
        &self.config
    }

    /// Native rate of the device, known once capture has started.
    pub fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    pub fn diagnostics(&self) -> CaptureDiagnostics {
        self.gate.lock().diagnostics
    }

    /// Most recent failure the provider reported while the stream was running.
    pub fn last_stream_error(&self) -> Option<CaptureError> {
        self.gate.lock().last_stream_error.clone()
    }

    pub fn input(&self) -> &P {
        &self.input
    }

    /// Acquire the input device and begin accumulating chunks.
    ///
    /// No-op when already active. Fails with `SessionClosed` after `stop`.
    /// On failure the session stays idle with nothing left open.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        match self.state {
            CaptureState::Active => {
                log::debug!("start ignored: capture already active");
                return Ok(());
            }
            CaptureState::Closed => return Err(CaptureError::SessionClosed),
            CaptureState::Idle => {}
        }

        {
            let mut gate = self.gate.lock();
            *gate = CaptureGate::default();
            gate.active = true;
        }

        let gate = Arc::clone(&self.gate);
        let on_chunk: ChunkCallback = Arc::new(move |chunk: &[f32]| {
            let mut g = gate.lock();
            if !g.active {
                g.diagnostics.chunks_discarded += 1;
                return;
            }
            g.log.append(chunk);
            g.diagnostics.chunks_accepted += 1;
            g.diagnostics.samples_total += chunk.len() as u64;
        });

        let gate = Arc::clone(&self.gate);
        let delegate = self.delegate.clone();
        let on_error: StreamErrorCallback = Arc::new(move |error: CaptureError| {
            log::error!("Mic stream error: {}", error);
            {
                let mut g = gate.lock();
                g.diagnostics.stream_errors += 1;
                g.last_stream_error = Some(error.clone());
            }
            if let Some(ref delegate) = delegate {
                delegate.on_error(&error);
            }
        });

        let native_rate = match self.input.request_stream(on_chunk, on_error) {
            Ok(rate) => rate,
            Err(e) => {
                self.gate.lock().active = false;
                log::warn!("Microphone unavailable: {}", e);
                self.notify_error(&e);
                return Err(e);
            }
        };
        self.stream_open = true;

        if native_rate == 0 {
            self.gate.lock().active = false;
            self.release_input();
            let err = CaptureError::ConfigurationFailed("device reported a zero sample rate".into());
            self.notify_error(&err);
            return Err(err);
        }

        self.sample_rate = Some(native_rate);
        log::info!(
            "Capture started on '{}' at {} Hz",
            self.input.device_info().name,
            native_rate
        );
        self.set_state(CaptureState::Active);
        Ok(())
    }

    /// Stop capturing, release the device and return the recording.
    ///
    /// Returns `None` when the session is idle or already closed. An active
    /// session that captured nothing still yields an empty recording.
    pub fn stop(&mut self) -> Option<Recording> {
        if !self.state.is_active() {
            log::debug!("stop ignored: session is {}", self.state.as_str());
            return None;
        }

        let (chunks, diagnostics) = {
            let mut gate = self.gate.lock();
            gate.active = false;
            (std::mem::take(&mut gate.log), gate.diagnostics)
        };

        self.release_input();

        let sample_rate = self.sample_rate.unwrap_or_default();
        let recording = Recording::new(chunks.finalize(), sample_rate);
        log::info!(
            "Capture stopped: {} chunks, {} samples ({:.2}s at {} Hz)",
            diagnostics.chunks_accepted,
            recording.sample_count(),
            recording.duration_secs(),
            sample_rate
        );

        self.set_state(CaptureState::Closed);
        if let Some(ref delegate) = self.delegate {
            delegate.on_recording_finished(&recording);
        }
        Some(recording)
    }

    /// Stop and encode in one step, naming the artifact after the configured purpose.
    pub fn stop_and_encode(&mut self) -> Option<EncodedArtifact> {
        let purpose = self.config.purpose;
        self.stop().map(|recording| recording.encode(purpose))
    }

    /// Stop, encode and hand the artifact to `sink`.
    ///
    /// Returns `Ok(false)` when the session was not active and nothing was sent.
    pub fn stop_and_deliver(&mut self, sink: &dyn ArtifactSink) -> Result<bool, CaptureError> {
        let Some(artifact) = self.stop_and_encode() else {
            return Ok(false);
        };
        log::debug!(
            "Delivering {} ({} bytes, {})",
            artifact.file_name(),
            artifact.len(),
            artifact.media_type()
        );
        sink.deliver(&artifact).inspect_err(|e| self.notify_error(e))?;
        Ok(true)
    }

    // --- Internal helpers ---

    fn set_state(&mut self, new_state: CaptureState) {
        self.state = new_state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(new_state);
        }
    }

    fn notify_error(&self, error: &CaptureError) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(error);
        }
    }

    /// Release the provider's stream at most once per acquisition.
    fn release_input(&mut self) {
        if !self.stream_open {
            return;
        }
        self.stream_open = false;
        if let Err(e) = self.input.release() {
            log::error!("Failed to release input device: {}", e);
            self.notify_error(&e);
        }
    }
}

impl<P: AudioInputProvider> CaptureSession for MicRecorder<P> {
    fn state(&self) -> CaptureState {
        MicRecorder::state(self)
    }

    fn diagnostics(&self) -> CaptureDiagnostics {
        MicRecorder::diagnostics(self)
    }

    fn start(&mut self) -> Result<(), CaptureError> {
        MicRecorder::start(self)
    }

    fn stop(&mut self) -> Option<Recording> {
        MicRecorder::stop(self)
    }
}

impl<P: AudioInputProvider> Drop for MicRecorder<P> {
    fn drop(&mut self) {
        if self.state.is_active() {
            log::debug!("Dropping active recorder, stopping capture");
            let _ = self.stop();
        }
        self.release_input();
    }
}
