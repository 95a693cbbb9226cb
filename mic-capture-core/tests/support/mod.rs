//! Deterministic audio input doubles for session tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use mic_capture_core::{
    ArtifactSink, AudioInputProvider, CaptureConfiguration, CaptureDelegate, CaptureError,
    CaptureState, ChunkCallback, EncodedArtifact, InputDevice, Recording, StreamErrorCallback,
};

#[derive(Default)]
struct ScriptState {
    callback: Option<ChunkCallback>,
    error_callback: Option<StreamErrorCallback>,
    requests: u32,
    releases: u32,
}

/// Test-side handle on a `ScriptedInput`: drives deliveries and counts
/// acquire/release calls.
#[derive(Clone, Default)]
pub struct ScriptHandle(Arc<Mutex<ScriptState>>);

impl ScriptHandle {
    /// Deliver a chunk through the session's callback, as the device would.
    ///
    /// Keeps working after release to simulate deliveries already in flight.
    pub fn emit(&self, chunk: &[f32]) {
        let callback = self.0.lock().callback.clone();
        if let Some(callback) = callback {
            callback(chunk);
        }
    }

    /// Report a failure of the running stream, as a backend would.
    pub fn fail(&self, error: CaptureError) {
        let callback = self.0.lock().error_callback.clone();
        if let Some(callback) = callback {
            callback(error);
        }
    }

    pub fn requests(&self) -> u32 {
        self.0.lock().requests
    }

    pub fn releases(&self) -> u32 {
        self.0.lock().releases
    }
}

/// Provider that replays scripted chunks on demand.
pub struct ScriptedInput {
    rate: u32,
    device_name: Option<String>,
    buffer_size: Option<u32>,
    preroll: Vec<Vec<f32>>,
    failure: Option<CaptureError>,
    handle: ScriptHandle,
}

impl ScriptedInput {
    pub fn new(rate: u32) -> (Self, ScriptHandle) {
        let handle = ScriptHandle::default();
        let input = Self {
            rate,
            device_name: None,
            buffer_size: None,
            preroll: Vec::new(),
            failure: None,
            handle: handle.clone(),
        };
        (input, handle)
    }

    pub fn failing(error: CaptureError) -> (Self, ScriptHandle) {
        let (mut input, handle) = Self::new(48000);
        input.failure = Some(error);
        (input, handle)
    }

    /// Chunks delivered while the stream is still being acquired.
    pub fn with_preroll(mut self, chunks: Vec<Vec<f32>>) -> Self {
        self.preroll = chunks;
        self
    }

    pub fn buffer_size(&self) -> Option<u32> {
        self.buffer_size
    }
}

impl AudioInputProvider for ScriptedInput {
    fn apply_configuration(&mut self, config: &CaptureConfiguration) -> Result<(), CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        self.device_name = config.device_name.clone();
        self.buffer_size = Some(config.buffer_size);
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.failure.is_none()
    }

    fn request_stream(
        &mut self,
        on_chunk: ChunkCallback,
        on_error: StreamErrorCallback,
    ) -> Result<u32, CaptureError> {
        self.handle.0.lock().requests += 1;
        if let Some(ref error) = self.failure {
            return Err(error.clone());
        }
        for chunk in &self.preroll {
            on_chunk(chunk.as_slice());
        }
        let mut state = self.handle.0.lock();
        state.callback = Some(on_chunk);
        state.error_callback = Some(on_error);
        Ok(self.rate)
    }

    fn release(&mut self) -> Result<(), CaptureError> {
        self.handle.0.lock().releases += 1;
        Ok(())
    }

    fn device_info(&self) -> InputDevice {
        match self.device_name {
            Some(ref name) => InputDevice {
                id: name.clone(),
                name: name.clone(),
                is_default: false,
            },
            None => InputDevice {
                id: "scripted".into(),
                name: "Scripted Input".into(),
                is_default: true,
            },
        }
    }
}

/// Provider that emits a sample ramp (0, 1, 2, ...) from its own thread
/// until released.
pub struct RampInput {
    rate: u32,
    chunk_len: usize,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RampInput {
    pub fn new(rate: u32, chunk_len: usize) -> Self {
        Self {
            rate,
            chunk_len,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }
}

impl AudioInputProvider for RampInput {
    fn apply_configuration(&mut self, _config: &CaptureConfiguration) -> Result<(), CaptureError> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn request_stream(
        &mut self,
        on_chunk: ChunkCallback,
        _on_error: StreamErrorCallback,
    ) -> Result<u32, CaptureError> {
        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let chunk_len = self.chunk_len;

        let handle = thread::Builder::new()
            .name("ramp-input".into())
            .spawn(move || {
                let mut next = 0usize;
                while running.load(Ordering::SeqCst) {
                    let chunk: Vec<f32> = (next..next + chunk_len).map(|v| v as f32).collect();
                    on_chunk(chunk.as_slice());
                    next += chunk_len;
                    thread::sleep(Duration::from_micros(200));
                }
            })
            .map_err(|e| CaptureError::StreamFailed(e.to_string()))?;

        self.handle = Some(handle);
        Ok(self.rate)
    }

    fn release(&mut self) -> Result<(), CaptureError> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        Ok(())
    }

    fn device_info(&self) -> InputDevice {
        InputDevice {
            id: "ramp".into(),
            name: "Ramp Input".into(),
            is_default: false,
        }
    }
}

/// Delegate that records every notification as a short string.
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }
}

impl CaptureDelegate for EventLog {
    fn on_state_changed(&self, state: CaptureState) {
        self.events.lock().push(format!("state:{}", state.as_str()));
    }

    fn on_error(&self, error: &CaptureError) {
        self.events.lock().push(format!("error:{}", error));
    }

    fn on_recording_finished(&self, recording: &Recording) {
        self.events
            .lock()
            .push(format!("finished:{}", recording.sample_count()));
    }
}

/// Sink that keeps delivered artifacts in memory, or rejects them.
#[derive(Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<EncodedArtifact>>,
    reject: bool,
}

impl MemorySink {
    pub fn rejecting() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    pub fn delivered(&self) -> Vec<EncodedArtifact> {
        self.delivered.lock().clone()
    }
}

impl ArtifactSink for MemorySink {
    fn deliver(&self, artifact: &EncodedArtifact) -> Result<(), CaptureError> {
        if self.reject {
            return Err(CaptureError::DeliveryFailed("upload rejected".into()));
        }
        self.delivered.lock().push(artifact.clone());
        Ok(())
    }
}
