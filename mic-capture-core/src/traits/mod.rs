pub mod artifact_sink;
pub mod audio_input;
pub mod capture_delegate;
pub mod capture_session;
