use crate::models::error::CaptureError;
use crate::models::recording::EncodedArtifact;

/// Destination for finished recordings, typically an upload client.
///
/// Receives one immutable artifact per completed recording; transport
/// details stay on the implementor's side.
pub trait ArtifactSink: Send + Sync {
    fn deliver(&self, artifact: &EncodedArtifact) -> Result<(), CaptureError>;
}
