/// Append-only log of sample chunks for one capture.
///
/// Chunks are copied in on arrival because the caller's buffer is reused
/// once the delivery callback returns. `finalize` consumes the log, so no
/// chunk can be appended after the buffer has been produced.
#[derive(Debug, Default)]
pub struct ChunkLog {
    chunks: Vec<Vec<f32>>,
    total_samples: usize,
}

impl ChunkLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a delivered chunk onto the end of the log.
    pub fn append(&mut self, chunk: &[f32]) {
        self.total_samples += chunk.len();
        self.chunks.push(chunk.to_vec());
    }

    /// Number of chunks appended so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total samples across all chunks.
    pub fn sample_count(&self) -> usize {
        self.total_samples
    }

    pub fn is_empty(&self) -> bool {
        self.total_samples == 0
    }

    /// Concatenate every chunk in arrival order.
    pub fn finalize(self) -> Vec<f32> {
        let mut samples = Vec::with_capacity(self.total_samples);
        for chunk in self.chunks {
            samples.extend_from_slice(&chunk);
        }
        samples
    }
}
