//! WAV container encoding for mono 16-bit PCM.
//!
//! Produces a standard 44-byte RIFF header followed by little-endian
//! signed 16-bit samples. No resampling, no loudness normalization: the
//! rate passed in is the rate written.

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Media type declared for encoded recordings.
pub const WAV_MEDIA_TYPE: &str = "audio/wav";

pub const PCM16_BIT_DEPTH: u16 = 16;
pub const MONO_CHANNELS: u16 = 1;

/// Most samples a PCM16 WAV can describe: the RIFF size field holds
/// `36 + 2 * samples` in 32 bits.
pub const MAX_PCM16_SAMPLES: usize = ((u32::MAX - 36) / 2) as usize;

/// Scale applied to negative samples (0x8000).
const NEGATIVE_SCALE: f64 = 32768.0;
/// Scale applied to non-negative samples (0x7FFF).
const POSITIVE_SCALE: f64 = 32767.0;

/// Generate a 44-byte WAV RIFF header.
///
/// Format: PCM (format code 1), little-endian.
///
/// Layout:
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    file size - 8 (36 + data_size)
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (PCM format chunk size)
/// [20-21]  1 (PCM format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte_rate = sample_rate * channels * bit_depth / 8
/// [32-33]  block_align = channels * bit_depth / 8
/// [34-35]  bit_depth
/// [36-39]  "data"
/// [40-43]  data_size
/// ```
pub fn generate_wav_header(sample_rate: u32, bit_depth: u16, channels: u16, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let block_align = channels * bit_depth / 8;
    let byte_rate = sample_rate.saturating_mul(block_align as u32);
    let chunk_size = data_size.saturating_add(36);

    let mut header = [0u8; WAV_HEADER_SIZE];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt sub-chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes()); // PCM format size
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM format code
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&bit_depth.to_le_bytes());

    // data sub-chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}

/// Convert one float sample to signed 16-bit PCM.
///
/// Clamps to [-1.0, 1.0], then scales negatives by 32768 and non-negatives
/// by 32767, truncating toward zero. NaN maps to 0.
pub fn quantize_sample(sample: f32) -> i16 {
    let s = f64::from(sample.clamp(-1.0, 1.0));
    if s < 0.0 {
        (s * NEGATIVE_SCALE) as i16
    } else {
        (s * POSITIVE_SCALE) as i16
    }
}

/// Encode mono float samples as a complete PCM16 WAV file.
///
/// Output length is `44 + 2 * samples.len()`. Zero samples yield a bare
/// header with a zero-length data chunk. Input beyond `MAX_PCM16_SAMPLES`
/// (about 6.8 hours at 48 kHz) is truncated so the header always matches
/// the payload.
pub fn encode_wav_mono_pcm16(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let samples = &samples[..encodable_len(samples.len())];
    let payload_len = samples.len() * 2;
    // Fits: encodable_len bounds it by MAX_PCM16_SAMPLES.
    let data_size = payload_len as u32;

    let mut out = Vec::with_capacity(WAV_HEADER_SIZE + payload_len);
    out.extend_from_slice(&generate_wav_header(
        sample_rate,
        PCM16_BIT_DEPTH,
        MONO_CHANNELS,
        data_size,
    ));
    for &sample in samples {
        out.extend_from_slice(&quantize_sample(sample).to_le_bytes());
    }
    out
}

/// Number of leading samples that fit in a single WAV file.
fn encodable_len(sample_count: usize) -> usize {
    if sample_count > MAX_PCM16_SAMPLES {
        log::warn!(
            "Truncating {} samples to the {} a WAV file can hold",
            sample_count,
            MAX_PCM16_SAMPLES
        );
        return MAX_PCM16_SAMPLES;
    }
    sample_count
}
