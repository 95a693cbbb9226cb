pub mod chunk_log;
pub mod wav_format;
