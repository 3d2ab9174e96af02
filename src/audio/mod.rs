pub mod buffer;

pub use buffer::{AudioBuffer, AudioDecoder, AudioLoadError, WavDecoder};
