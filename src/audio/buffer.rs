use hound::WavReader;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum AudioLoadError {
    #[error("failed to open audio file {path}: {message}")]
    Open { path: String, message: String },
    #[error("failed to decode audio samples from {path}: {message}")]
    Decode { path: String, message: String },
}

/// Decoded audio, fully resident in memory (i16 PCM, interleaved)
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Source path, kept for status messages
    pub path: String,
    /// Number of channels
    pub channels: u16,
    /// Sample width in bits
    pub bits_per_sample: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Total duration in seconds
    pub duration_seconds: f64,
}

impl AudioBuffer {
    pub fn duration_ms(&self) -> i64 {
        (self.duration_seconds * 1000.0) as i64
    }

    /// Tail of the buffer starting at `offset_ms`, clamped to the buffer end.
    ///
    /// Seeking past the end yields an empty buffer rather than an error, so
    /// a click on the last segment near end-of-file still behaves.
    pub fn slice_from_ms(&self, offset_ms: i64) -> AudioBuffer {
        let offset_ms = offset_ms.clamp(0, self.duration_ms());
        let frames_per_sec = self.sample_rate as i64;
        let start_frame = offset_ms * frames_per_sec / 1000;
        let start_sample = (start_frame * self.channels as i64) as usize;
        let start_sample = start_sample.min(self.samples.len());

        let samples = self.samples[start_sample..].to_vec();
        let duration_seconds =
            samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64);

        AudioBuffer {
            path: self.path.clone(),
            channels: self.channels,
            bits_per_sample: self.bits_per_sample,
            sample_rate: self.sample_rate,
            samples,
            duration_seconds,
        }
    }
}

/// Audio decoding seam
///
/// Format support is the decoder's problem; the engine only ever sees a
/// decoded `AudioBuffer`.
pub trait AudioDecoder: Send + Sync {
    fn load(&self, path: &Path) -> Result<AudioBuffer, AudioLoadError>;
}

/// WAV decoder backed by hound
pub struct WavDecoder;

impl AudioDecoder for WavDecoder {
    fn load(&self, path: &Path) -> Result<AudioBuffer, AudioLoadError> {
        info!("Opening audio file: {}", path.display());

        let reader = WavReader::open(path).map_err(|e| AudioLoadError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let spec = reader.spec();
        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AudioLoadError::Decode {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let duration_seconds =
            samples.len() as f64 / (spec.sample_rate as f64 * spec.channels as f64);

        info!(
            "Audio file loaded: {:.1}s, {}Hz, {} channels, {} samples",
            duration_seconds,
            spec.sample_rate,
            spec.channels,
            samples.len()
        );

        Ok(AudioBuffer {
            path: path.display().to_string(),
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            sample_rate: spec.sample_rate,
            samples,
            duration_seconds,
        })
    }
}
