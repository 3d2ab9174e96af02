use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The model is not loaded or cannot be loaded; disables transcription
    /// until the host recovers, never crashes the process.
    #[error("recognition model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("failed to decode audio for recognition: {0}")]
    Decode(String),
    #[error("recognition failed: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
#[error("translation failed: {0}")]
pub struct TranslationError(pub String);

/// One raw timed utterance as produced by the recognition model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSegment {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// Options passed through to the recognition model
#[derive(Debug, Clone)]
pub struct RecognitionOptions {
    /// Spoken language hint (e.g. "ja")
    pub language: String,
    /// Request per-word timing so segment boundaries are tight
    pub word_timestamps: bool,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            language: "ja".to_string(),
            word_timestamps: true,
        }
    }
}

/// Speech-to-text seam
///
/// The call may block for seconds to minutes and is not preemptible; it is
/// always run on its own task, never under the engine lock.
#[async_trait::async_trait]
pub trait RecognitionService: Send + Sync {
    async fn transcribe(
        &self,
        audio_path: &Path,
        options: &RecognitionOptions,
    ) -> Result<Vec<RawSegment>, RecognitionError>;
}

/// Text-to-text translation seam, called once per recognized segment
#[async_trait::async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, TranslationError>;
}
