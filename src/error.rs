use crate::audio::AudioLoadError;
use crate::playback::PlaybackError;
use crate::recognition::RecognitionError;
use thiserror::Error;

/// Everything the engine can report back to its host
///
/// Every variant maps to a rejected request or a recoverable failure;
/// none leaves the engine in an inconsistent state.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Operation needs audio (or a finished transcript) that is not there
    #[error("not ready: {0}")]
    NotReady(&'static str),

    #[error(transparent)]
    AudioLoad(#[from] AudioLoadError),

    /// A recognition job is already running; requests are rejected, not queued
    #[error("a recognition job is already running")]
    JobAlreadyRunning,

    /// Transcription capability is disabled until the model problem clears
    #[error("recognition model unavailable: {0}")]
    ModelUnavailable(String),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("segment index {0} out of range")]
    InvalidSelection(usize),
}

impl EngineError {
    /// Stable label for the host's error events.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::NotReady(_) => "not_ready",
            EngineError::AudioLoad(_) => "audio_load",
            EngineError::JobAlreadyRunning => "job_already_running",
            EngineError::ModelUnavailable(_) => "model_unavailable",
            EngineError::Recognition(_) => "recognition",
            EngineError::Playback(_) => "playback",
            EngineError::InvalidSelection(_) => "invalid_selection",
        }
    }
}
