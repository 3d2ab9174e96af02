use super::service::{
    RecognitionError, RecognitionOptions, RecognitionService, TranslationService,
};
use crate::timeline::Segment;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Lifecycle of one recognition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => JobState::Pending,
            1 => JobState::Running,
            2 => JobState::Completed,
            3 => JobState::Failed,
            _ => JobState::Cancelled,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            JobState::Pending => 0,
            JobState::Running => 1,
            JobState::Completed => 2,
            JobState::Failed => 3,
            JobState::Cancelled => 4,
        }
    }
}

/// Handle to one in-flight or finished recognition attempt
///
/// Cloned into the worker task; the engine keeps its own clone to cancel
/// and to check staleness. A fresh handle is created per attempt, never
/// reused across jobs.
#[derive(Clone)]
pub struct JobHandle {
    id: Uuid,
    state: Arc<AtomicU8>,
    cancelled: Arc<AtomicBool>,
}

impl JobHandle {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: Arc::new(AtomicU8::new(JobState::Pending.as_u8())),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> JobState {
        JobState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn set_state(&self, state: JobState) {
        self.state.store(state.as_u8(), Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state(), JobState::Pending | JobState::Running)
    }

    /// Advisory cancellation.
    ///
    /// The recognition call itself cannot be interrupted; the flag only
    /// suppresses delivery of a late completion, letting the underlying
    /// work finish unobserved.
    pub fn cancel(&self) {
        info!("Recognition job {} cancelled", self.id);
        self.cancelled.store(true, Ordering::SeqCst);
        self.set_state(JobState::Cancelled);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for JobHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker body of a recognition attempt.
///
/// Runs the recognition call, drops blank-text segments, then translates
/// each surviving segment. A failed translation leaves that one segment's
/// translation empty and never fails the batch.
pub async fn run_recognition(
    recognizer: &dyn RecognitionService,
    translator: &dyn TranslationService,
    audio_path: &Path,
    options: &RecognitionOptions,
    translate_to: &str,
) -> Result<Vec<Segment>, RecognitionError> {
    info!("Transcribing {}", audio_path.display());

    let raw = recognizer.transcribe(audio_path, options).await?;
    let total = raw.len();

    let mut segments = Vec::with_capacity(total);
    for entry in raw {
        if entry.text.trim().is_empty() {
            continue;
        }

        let mut segment = Segment::new(entry.start, entry.end, entry.text);

        match translator
            .translate(&segment.text, &options.language, translate_to)
            .await
        {
            Ok(translation) => segment.translation = Some(translation),
            Err(e) => {
                warn!(
                    "Translation failed for segment at {:.2}s: {}",
                    segment.start_sec, e
                );
            }
        }

        segments.push(segment);
    }

    info!(
        "Transcription done: {} segments ({} blank dropped)",
        segments.len(),
        total - segments.len()
    );

    Ok(segments)
}
