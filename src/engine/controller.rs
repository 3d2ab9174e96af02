use super::events::EngineEvent;
use super::state::EngineState;
use super::sync;
use crate::audio::{AudioBuffer, AudioDecoder};
use crate::config::Config;
use crate::error::EngineError;
use crate::playback::{PlaybackDevice, PlaybackSession};
use crate::recognition::{
    run_recognition, JobHandle, JobState, RecognitionError, RecognitionOptions,
    RecognitionService, TranslationService,
};
use crate::timeline::{Segment, SegmentStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Mutable engine state, all behind one lock
///
/// Every public operation and every async completion (recognition results,
/// sync ticks) mutates state through this struct while holding the lock,
/// so no two transitions can race.
pub(super) struct Inner {
    pub(super) state: EngineState,
    pub(super) audio: Option<AudioBuffer>,
    pub(super) audio_path: Option<PathBuf>,
    pub(super) store: SegmentStore,
    pub(super) playback: Option<PlaybackSession>,
    /// Bumped on every `play`; a sync clock that observes a different
    /// generation is stale and exits without emitting
    pub(super) playback_generation: u64,
    pub(super) job: Option<JobHandle>,
    /// Bumped on every `transcribe`; only the current generation's
    /// completion is applied
    pub(super) job_generation: u64,
    pub(super) last_segment_index: Option<usize>,
    /// Latched when the model reports itself unavailable; cleared by the
    /// next successful load
    pub(super) model_unavailable: Option<String>,
    pub(super) loaded_at: Option<DateTime<Utc>>,
    pub(super) transcribed_at: Option<DateTime<Utc>>,
}

impl Inner {
    fn new() -> Self {
        Self {
            state: EngineState::Idle,
            audio: None,
            audio_path: None,
            store: SegmentStore::new(),
            playback: None,
            playback_generation: 0,
            job: None,
            job_generation: 0,
            last_segment_index: None,
            model_unavailable: None,
            loaded_at: None,
            transcribed_at: None,
        }
    }

    fn job_running(&self) -> bool {
        self.job.as_ref().is_some_and(|j| j.is_running())
    }

    /// State to settle into when playback ends: `Ready` with a transcript,
    /// `Loaded` without one.
    pub(super) fn rest_state(&self) -> EngineState {
        if self.store.is_empty() {
            EngineState::Loaded
        } else {
            EngineState::Ready
        }
    }

    pub(super) fn transition(
        &mut self,
        state: EngineState,
        events: &mpsc::UnboundedSender<EngineEvent>,
    ) {
        if self.state != state {
            info!("Engine state: {:?} -> {:?}", self.state, state);
            self.state = state;
            let _ = events.send(EngineEvent::StatusChanged { state });
        }
    }
}

/// Snapshot of the engine for status displays
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub state: EngineState,
    pub audio_path: Option<String>,
    pub audio_duration_secs: Option<f64>,
    pub segment_count: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub transcribed_at: Option<DateTime<Utc>>,
}

/// The transcription–playback synchronization engine
///
/// Sole surface the host calls into. Owns the segment timeline, at most
/// one recognition job and at most one playback session, and emits
/// `EngineEvent`s on the channel handed out at construction.
pub struct Engine {
    inner: Arc<Mutex<Inner>>,
    events: mpsc::UnboundedSender<EngineEvent>,
    decoder: Arc<dyn AudioDecoder>,
    device: Arc<dyn PlaybackDevice>,
    recognizer: Arc<dyn RecognitionService>,
    translator: Arc<dyn TranslationService>,
    options: RecognitionOptions,
    translate_to: String,
    sync_tick: Duration,
}

impl Engine {
    /// Create an engine wired to its collaborators.
    ///
    /// Returns the engine and the receiving end of its event stream.
    pub fn new(
        decoder: Arc<dyn AudioDecoder>,
        device: Arc<dyn PlaybackDevice>,
        recognizer: Arc<dyn RecognitionService>,
        translator: Arc<dyn TranslationService>,
        config: &Config,
    ) -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();

        let engine = Self {
            inner: Arc::new(Mutex::new(Inner::new())),
            events,
            decoder,
            device,
            recognizer,
            translator,
            options: RecognitionOptions {
                language: config.recognition.language.clone(),
                word_timestamps: config.recognition.word_timestamps,
            },
            translate_to: config.recognition.translate_to.clone(),
            sync_tick: Duration::from_millis(config.engine.sync_tick_ms),
        };

        (engine, events_rx)
    }

    /// Load (decode) an audio file, replacing any previously loaded one.
    ///
    /// Rejected while a recognition job is running; a decode failure
    /// leaves the previous audio and state untouched.
    pub async fn load_audio(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let path = path.as_ref();
        let mut inner = self.inner.lock().await;

        if inner.job_running() {
            return Err(self.report(EngineError::JobAlreadyRunning));
        }

        let audio = match self.decoder.load(path) {
            Ok(audio) => audio,
            Err(e) => return Err(self.report(e.into())),
        };

        self.stop_locked(&mut inner);

        info!("Loaded audio: {}", audio.path);
        inner.audio = Some(audio);
        inner.audio_path = Some(path.to_path_buf());
        inner.loaded_at = Some(Utc::now());
        inner.model_unavailable = None;
        inner.last_segment_index = None;
        inner.transition(EngineState::Loaded, &self.events);

        Ok(())
    }

    /// Start a background recognition job over the loaded audio.
    ///
    /// Returns the job id immediately; completion arrives as a
    /// `SegmentsReady` (or `Error`) event. A second call while a job is
    /// running is rejected, not queued.
    pub async fn transcribe(&self) -> Result<Uuid, EngineError> {
        let mut inner = self.inner.lock().await;

        if let Some(message) = &inner.model_unavailable {
            return Err(self.report(EngineError::ModelUnavailable(message.clone())));
        }
        if inner.job_running() {
            return Err(self.report(EngineError::JobAlreadyRunning));
        }
        let Some(audio_path) = inner.audio_path.clone() else {
            return Err(self.report(EngineError::NotReady("no audio loaded")));
        };

        // Recognition and playback never overlap: tear down any live
        // session (and with it the sync clock) before entering
        // Transcribing, the same way play tears down a prior session.
        self.stop_locked(&mut inner);

        let handle = JobHandle::new();
        handle.set_state(JobState::Running);
        inner.job = Some(handle.clone());
        inner.job_generation += 1;
        let generation = inner.job_generation;
        inner.transition(EngineState::Transcribing, &self.events);
        drop(inner);

        info!("Recognition job {} started", handle.id());

        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        let recognizer = Arc::clone(&self.recognizer);
        let translator = Arc::clone(&self.translator);
        let options = self.options.clone();
        let translate_to = self.translate_to.clone();
        let job = handle.clone();

        // The recognition call holds no engine lock; the lock is taken
        // only to apply the completion.
        tokio::spawn(async move {
            let result = run_recognition(
                recognizer.as_ref(),
                translator.as_ref(),
                &audio_path,
                &options,
                &translate_to,
            )
            .await;

            let mut inner = inner.lock().await;

            if job.is_cancelled() || inner.job_generation != generation {
                info!("Recognition job {} finished after cancellation; result dropped", job.id());
                return;
            }

            match result {
                Ok(segments) => {
                    job.set_state(JobState::Completed);
                    inner.store.replace(segments.clone());
                    inner.transcribed_at = Some(Utc::now());
                    inner.transition(EngineState::Ready, &events);
                    let _ = events.send(EngineEvent::SegmentsReady { segments });
                }
                Err(e) => {
                    job.set_state(JobState::Failed);
                    error!("Recognition job {} failed: {}", job.id(), e);
                    let err = match e {
                        RecognitionError::ModelUnavailable(msg) => {
                            inner.model_unavailable = Some(msg.clone());
                            EngineError::ModelUnavailable(msg)
                        }
                        other => EngineError::from(other),
                    };
                    let _ = events.send(EngineEvent::Error {
                        kind: err.kind().to_string(),
                        message: err.to_string(),
                    });
                    // Prior segments, if any, are retained for display.
                    inner.transition(EngineState::Loaded, &events);
                }
            }
        });

        Ok(handle.id())
    }

    /// Cancel the in-flight recognition job, if any.
    ///
    /// Advisory: the model call is not preemptible, so the work may finish
    /// in the background; its result is dropped unobserved.
    pub async fn cancel_transcription(&self) {
        let mut inner = self.inner.lock().await;
        self.cancel_job_locked(&mut inner);
    }

    /// Start playback from `offset_ms` on the loaded audio.
    ///
    /// Any live session is torn down first, so two rapid calls can never
    /// leave two handles playing over each other.
    pub async fn play(&self, offset_ms: i64) -> Result<(), EngineError> {
        let mut inner = self.inner.lock().await;
        self.play_locked(&mut inner, offset_ms)
    }

    /// Stop playback. A no-op when nothing is playing.
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;
        self.stop_locked(&mut inner);
    }

    /// Seek playback to the start of segment `index`.
    ///
    /// Selection always seeks (stop, then play from the segment start),
    /// never toggles.
    pub async fn select_segment(&self, index: usize) -> Result<(), EngineError> {
        let mut inner = self.inner.lock().await;

        let Some(segment) = inner.store.get(index).cloned() else {
            return Err(self.report(EngineError::InvalidSelection(index)));
        };

        info!("Selected segment {}: {}", index, segment.display_label());
        self.stop_locked(&mut inner);
        self.play_locked(&mut inner, segment.start_ms())
    }

    /// Tear everything down: cancel any recognition job, stop playback,
    /// halt the sync clock.
    pub async fn shutdown(&self) {
        info!("Engine shutting down");
        let mut inner = self.inner.lock().await;
        self.cancel_job_locked(&mut inner);
        self.stop_locked(&mut inner);
    }

    pub async fn state(&self) -> EngineState {
        self.inner.lock().await.state
    }

    /// Current timeline, for hosts that render the full list.
    pub async fn segments(&self) -> Vec<Segment> {
        self.inner.lock().await.store.segments().to_vec()
    }

    pub async fn stats(&self) -> EngineStats {
        let inner = self.inner.lock().await;
        EngineStats {
            state: inner.state,
            audio_path: inner.audio_path.as_ref().map(|p| p.display().to_string()),
            audio_duration_secs: inner.audio.as_ref().map(|a| a.duration_seconds),
            segment_count: inner.store.len(),
            loaded_at: inner.loaded_at,
            transcribed_at: inner.transcribed_at,
        }
    }

    fn play_locked(&self, inner: &mut Inner, offset_ms: i64) -> Result<(), EngineError> {
        if inner.state == EngineState::Transcribing {
            return Err(self.report(EngineError::NotReady("transcription in progress")));
        }

        // Stop-before-play: at most one live handle, always.
        if let Some(mut session) = inner.playback.take() {
            session.stop();
        }

        let Some(audio) = inner.audio.as_ref() else {
            return Err(self.report(EngineError::NotReady("no audio loaded")));
        };

        let session = match PlaybackSession::start(audio, offset_ms, self.device.as_ref()) {
            Ok(session) => session,
            Err(e) => {
                let rest = inner.rest_state();
                inner.transition(rest, &self.events);
                return Err(self.report(e.into()));
            }
        };

        inner.playback = Some(session);
        inner.playback_generation += 1;
        inner.last_segment_index = None;
        inner.transition(EngineState::Playing, &self.events);

        // The clock task is detached on purpose: it exits on its own when
        // the session goes away or its generation is superseded.
        let _ = sync::spawn_clock(
            Arc::clone(&self.inner),
            self.events.clone(),
            self.sync_tick,
            inner.playback_generation,
        );

        Ok(())
    }

    /// Cancel a running job and settle the state the dropped completion
    /// would otherwise never leave.
    fn cancel_job_locked(&self, inner: &mut Inner) {
        if let Some(job) = inner.job.clone() {
            if job.is_running() {
                job.cancel();
                if inner.state == EngineState::Transcribing {
                    let rest = inner.rest_state();
                    inner.transition(rest, &self.events);
                }
            }
        }
    }

    fn stop_locked(&self, inner: &mut Inner) {
        if let Some(mut session) = inner.playback.take() {
            session.stop();
        }
        if inner.state == EngineState::Playing {
            let rest = inner.rest_state();
            inner.transition(rest, &self.events);
        }
    }

    /// Log a failure and mirror it onto the event stream before returning
    /// it to the caller.
    fn report(&self, err: EngineError) -> EngineError {
        warn!("{}", err);
        let _ = self.events.send(EngineEvent::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
        });
        err
    }
}
