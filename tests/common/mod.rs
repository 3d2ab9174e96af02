// Shared mocks and fixtures for the integration tests.
//
// The engine's collaborators (recognition model, translation backend,
// audio output device) are opaque services behind traits; these mocks
// stand in for them and expose counters so tests can observe handle
// lifetimes and call counts.
#![allow(dead_code)]

use kikitori::{
    AudioBuffer, EngineEvent, PlaybackDevice, PlaybackError, PlaybackHandle, RawSegment,
    RecognitionError, RecognitionOptions, RecognitionService, TranslationError,
    TranslationService,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Write a silent 16 kHz mono WAV of the given duration.
pub fn write_wav(dir: &Path, name: &str, duration_secs: f64) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).expect("create wav");
    for _ in 0..(16000.0 * duration_secs) as usize {
        writer.write_sample(0i16).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
    path
}

/// In-memory audio buffer for tests that bypass the decoder.
pub fn buffer(duration_secs: f64) -> AudioBuffer {
    let sample_rate = 16000u32;
    let samples = vec![0i16; (sample_rate as f64 * duration_secs) as usize];
    AudioBuffer {
        path: "test.wav".to_string(),
        channels: 1,
        bits_per_sample: 16,
        sample_rate,
        samples,
        duration_seconds: duration_secs,
    }
}

pub fn raw(text: &str, start: f64, end: f64) -> RawSegment {
    RawSegment {
        text: text.to_string(),
        start,
        end,
    }
}

/// Playback device that counts play calls and live handles.
#[derive(Default)]
pub struct MockDevice {
    pub plays: AtomicUsize,
    pub live: Arc<AtomicUsize>,
    pub reject: bool,
}

impl PlaybackDevice for MockDevice {
    fn play(&self, _buffer: &AudioBuffer) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        if self.reject {
            return Err(PlaybackError::Rejected("mock device rejects".to_string()));
        }
        self.plays.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockHandle {
            live: Arc::clone(&self.live),
            stopped: false,
        }))
    }
}

pub struct MockHandle {
    live: Arc<AtomicUsize>,
    stopped: bool,
}

impl PlaybackHandle for MockHandle {
    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn is_playing(&self) -> bool {
        !self.stopped
    }
}

/// Recognition service returning canned segments after an optional delay.
pub struct MockRecognizer {
    pub segments: Vec<RawSegment>,
    pub delay_ms: u64,
    pub error: Option<RecognitionError>,
    pub calls: Arc<AtomicUsize>,
}

impl MockRecognizer {
    pub fn with_segments(segments: Vec<RawSegment>) -> Self {
        Self {
            segments,
            delay_ms: 0,
            error: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(error: RecognitionError) -> Self {
        Self {
            segments: Vec::new(),
            delay_ms: 0,
            error: Some(error),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait::async_trait]
impl RecognitionService for MockRecognizer {
    async fn transcribe(
        &self,
        _audio_path: &Path,
        _options: &RecognitionOptions,
    ) -> Result<Vec<RawSegment>, RecognitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.error {
            Some(RecognitionError::ModelUnavailable(m)) => {
                Err(RecognitionError::ModelUnavailable(m.clone()))
            }
            Some(RecognitionError::Decode(m)) => Err(RecognitionError::Decode(m.clone())),
            Some(RecognitionError::Internal(m)) => Err(RecognitionError::Internal(m.clone())),
            None => Ok(self.segments.clone()),
        }
    }
}

/// Translator that prefixes the text, failing for one configured input.
pub struct MockTranslator {
    pub fail_on: Option<String>,
}

impl MockTranslator {
    pub fn ok() -> Self {
        Self { fail_on: None }
    }

    pub fn failing_on(text: &str) -> Self {
        Self {
            fail_on: Some(text.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl TranslationService for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _from: &str,
        to: &str,
    ) -> Result<String, TranslationError> {
        if self.fail_on.as_deref() == Some(text) {
            return Err(TranslationError("mock translation failure".to_string()));
        }
        Ok(format!("{}:{}", to, text))
    }
}

/// Receive events until one matches, with a timeout guard.
pub async fn next_matching(
    rx: &mut mpsc::UnboundedReceiver<EngineEvent>,
    mut pred: impl FnMut(&EngineEvent) -> bool,
) -> EngineEvent {
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            match rx.recv().await {
                Some(event) if pred(&event) => return event,
                Some(_) => continue,
                None => panic!("event channel closed"),
            }
        }
    })
    .await
    .expect("timed out waiting for engine event")
}

/// Drain whatever is already queued on the event channel.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push(event);
    }
    out
}
