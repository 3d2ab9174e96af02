use super::device::{PlaybackDevice, PlaybackError, PlaybackHandle};
use crate::audio::AudioBuffer;
use tokio::time::Instant;
use tracing::info;

/// The live state of one audio-output handle plus its timeline offset
///
/// At most one session exists at a time; the engine always tears down the
/// previous session before starting a new one. Elapsed time is derived
/// arithmetically from the start instant rather than polled from the
/// device, so the sync clock's accuracy is bounded by tick jitter only.
pub struct PlaybackSession {
    /// Timeline position playback began at
    offset_ms_at_start: i64,

    /// Monotonic instant playback began
    started_at: Instant,

    /// Total duration of the full audio, for end-of-buffer detection
    duration_ms: i64,

    /// Elapsed value frozen by `stop()`, shown briefly after natural end
    frozen_elapsed_ms: Option<i64>,

    /// Live device handle while playing
    handle: Option<Box<dyn PlaybackHandle>>,
}

impl PlaybackSession {
    /// Start playing `audio` from `offset_ms`.
    ///
    /// An offset past the end of the buffer is clamped, not rejected, so a
    /// seek to the tail of the last segment always succeeds.
    pub fn start(
        audio: &AudioBuffer,
        offset_ms: i64,
        device: &dyn PlaybackDevice,
    ) -> Result<Self, PlaybackError> {
        let duration_ms = audio.duration_ms();
        let offset_ms = offset_ms.clamp(0, duration_ms);

        let tail = audio.slice_from_ms(offset_ms);
        let handle = device.play(&tail)?;

        info!(
            "Playback started at {:.1}s of {:.1}s",
            offset_ms as f64 / 1000.0,
            duration_ms as f64 / 1000.0
        );

        Ok(Self {
            offset_ms_at_start: offset_ms,
            started_at: Instant::now(),
            duration_ms,
            frozen_elapsed_ms: None,
            handle: Some(handle),
        })
    }

    /// Stop playback and release the device handle.
    ///
    /// Idempotent: calling with no live handle is a no-op, never an error.
    pub fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            self.frozen_elapsed_ms = Some(self.elapsed_at(Instant::now()));
            handle.stop();
            info!("Playback stopped at {:.1}s", self.frozen_elapsed_ms.unwrap_or(0) as f64 / 1000.0);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.handle.is_some()
    }

    /// Timeline position in milliseconds at `now`.
    ///
    /// While playing this is `offset_ms_at_start + (now - started_at)`;
    /// once stopped it is the frozen value from the moment of the stop.
    pub fn elapsed_ms(&self, now: Instant) -> i64 {
        match self.frozen_elapsed_ms {
            Some(frozen) => frozen,
            None => self.elapsed_at(now),
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// Whether the arithmetic position has run past the end of the buffer.
    pub fn past_end(&self, now: Instant) -> bool {
        self.elapsed_ms(now) > self.duration_ms
    }

    fn elapsed_at(&self, now: Instant) -> i64 {
        self.offset_ms_at_start + now.saturating_duration_since(self.started_at).as_millis() as i64
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.stop();
    }
}
