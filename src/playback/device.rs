use crate::audio::AudioBuffer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("device rejected audio buffer: {0}")]
    Rejected(String),
    #[error("audio device busy: {0}")]
    DeviceBusy(String),
}

/// One live output stream on the device.
///
/// `stop()` must be safe to call more than once; `is_playing` turns false
/// once the buffer has drained naturally.
pub trait PlaybackHandle: Send {
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// Audio output seam
///
/// Device calls are expected to return quickly (bounded device-call
/// latency), so the trait is synchronous and safe to invoke under the
/// engine's state lock. Hardware backends live outside this crate.
pub trait PlaybackDevice: Send + Sync {
    fn play(&self, buffer: &AudioBuffer) -> Result<Box<dyn PlaybackHandle>, PlaybackError>;
}
