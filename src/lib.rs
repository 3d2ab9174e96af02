pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod playback;
pub mod recognition;
pub mod timeline;

pub use audio::{AudioBuffer, AudioDecoder, AudioLoadError, WavDecoder};
pub use config::{Config, EngineSettings, RecognitionSettings};
pub use engine::{Engine, EngineEvent, EngineState, EngineStats};
pub use error::EngineError;
pub use playback::{PlaybackDevice, PlaybackError, PlaybackHandle, PlaybackSession};
pub use recognition::{
    run_recognition, JobHandle, JobState, RawSegment, RecognitionError, RecognitionOptions,
    RecognitionService, TranslationError, TranslationService,
};
pub use timeline::{Segment, SegmentStore};
