//! Speech recognition and translation
//!
//! The recognition model and the translation backend are opaque services
//! behind async traits; this module owns the job lifecycle around them:
//! spawn-per-attempt workers, advisory cancellation, blank-segment
//! filtering, and per-segment translation with swallowed failures.

pub mod job;
pub mod service;

pub use job::{run_recognition, JobHandle, JobState};
pub use service::{
    RawSegment, RecognitionError, RecognitionOptions, RecognitionService, TranslationError,
    TranslationService,
};
