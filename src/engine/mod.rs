//! Transcription–playback synchronization engine
//!
//! This module provides the `Engine` controller that:
//! - Loads audio through the decoder seam
//! - Runs cancellable background recognition jobs
//! - Drives playback sessions from arbitrary timeline offsets
//! - Maps elapsed playback time to the active transcript segment
//! - Reports everything to the host over an event channel

mod controller;
mod events;
mod state;
mod sync;

pub use controller::{Engine, EngineStats};
pub use events::EngineEvent;
pub use state::EngineState;
