use super::state::EngineState;
use crate::timeline::Segment;
use serde::Serialize;

/// Event stream from the engine to its host
///
/// Replaces UI-toolkit signal/slot wiring with a plain channel; the host
/// subscribes at engine construction and renders whatever arrives.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The coarse engine mode changed
    StatusChanged { state: EngineState },
    /// A recognition job completed; the full new timeline
    SegmentsReady { segments: Vec<Segment> },
    /// The currently-spoken segment changed during playback
    SegmentChanged { index: usize },
    /// Playback reached the end of the audio
    PlaybackEnded,
    /// A recoverable failure, already logged; `kind` is a stable label
    Error { kind: String, message: String },
}
