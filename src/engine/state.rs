use serde::{Deserialize, Serialize};

/// Coarse engine mode, owned exclusively by the controller
///
/// `Idle → Loaded → Transcribing → Ready`, with a failure edge from
/// `Transcribing` back to `Loaded`. `Playing` is the playback sub-state
/// entered from `Loaded` or `Ready` and left on stop or natural end.
/// UI enablement is a pure function of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// No audio loaded
    Idle,
    /// Audio loaded, no finished transcript
    Loaded,
    /// A recognition job is running
    Transcribing,
    /// Transcript available, playback stopped
    Ready,
    /// A playback session is live
    Playing,
}
