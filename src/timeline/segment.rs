use serde::{Deserialize, Serialize};

/// A single recognized utterance on the transcript timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Start of the utterance, seconds from the beginning of the audio
    pub start_sec: f64,

    /// End of the utterance, seconds from the beginning of the audio
    pub end_sec: f64,

    /// Recognized text
    pub text: String,

    /// Translated text, if the translation call for this segment succeeded
    pub translation: Option<String>,
}

impl Segment {
    pub fn new(start_sec: f64, end_sec: f64, text: impl Into<String>) -> Self {
        Self {
            start_sec,
            end_sec,
            text: text.into(),
            translation: None,
        }
    }

    /// Whether `time_sec` falls inside this segment.
    ///
    /// Both bounds are inclusive; at a boundary shared by two adjacent
    /// segments, the store's in-order scan makes the earlier one win.
    pub fn contains(&self, time_sec: f64) -> bool {
        self.start_sec <= time_sec && time_sec <= self.end_sec
    }

    /// Offset of the segment start in milliseconds, for seeking playback.
    pub fn start_ms(&self) -> i64 {
        (self.start_sec * 1000.0) as i64
    }

    /// List-row label: `"text (start - end)"` with two-decimal times.
    pub fn display_label(&self) -> String {
        format!("{} ({:.2} - {:.2})", self.text, self.start_sec, self.end_sec)
    }
}
