use super::segment::Segment;
use tracing::info;

/// Ordered timeline of recognized segments
///
/// The store is created empty and replaced wholesale when a recognition
/// job completes; readers never observe a partially updated timeline.
/// Segment order is the recognition output order (non-decreasing starts),
/// never re-sorted here.
#[derive(Debug, Default)]
pub struct SegmentStore {
    segments: Vec<Segment>,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole timeline in one swap.
    ///
    /// Blank-text segments are expected to have been dropped before
    /// insertion; this is the only mutation the store supports.
    pub fn replace(&mut self, segments: Vec<Segment>) {
        info!("Timeline replaced: {} segments", segments.len());
        self.segments = segments;
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Index of the segment being spoken at `time_sec`, if any.
    ///
    /// Linear scan in timeline order, stopping at the first segment whose
    /// inclusive `[start, end]` range contains the time; when two adjacent
    /// segments share a boundary instant the earlier one wins.
    pub fn find_active(&self, time_sec: f64) -> Option<usize> {
        self.segments.iter().position(|s| s.contains(time_sec))
    }
}
