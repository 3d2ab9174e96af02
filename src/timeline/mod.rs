//! Segment timeline
//!
//! This module owns the ordered, time-stamped transcript timeline:
//! - `Segment`: one recognized utterance with start/end times
//! - `SegmentStore`: the ordered sequence, replaced wholesale after each
//!   recognition run and queried for the segment active at a given time

mod segment;
mod store;

pub use segment::Segment;
pub use store::SegmentStore;
