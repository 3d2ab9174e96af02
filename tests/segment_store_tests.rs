// Unit tests for the segment timeline.
//
// The active-segment lookup uses inclusive bounds with an in-order scan,
// so a boundary instant shared by two adjacent segments belongs to the
// earlier one.

use kikitori::{Segment, SegmentStore};

fn store_with(segments: Vec<(f64, f64, &str)>) -> SegmentStore {
    let mut store = SegmentStore::new();
    store.replace(
        segments
            .into_iter()
            .map(|(start, end, text)| Segment::new(start, end, text))
            .collect(),
    );
    store
}

#[test]
fn test_find_active_inside_segment() {
    let store = store_with(vec![(0.0, 2.0, "A"), (2.0, 4.0, "B")]);

    assert_eq!(store.find_active(1.0), Some(0));
    assert_eq!(store.find_active(2.5), Some(1));
}

#[test]
fn test_find_active_shared_boundary_goes_to_earlier_segment() {
    let store = store_with(vec![(0.0, 2.0, "A"), (2.0, 4.0, "B")]);

    // 2.0 is the end of A and the start of B; A wins.
    assert_eq!(store.find_active(2.0), Some(0));
}

#[test]
fn test_find_active_outside_all_segments() {
    let store = store_with(vec![(0.0, 2.0, "A"), (2.0, 4.0, "B")]);

    assert_eq!(store.find_active(5.0), None);
    assert_eq!(store.find_active(-1.0), None);
}

#[test]
fn test_find_active_in_gap_between_segments() {
    let store = store_with(vec![(0.0, 1.0, "A"), (3.0, 4.0, "B")]);

    assert_eq!(store.find_active(2.0), None);
    assert_eq!(store.find_active(3.0), Some(1));
}

#[test]
fn test_find_active_at_exact_edges() {
    let store = store_with(vec![(1.0, 2.0, "A")]);

    // Both bounds are inclusive.
    assert_eq!(store.find_active(1.0), Some(0));
    assert_eq!(store.find_active(2.0), Some(0));
    assert_eq!(store.find_active(0.999), None);
    assert_eq!(store.find_active(2.001), None);
}

#[test]
fn test_find_active_on_empty_store() {
    let store = SegmentStore::new();

    assert_eq!(store.len(), 0);
    assert!(store.is_empty());
    assert_eq!(store.find_active(0.0), None);
}

#[test]
fn test_replace_swaps_whole_timeline() {
    let mut store = SegmentStore::new();
    store.replace(vec![Segment::new(0.0, 1.0, "old")]);
    assert_eq!(store.len(), 1);

    store.replace(vec![Segment::new(0.0, 1.0, "new-a"), Segment::new(1.0, 2.0, "new-b")]);

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(0).map(|s| s.text.as_str()), Some("new-a"));
    assert_eq!(store.get(1).map(|s| s.text.as_str()), Some("new-b"));
}

#[test]
fn test_get_out_of_range() {
    let store = store_with(vec![(0.0, 2.0, "A")]);

    assert!(store.get(0).is_some());
    assert!(store.get(1).is_none());
}

#[test]
fn test_segment_display_label() {
    let segment = Segment::new(1.5, 3.25, "こんにちは");

    assert_eq!(segment.display_label(), "こんにちは (1.50 - 3.25)");
}

#[test]
fn test_segment_start_ms() {
    let segment = Segment::new(2.345, 4.0, "A");

    assert_eq!(segment.start_ms(), 2345);
}
