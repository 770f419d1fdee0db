//! Scenario 5: neighbor windows clip to the corpus bounds.

use super::common::build_sample_reader;

#[test]
fn neighbors_clip_at_start_of_corpus() {
    let (reader, _guard) = build_sample_reader();
    assert_eq!(reader.span_count(), 9);

    let window = reader.neighbors("span:000001", 5, 1);
    assert_eq!(window, vec!["span:000001".to_string(), "span:000002".to_string()]);
}

#[test]
fn neighbors_clip_at_end_of_corpus() {
    let (reader, _guard) = build_sample_reader();
    let window = reader.neighbors("span:000009", 1, 5);
    assert_eq!(window, vec!["span:000008".to_string(), "span:000009".to_string()]);
}

#[test]
fn neighbors_of_unknown_id_is_empty() {
    let (reader, _guard) = build_sample_reader();
    assert!(reader.neighbors("span:999999", 1, 1).is_empty());
}
