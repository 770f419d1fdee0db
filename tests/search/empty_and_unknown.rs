//! Scenario 4: empty query and unknown-token query both yield no results.

use super::common::build_sample_reader;
use spanread::types::SearchOptions;

#[test]
fn empty_query_returns_no_results() {
    let (mut reader, _guard) = build_sample_reader();
    let results = reader.search("", &SearchOptions::default()).unwrap();
    assert!(results.is_empty());
}

#[test]
fn unknown_token_returns_no_results() {
    let (mut reader, _guard) = build_sample_reader();
    let results = reader.search("nonexistentxyz123", &SearchOptions::default()).unwrap();
    assert!(results.is_empty());
}
