//! Scenario 3: matching through Markdown emphasis and contractions.

use super::common::build_sample_reader;
use spanread::types::SearchOptions;

#[test]
fn search_bold_matches_emphasized_word() {
    let (mut reader, _guard) = build_sample_reader();
    let results = reader.search("bold", &SearchOptions::default()).unwrap();
    assert_eq!(results.len(), 1);
    let span = reader.span(&results[0].span_id).unwrap();
    assert!(span.text.contains("**bold**"));
}

#[test]
fn search_here_matches_contraction() {
    let (mut reader, _guard) = build_sample_reader();
    let results = reader.search("here", &SearchOptions::default()).unwrap();
    assert_eq!(results.len(), 1);
    let span = reader.span(&results[0].span_id).unwrap();
    assert!(span.text.contains("Here's"));
}
