//! Scenarios 1 and 2: case-insensitive single-token search and AND
//! intersection across multiple tokens.

use super::common::build_sample_reader;
use spanread::types::SearchOptions;

fn ids(reader: &mut spanread::reader::Reader, query: &str) -> Vec<String> {
    reader
        .search(query, &SearchOptions::default())
        .unwrap()
        .into_iter()
        .map(|r| r.span_id)
        .collect()
}

#[test]
fn search_section_is_case_insensitive_and_order_preserving() {
    let (mut reader, _guard) = build_sample_reader();

    let lower = ids(&mut reader, "section");
    let upper = ids(&mut reader, "SECTION");
    let mixed = ids(&mut reader, "SeCtiOn");

    assert!(!lower.is_empty());
    assert_eq!(lower, upper);
    assert_eq!(lower, mixed);

    let mut ascending = lower.clone();
    ascending.sort_by_key(|id| id.clone());
    // span ids are zero-padded, so lexicographic order matches ascending order.
    assert_eq!(lower, ascending);
}

#[test]
fn search_two_tokens_requires_both() {
    let (mut reader, _guard) = build_sample_reader();

    let both = ids(&mut reader, "section two");
    let section_only = ids(&mut reader, "section");
    let two_only = ids(&mut reader, "two");

    assert!(!both.is_empty());
    for id in &both {
        assert!(section_only.contains(id));
        assert!(two_only.contains(id));
    }

    assert!(section_only.len() > both.len(), "dropping 'two' should expand the result set");
    assert!(two_only.len() > both.len(), "dropping 'section' should expand the result set");
}
