//! Invariants: the order/id bijection and node-map paragraph coverage.

use std::collections::HashSet;

use super::common::build_sample_reader;

#[test]
fn ordered_spans_round_trip_through_order() {
    let (reader, _guard) = build_sample_reader();
    for order in 0..reader.span_count() {
        let span = reader.span_by_order(order).unwrap();
        assert_eq!(span.order, order);
        assert_eq!(reader.span(&span.id).unwrap().id, span.id);
    }
}

#[test]
fn every_section_paragraph_id_resolves_to_a_span() {
    let (reader, _guard) = build_sample_reader();
    let node_map = reader.node_map().expect("sample corpus has a node map");
    for section in node_map.sections.values() {
        for id in &section.paragraph_ids {
            assert!(reader.span(id).is_some(), "{id} referenced by a section but missing from spansById");
        }
    }
}

#[test]
fn section_paragraph_ids_partition_the_corpus_with_no_duplicates() {
    let (reader, _guard) = build_sample_reader();
    let node_map = reader.node_map().expect("sample corpus has a node map");

    let mut seen = HashSet::new();
    let mut total = 0;
    for section in node_map.sections.values() {
        for id in &section.paragraph_ids {
            assert!(seen.insert(id.clone()), "{id} appears in more than one section");
            total += 1;
        }
    }

    assert_eq!(total, reader.span_count());
    let all_ids: HashSet<String> = (0..reader.span_count())
        .map(|order| reader.span_by_order(order).unwrap().id.clone())
        .collect();
    assert_eq!(seen, all_ids);
}
