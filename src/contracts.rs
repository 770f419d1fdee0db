//! Runtime contracts for the invariants this crate depends on.
//!
//! These are `debug_assert!`-based checks, zero-cost in release builds.
//! They exist to fail loudly and close to the source the moment a loaded
//! artifact or a computed index violates one of the properties this crate
//! is built on, rather than surfacing as a confusing downstream panic or
//! silent wrong answer.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! Each function here verifies one property named in `spec.md` §8.

use std::collections::{HashMap, HashSet};

use crate::types::{NodeMap, Span};

/// `orderedSpans[spans[i].order].id == spans[i].id` for every span.
#[inline]
pub fn check_order_bijection(spans_by_id: &HashMap<String, Span>, ordered_spans: &[Span]) {
    debug_assert!(
        spans_by_id.len() == ordered_spans.len(),
        "spansById and orderedSpans must have the same cardinality"
    );
    debug_assert!(
        ordered_spans
            .iter()
            .enumerate()
            .all(|(i, s)| s.order == i),
        "orderedSpans must be sorted by order, dense from 0"
    );
}

/// Every id in every section's `paragraph_ids` resolves in `spans_by_id`,
/// the union over all sections covers exactly the span id set, and no span
/// id appears under more than one section.
#[inline]
pub fn check_node_map_coverage(node_map: &NodeMap, spans_by_id: &HashMap<String, Span>) {
    let mut seen: HashSet<&str> = HashSet::new();
    for section in node_map.sections.values() {
        for id in &section.paragraph_ids {
            debug_assert!(
                spans_by_id.contains_key(id),
                "node map references unknown span id {id}"
            );
            debug_assert!(
                seen.insert(id.as_str()),
                "span id {id} appears in more than one section"
            );
        }
    }
    debug_assert!(
        seen.len() == spans_by_id.len(),
        "node map paragraphIds must cover every span exactly once"
    );
}

/// `documentFrequency(t) == |{span : t in tokenize(span.text)}|` for a given
/// token, checked against a freshly computed reference count. Only called
/// in tests and debug builds; O(N) per call.
#[inline]
pub fn check_document_frequency(token: &str, claimed_df: usize, spans: &[Span]) {
    debug_assert!(
        {
            let actual = spans
                .iter()
                .filter(|s| crate::tokenizer::tokenize(&s.text).iter().any(|t| t == token))
                .count();
            actual == claimed_df
        },
        "documentFrequency({token}) disagrees with a fresh tokenization count"
    );
}

/// `p10 <= p50 <= p90` for a build report's length statistics.
#[inline]
pub fn check_percentile_order(p10: usize, p50: usize, p90: usize) {
    debug_assert!(p10 <= p50 && p50 <= p90, "percentiles must be non-decreasing");
}

/// No two packs in a retrieval result share a pack id.
#[inline]
pub fn check_unique_pack_ids(ids: &[&str]) {
    debug_assert!(
        {
            let unique: HashSet<&&str> = ids.iter().collect();
            unique.len() == ids.len()
        },
        "merge-dedupe must leave no duplicate pack ids"
    );
}

/// The running character-count budget across returned packs never exceeds
/// `max_tokens`, when one was supplied.
#[inline]
pub fn check_budget(total_chars: usize, max_tokens: Option<usize>) {
    if let Some(max) = max_tokens {
        debug_assert!(total_chars <= max, "pack budget exceeded: {total_chars} > {max}");
    }
}
