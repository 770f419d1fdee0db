//! Property: build-report length percentiles are non-decreasing.

use proptest::prelude::*;
use spanread::build;

fn paragraph_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,300}"
}

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(paragraph_strategy(), 1..30).prop_map(|paragraphs| paragraphs.join("\n\n"))
}

proptest! {
    #[test]
    fn percentiles_are_non_decreasing(paragraphs in document_strategy()) {
        let normalized = build::normalize::normalize(&paragraphs);
        let split = build::pipeline::split(&normalized, build::SourceFormat::Text, "corpus:test", "Property Doc");
        if split.spans.is_empty() {
            return Ok(());
        }
        let texts: Vec<&str> = split.spans.iter().map(|s| s.text.as_str()).collect();
        let report = build::report::build_report(
            &texts,
            split.node_map.chapters.len(),
            split.node_map.sections.len(),
            Default::default(),
            "corpus:test",
            "hash",
        );
        prop_assert!(report.length_stats.p10 <= report.length_stats.p50);
        prop_assert!(report.length_stats.p50 <= report.length_stats.p90);
    }
}
