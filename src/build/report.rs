//! Build-report quality metrics: length percentiles (nearest-rank),
//! short/long/duplicate-text warnings, and truncated samples.

use std::collections::HashSet;

use crate::types::{BuildReport, LengthStats, Provenance, Samples, Summary, Thresholds, Warnings};

/// Nearest-rank percentile: for `p` in `[0, 100]`, the value at rank
/// `ceil(p/100 * n)` (1-based), clamped into range.
fn nearest_rank(sorted: &[usize], percentile: f64) -> usize {
    if sorted.is_empty() {
        return 0;
    }
    let rank = (percentile / 100.0 * sorted.len() as f64).ceil() as usize;
    let index = rank.clamp(1, sorted.len()) - 1;
    sorted[index]
}

fn truncate_sample(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count <= 200 {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(200).collect();
        truncated.push('\u{2026}');
        truncated
    }
}

pub fn build_report(
    texts: &[&str],
    chapter_count: usize,
    section_count: usize,
    thresholds: Thresholds,
    manifest_id: &str,
    source_hash: &str,
) -> BuildReport {
    let lengths: Vec<usize> = texts.iter().map(|t| t.chars().count()).collect();
    let mut sorted_lengths = lengths.clone();
    sorted_lengths.sort_unstable();

    let min = sorted_lengths.first().copied().unwrap_or(0);
    let max = sorted_lengths.last().copied().unwrap_or(0);
    let length_stats = LengthStats {
        min,
        max,
        p10: nearest_rank(&sorted_lengths, 10.0),
        p50: nearest_rank(&sorted_lengths, 50.0),
        p90: nearest_rank(&sorted_lengths, 90.0),
    };

    let short_spans = lengths.iter().filter(|&&l| l < thresholds.short_span_chars).count();
    let long_spans = lengths.iter().filter(|&&l| l > thresholds.long_span_chars).count();

    let mut seen_texts: HashSet<&str> = HashSet::new();
    let mut duplicate_text_spans = 0;
    for text in texts {
        if !seen_texts.insert(*text) {
            duplicate_text_spans += 1;
        }
    }

    let total_chars: usize = lengths.iter().sum();
    let multi_line_spans = texts.iter().filter(|t| t.contains('\n')).count();

    let summary = Summary {
        span_count: texts.len(),
        chapter_count,
        section_count,
        total_chars,
        average_chars: if texts.is_empty() { 0.0 } else { total_chars as f64 / texts.len() as f64 },
        multi_line_spans,
    };

    let shortest = texts.iter().min_by_key(|t| t.chars().count()).map(|t| truncate_sample(t)).unwrap_or_default();
    let longest = texts.iter().max_by_key(|t| t.chars().count()).map(|t| truncate_sample(t)).unwrap_or_default();

    crate::contracts::check_percentile_order(length_stats.p10, length_stats.p50, length_stats.p90);

    BuildReport {
        summary,
        length_stats,
        thresholds,
        warnings: Warnings { short_spans, long_spans, duplicate_text_spans },
        samples: Samples { shortest, longest },
        provenance: Provenance { manifest_id: manifest_id.to_string(), source_hash: source_hash.to_string() },
    }
}
