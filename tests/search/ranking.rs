//! Ranking modes: unranked results stay in corpus order, ranked results
//! sort by descending score with ties broken by ascending order.

use super::common::build_sample_reader;
use spanread::types::{FuzzyOptions, RankMode, SearchOptions};

#[test]
fn tfidf_rank_sorts_by_descending_score() {
    let (mut reader, _guard) = build_sample_reader();
    let options = SearchOptions { rank: RankMode::Tfidf, ..SearchOptions::default() };
    let results = reader.search("section", &options).unwrap();

    assert!(!results.is_empty());
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn hybrid_rank_produces_bounded_scores() {
    let (mut reader, _guard) = build_sample_reader();
    let options = SearchOptions { rank: RankMode::Hybrid, ..SearchOptions::default() };
    let results = reader.search("section", &options).unwrap();

    assert!(!results.is_empty());
    for result in &results {
        assert!(result.score.is_finite());
    }
}

#[test]
fn limit_truncates_results_after_ranking() {
    let (mut reader, _guard) = build_sample_reader();
    let options = SearchOptions { rank: RankMode::Tfidf, limit: Some(1), ..SearchOptions::default() };
    let results = reader.search("section", &options).unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn fuzzy_match_finds_one_edit_typo() {
    let (mut reader, _guard) = build_sample_reader();
    let fuzzy = FuzzyOptions { enabled: true, ..FuzzyOptions::default() };
    let options = SearchOptions { fuzzy: Some(fuzzy), ..SearchOptions::default() };

    let typo_results = reader.search("secton", &options).unwrap();
    let exact_results = reader.search("section", &SearchOptions::default()).unwrap();

    assert!(!typo_results.is_empty());
    let typo_ids: std::collections::HashSet<_> = typo_results.iter().map(|r| r.span_id.clone()).collect();
    let exact_ids: std::collections::HashSet<_> = exact_results.iter().map(|r| r.span_id.clone()).collect();
    assert_eq!(typo_ids, exact_ids);
}
