//! Hybrid ranker: weighted fusion of lexical (C6) and semantic (C5) scores.
//!
//! Min-max normalization is applied to each score map independently before
//! fusion, in that order, to stay bit-reproducible across implementations
//! (`spec.md` §9).

use std::collections::HashMap;

use crate::embedding;
use crate::error::{ReaderError, Result};
use crate::lexical::LexicalIndex;
use crate::scoring::tfidf::TfidfRanker;
use crate::types::{HybridOptions, SearchResult};

/// Validate that hybrid weights are in `[0, 1]` and sum to at most 1.
pub fn validate_options(options: &HybridOptions) -> Result<()> {
    if options.weight_lexical < 0.0 || options.weight_semantic < 0.0 {
        return Err(ReaderError::invalid_argument("hybrid weights must not be negative"));
    }
    if options.weight_lexical + options.weight_semantic > 1.0 {
        return Err(ReaderError::invalid_argument(
            "weightLexical + weightSemantic must not exceed 1",
        ));
    }
    Ok(())
}

fn min_max_normalize(scores: &HashMap<String, f64>) -> HashMap<String, f64> {
    if scores.is_empty() {
        return HashMap::new();
    }
    let min = scores.values().cloned().fold(f64::INFINITY, f64::min);
    let max = scores.values().cloned().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return scores.keys().map(|id| (id.clone(), 1.0)).collect();
    }
    scores
        .iter()
        .map(|(id, score)| (id.clone(), (score - min) / (max - min)))
        .collect()
}

/// Compute lexical and semantic scores for `results`, normalize (when
/// requested), and fuse into each result's `score`. Spans without an
/// embedding contribute 0 to the semantic term; `warn` is called once per
/// such span so the Reader can surface it.
#[allow(clippy::too_many_arguments)]
pub fn rank_with_hits(
    results: &mut [SearchResult],
    query_tokens: &[String],
    query_embedding: &[f64],
    lexical: &LexicalIndex,
    span_text: &HashMap<String, String>,
    span_embedding: &HashMap<String, Vec<f64>>,
    options: &HybridOptions,
    mut warn: impl FnMut(&str),
) -> Result<()> {
    validate_options(options)?;

    let mut tfidf = TfidfRanker::new();
    tfidf.rank_with_hits(results, query_tokens, lexical, span_text, 0.1);
    let lexical_scores: HashMap<String, f64> =
        results.iter().map(|r| (r.span_id.clone(), r.score)).collect();

    let mut semantic_scores: HashMap<String, f64> = HashMap::new();
    for result in results.iter() {
        match span_embedding.get(&result.span_id) {
            Some(embedding) => {
                let similarity = embedding::cosine_similarity(query_embedding, embedding)?;
                semantic_scores.insert(result.span_id.clone(), similarity);
            }
            None => warn(&result.span_id),
        }
    }

    let (lexical_final, semantic_final) = if options.normalize {
        (min_max_normalize(&lexical_scores), min_max_normalize(&semantic_scores))
    } else {
        (lexical_scores, semantic_scores)
    };

    for result in results.iter_mut() {
        let lexical_component = lexical_final.get(&result.span_id).copied().unwrap_or(0.0);
        let semantic_component = semantic_final.get(&result.span_id).copied().unwrap_or(0.0);
        result.score = lexical_component * options.weight_lexical + semantic_component * options.weight_semantic;
    }

    Ok(())
}
