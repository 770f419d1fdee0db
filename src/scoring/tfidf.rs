//! TF-IDF ranker (C6).
//!
//! `TF(span, token) = 1 + ln(count)` when `count >= 1`, else 0, from a
//! fresh tokenization of the span text. `IDF(token) = ln(N / (1 + df))`.
//! Per-span length is the token count from that same tokenization. Score
//! for query tokens `Q` is `sum(TF * IDF) / sqrt(length)`, plus a phrase
//! boost capped at 0.3.
//!
//! The floating-point operation order here (accumulate TF*IDF over query
//! tokens in the given order, divide by sqrt(length), then add the phrase
//! boost) is required for bit-reproducible scores (`spec.md` §9).

use std::collections::{HashMap, VecDeque};

use crate::lexical::LexicalIndex;
use crate::tokenizer;
use crate::types::SearchResult;

struct CacheEntry {
    counts: HashMap<String, usize>,
    length: usize,
}

/// MRU-first LRU cache of per-span term frequencies, keyed by span id.
struct TfCache {
    capacity: usize,
    map: HashMap<String, CacheEntry>,
    order: VecDeque<String>,
}

impl TfCache {
    fn new(capacity: usize) -> Self {
        TfCache {
            capacity,
            map: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn touch(&mut self, id: &str) {
        if let Some(pos) = self.order.iter().position(|x| x == id) {
            self.order.remove(pos);
        }
        self.order.push_front(id.to_string());
    }

    fn get(&mut self, id: &str) -> Option<(HashMap<String, usize>, usize)> {
        if self.map.contains_key(id) {
            self.touch(id);
            let entry = self.map.get(id).unwrap();
            Some((entry.counts.clone(), entry.length))
        } else {
            None
        }
    }

    fn insert(&mut self, id: String, counts: HashMap<String, usize>, length: usize) {
        if self.map.contains_key(&id) {
            self.map.insert(id.clone(), CacheEntry { counts, length });
            self.touch(&id);
            return;
        }
        if self.map.len() >= self.capacity {
            if let Some(lru) = self.order.pop_back() {
                self.map.remove(&lru);
            }
        }
        self.map.insert(id.clone(), CacheEntry { counts, length });
        self.order.push_front(id);
    }
}

/// Computes TF-IDF scores for search results, with an optional bounded
/// term-frequency cache.
pub struct TfidfRanker {
    cache: Option<TfCache>,
}

impl Default for TfidfRanker {
    fn default() -> Self {
        TfidfRanker { cache: None }
    }
}

impl TfidfRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable (or reset) the MRU term-frequency cache with the given
    /// capacity. The cache's capacity is fixed at enable time.
    pub fn enable_cache(&mut self, capacity: usize) {
        self.cache = Some(TfCache::new(capacity));
    }

    fn term_frequencies(&mut self, span_id: &str, text: &str) -> (HashMap<String, usize>, usize) {
        if let Some(cache) = &mut self.cache {
            if let Some(hit) = cache.get(span_id) {
                return hit;
            }
        }
        let tokens = tokenizer::tokenize(text);
        let mut counts = HashMap::new();
        for token in &tokens {
            *counts.entry(token.clone()).or_insert(0) += 1;
        }
        let length = tokens.len();
        if let Some(cache) = &mut self.cache {
            cache.insert(span_id.to_string(), counts.clone(), length);
        }
        (counts, length)
    }

    /// `sum(TF(span, t) * IDF(t)) / sqrt(length)` over query tokens `t`.
    pub fn score(&mut self, span_id: &str, text: &str, query_tokens: &[String], lexical: &LexicalIndex) -> f64 {
        let (counts, length) = self.term_frequencies(span_id, text);
        if length == 0 {
            return 0.0;
        }
        let total_documents = lexical.total_documents() as f64;
        let mut accumulated = 0.0;
        for token in query_tokens {
            let count = *counts.get(token).unwrap_or(&0);
            if count == 0 {
                continue;
            }
            let tf = 1.0 + (count as f64).ln();
            let df = lexical.document_frequency(token) as f64;
            let idf = (total_documents / (1.0 + df)).ln();
            accumulated += tf * idf;
        }
        accumulated / (length as f64).sqrt()
    }

    /// Score every result in place and add a phrase-count boost, capped at
    /// 0.3. `span_text` resolves a span id to its normalized text.
    pub fn rank_with_hits(
        &mut self,
        results: &mut [SearchResult],
        query_tokens: &[String],
        lexical: &LexicalIndex,
        span_text: &HashMap<String, String>,
        phrase_boost: f64,
    ) {
        for result in results.iter_mut() {
            let text = span_text.get(&result.span_id).map(String::as_str).unwrap_or("");
            let score = self.score(&result.span_id, text, query_tokens, lexical);
            let boost = (result.hits.phrase_count() as f64 * phrase_boost).min(0.3);
            result.score = score + boost;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HitAnnotation, Span};

    fn spans() -> Vec<Span> {
        vec![
            Span {
                id: "span:000000".into(),
                text: "the quick brown fox jumps over the lazy dog".into(),
                order: 0,
                heading_path: vec![],
                embedding: None,
            },
            Span {
                id: "span:000001".into(),
                text: "quick quick quick fox".into(),
                order: 1,
                heading_path: vec![],
                embedding: None,
            },
        ]
    }

    #[test]
    fn higher_term_frequency_scores_higher() {
        let spans = spans();
        let lexical = LexicalIndex::build(&spans);
        let mut ranker = TfidfRanker::new();
        let query = vec!["quick".to_string()];
        let s0 = ranker.score("span:000000", &spans[0].text, &query, &lexical);
        let s1 = ranker.score("span:000001", &spans[1].text, &query, &lexical);
        assert!(s1 > s0);
    }

    #[test]
    fn cache_returns_same_result_as_uncached() {
        let spans = spans();
        let lexical = LexicalIndex::build(&spans);
        let query = vec!["fox".to_string()];

        let mut uncached = TfidfRanker::new();
        let without_cache = uncached.score("span:000000", &spans[0].text, &query, &lexical);

        let mut cached = TfidfRanker::new();
        cached.enable_cache(10);
        let first = cached.score("span:000000", &spans[0].text, &query, &lexical);
        let second = cached.score("span:000000", &spans[0].text, &query, &lexical);

        assert_eq!(without_cache, first);
        assert_eq!(first, second);
    }

    #[test]
    fn phrase_boost_is_capped_at_point_three() {
        let spans = spans();
        let lexical = LexicalIndex::build(&spans);
        let mut ranker = TfidfRanker::new();
        let mut results = vec![SearchResult {
            span_id: "span:000000".into(),
            order: 0,
            score: 0.0,
            hits: HitAnnotation {
                tokens: vec![],
                phrases: vec![
                    crate::types::PhraseHit { phrase: "a".into(), ranges: vec![(0, 1)] },
                    crate::types::PhraseHit { phrase: "b".into(), ranges: vec![(0, 1)] },
                    crate::types::PhraseHit { phrase: "c".into(), ranges: vec![(0, 1)] },
                    crate::types::PhraseHit { phrase: "d".into(), ranges: vec![(0, 1)] },
                ],
            },
        }];
        let mut text_map = HashMap::new();
        text_map.insert("span:000000".to_string(), spans[0].text.clone());
        ranker.rank_with_hits(&mut results, &[], &lexical, &text_map, 0.1);
        assert_eq!(results[0].score, 0.3);
    }
}
