//! Inverted token index and boolean/fuzzy search (C4).
//!
//! Built once, lazily, on first use from every span in the corpus. Owns
//! the posting map (token -> span ids), the vocabulary, and a lightweight
//! order/text lookup so it doesn't need to borrow the Reader's span store.

use std::collections::{HashMap, HashSet};

use crate::fuzzy;
use crate::phrase::{self, ParsedQuery};
use crate::tokenizer;
use crate::types::{FuzzyOptions, HitAnnotation, PhraseHit, SearchResult, Span, TokenHit};

/// Inverted index over a corpus's spans.
#[derive(Debug, Clone)]
pub struct LexicalIndex {
    postings: HashMap<String, HashSet<String>>,
    vocabulary: HashSet<String>,
    span_order: HashMap<String, usize>,
    span_text: HashMap<String, String>,
    total: usize,
}

impl LexicalIndex {
    /// Build the index by tokenizing every span exactly once.
    pub fn build(spans: &[Span]) -> Self {
        let mut postings: HashMap<String, HashSet<String>> = HashMap::new();
        let mut vocabulary = HashSet::new();
        let mut span_order = HashMap::new();
        let mut span_text = HashMap::new();

        for span in spans {
            span_order.insert(span.id.clone(), span.order);
            span_text.insert(span.id.clone(), span.text.clone());
            for token in tokenizer::tokenize(&span.text) {
                vocabulary.insert(token.clone());
                postings.entry(token).or_default().insert(span.id.clone());
            }
        }

        LexicalIndex {
            postings,
            vocabulary,
            span_order,
            span_text,
            total: spans.len(),
        }
    }

    /// `|posting(token)|`, 0 when the token never occurs.
    pub fn document_frequency(&self, token: &str) -> usize {
        self.postings.get(token).map_or(0, |set| set.len())
    }

    /// The total span count this index was built from.
    pub fn total_documents(&self) -> usize {
        self.total
    }

    fn posting(&self, token: &str) -> HashSet<String> {
        self.postings.get(token).cloned().unwrap_or_default()
    }

    /// Whether `token` qualifies for fuzzy expansion under `options`.
    fn fuzzy_eligible(&self, token: &str, options: &FuzzyOptions) -> bool {
        options.enabled
            && options.max_edits == 1
            && token.chars().count() >= options.min_token_len
            && self.document_frequency(token) < options.df_threshold
    }

    /// Exact posting unioned with the postings of every fuzzy candidate,
    /// when `token` is fuzzy-eligible. Also returns the fuzzy-only span ids
    /// (present via a candidate but not exactly) for hit annotation.
    fn effective_posting(
        &self,
        token: &str,
        fuzzy_options: Option<&FuzzyOptions>,
    ) -> (HashSet<String>, HashSet<String>) {
        let exact = self.posting(token);
        let fuzzy_only = match fuzzy_options {
            Some(options) if self.fuzzy_eligible(token, options) => {
                let candidates =
                    fuzzy::find_fuzzy_candidates(token, &self.vocabulary, options.max_candidates_per_token);
                let mut union = HashSet::new();
                for candidate in candidates {
                    union.extend(self.posting(&candidate));
                }
                union.difference(&exact).cloned().collect()
            }
            _ => HashSet::new(),
        };
        let mut effective = exact;
        effective.extend(fuzzy_only.iter().cloned());
        (effective, fuzzy_only)
    }

    /// Tokenize the query and return up to `limit` matching span ids.
    /// Order among results is unspecified by the boolean primitive; this
    /// implementation returns them in ascending `order` for determinism.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<String> {
        let tokens = tokenizer::tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }
        let mut candidates = self.intersect_tokens(&tokens, None);
        let mut ids: Vec<String> = candidates.drain().collect();
        ids.sort_by_key(|id| self.span_order.get(id).copied().unwrap_or(usize::MAX));
        if let Some(limit) = limit {
            ids.truncate(limit);
        }
        ids
    }

    fn intersect_tokens(&self, tokens: &[String], fuzzy_options: Option<&FuzzyOptions>) -> HashSet<String> {
        let mut iter = tokens.iter();
        let first = match iter.next() {
            Some(token) => self.effective_posting(token, fuzzy_options).0,
            None => return HashSet::new(),
        };
        iter.fold(first, |acc, token| {
            let (posting, _) = self.effective_posting(token, fuzzy_options);
            acc.intersection(&posting).cloned().collect()
        })
    }

    /// Parse phrases and tokens from `query`, resolve boolean/fuzzy
    /// candidates, filter by phrase containment, and emit annotated
    /// results with a placeholder score of 0.
    pub fn search_with_hits(
        &self,
        query: &str,
        limit: Option<usize>,
        fuzzy_options: Option<FuzzyOptions>,
    ) -> Vec<SearchResult> {
        let parsed = phrase::parse_query(query);
        if parsed.tokens.is_empty() && parsed.phrases.is_empty() {
            return Vec::new();
        }

        let candidates: HashSet<String> = if !parsed.tokens.is_empty() {
            self.intersect_tokens(&parsed.tokens, fuzzy_options.as_ref())
        } else {
            self.seed_from_first_phrase(&parsed)
        };

        let mut results: Vec<SearchResult> = candidates
            .into_iter()
            .filter_map(|span_id| self.annotate(&span_id, &parsed, fuzzy_options.as_ref()))
            .collect();

        results.sort_by_key(|r| r.order);
        if let Some(limit) = limit {
            results.truncate(limit);
        }
        results
    }

    fn seed_from_first_phrase(&self, parsed: &ParsedQuery) -> HashSet<String> {
        let Some(first_phrase) = parsed.phrases.first() else {
            return HashSet::new();
        };
        match first_phrase.split(' ').find(|w| !w.is_empty()) {
            Some(first_word) => self.posting(first_word),
            None => HashSet::new(),
        }
    }

    fn annotate(
        &self,
        span_id: &str,
        parsed: &ParsedQuery,
        fuzzy_options: Option<&FuzzyOptions>,
    ) -> Option<SearchResult> {
        let text = self.span_text.get(span_id)?;
        let order = *self.span_order.get(span_id)?;

        if !phrase::contains_all_phrases(text, &parsed.phrases) {
            return None;
        }

        let mut tokens = Vec::with_capacity(parsed.tokens.len());
        for token in &parsed.tokens {
            let (_, fuzzy_only) = self.effective_posting(token, fuzzy_options);
            tokens.push(TokenHit {
                token: token.clone(),
                fuzzy: fuzzy_only.contains(span_id),
            });
        }

        let phrases = parsed
            .phrases
            .iter()
            .map(|phrase| PhraseHit {
                phrase: phrase.clone(),
                ranges: phrase::find_phrase_matches(text, phrase),
            })
            .collect();

        Some(SearchResult {
            span_id: span_id.to_string(),
            order,
            score: 0.0,
            hits: HitAnnotation { tokens, phrases },
        })
    }
}
