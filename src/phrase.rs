//! Phrase extraction and exact phrase matching (C2).
//!
//! A query's quoted substrings are phrases; everything left over is
//! tokenized normally (§4.1). Phrase matching is exact, over a normalized
//! form of both the phrase and the haystack text, so that matching is
//! case- and punctuation-insensitive in the same way token search is.

/// A parsed query: the phrases (already normalized) and the residual tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    pub phrases: Vec<String>,
    pub tokens: Vec<String>,
}

/// Extract every maximal `"..."`-enclosed substring as a phrase, in the
/// order it appears, then tokenize what's left.
pub fn parse_query(query: &str) -> ParsedQuery {
    let mut phrases = Vec::new();
    let mut residual = String::with_capacity(query.len());
    let mut chars = query.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            let mut phrase = String::new();
            for inner in chars.by_ref() {
                if inner == '"' {
                    break;
                }
                phrase.push(inner);
            }
            phrases.push(normalize_phrase(&phrase));
            residual.push(' ');
        } else {
            residual.push(ch);
        }
    }
    ParsedQuery {
        phrases,
        tokens: crate::tokenizer::tokenize(&residual),
    }
}

/// Apply tokenizer-style normalization but collapse separator runs to a
/// single space (rather than dropping them), preserving word boundaries,
/// then trim.
pub fn normalize_phrase(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut last_was_space = true; // suppress leading space
    for ch in phrase.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
            out.push(lower);
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Find every non-overlapping, leftmost-first occurrence of `phrase`
/// (already normalized) inside `text` after normalizing `text` the same
/// way. Offsets are byte offsets into the normalized text. Empty phrase
/// yields no matches.
pub fn find_phrase_matches(text: &str, phrase: &str) -> Vec<(usize, usize)> {
    if phrase.is_empty() {
        return Vec::new();
    }
    let normalized = normalize_phrase(text);
    let mut matches = Vec::new();
    let mut search_from = 0;
    while let Some(rel) = normalized[search_from..].find(phrase) {
        let start = search_from + rel;
        let end = start + phrase.len();
        matches.push((start, end));
        search_from = end;
    }
    matches
}

/// True when every phrase in `phrases` (already normalized) occurs at
/// least once in `text`.
pub fn contains_all_phrases(text: &str, phrases: &[String]) -> bool {
    phrases
        .iter()
        .all(|phrase| !find_phrase_matches(text, phrase).is_empty())
}
