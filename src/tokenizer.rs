//! Lowercasing, accent-preserving tokenizer (C1).
//!
//! Rules, applied in order: case-fold to lowercase, replace every maximal
//! run of non-`[a-z0-9]` characters with a single space, split on
//! whitespace, drop empty tokens. Non-ASCII letters are treated as
//! separators — an accepted limitation, consistent across build and query.

/// Split `text` into lower-case alphanumeric tokens, in document order.
///
/// Idempotent: `tokenize(tokenize(text).join(" "))` returns the same
/// sequence as `tokenize(text)`.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
            current.push(lower);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
