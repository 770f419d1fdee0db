//! Deterministic hash-projection mini-embedder (C5).
//!
//! Not a semantically trained embedding — a fully deterministic,
//! dependency-free similarity signal that captures co-occurrence of exact
//! tokens. Span embeddings are persisted in the artifact when present;
//! otherwise semantic scoring is skipped for that span with a warning
//! (`reader::Reader::warnings`).

use crate::error::{ReaderError, Result};
use crate::tokenizer;

pub const DIMENSIONS: usize = 128;

/// Embed `text` into a 128-dim unit vector. The zero vector for text with
/// no tokens, or when the averaged vector's magnitude is 0.
pub fn embed_text(text: &str) -> Vec<f64> {
    let tokens = tokenizer::tokenize(text);
    if tokens.is_empty() {
        return vec![0.0; DIMENSIONS];
    }

    let mut sum = vec![0.0_f64; DIMENSIONS];
    for token in &tokens {
        for (d, slot) in sum.iter_mut().enumerate() {
            *slot += dimension_value(token, d);
        }
    }
    for value in &mut sum {
        *value /= tokens.len() as f64;
    }

    l2_normalize(sum)
}

/// The per-token, per-dimension contribution: a rolling hash of
/// `"{token}:{d}"` over UTF-16 code units, mapped into `[-1, 1]`.
fn dimension_value(token: &str, d: usize) -> f64 {
    let keyed = format!("{token}:{d}");
    let mut hash: i32 = 0;
    for unit in keyed.encode_utf16() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(unit as i32);
    }
    let bucket = (hash as i64).rem_euclid(10_000);
    (bucket as f64) / 5_000.0 - 1.0
}

fn l2_normalize(vector: Vec<f64>) -> Vec<f64> {
    let magnitude = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if magnitude == 0.0 {
        return vector;
    }
    vector.into_iter().map(|v| v / magnitude).collect()
}

/// Dot product of two 128-dim unit vectors, in `[-1, 1]`.
pub fn cosine_similarity(u: &[f64], v: &[f64]) -> Result<f64> {
    if u.len() != v.len() {
        return Err(ReaderError::DimensionMismatch {
            expected: u.len(),
            actual: v.len(),
        });
    }
    Ok(u.iter().zip(v.iter()).map(|(a, b)| a * b).sum())
}
