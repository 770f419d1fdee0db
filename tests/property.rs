//! Property-based tests for corpus-wide invariants.

mod common;

#[path = "property/order_and_coverage.rs"]
mod order_and_coverage;

#[path = "property/document_frequency.rs"]
mod document_frequency;

#[path = "property/tokenizer.rs"]
mod tokenizer;

#[path = "property/percentiles.rs"]
mod percentiles;

#[path = "property/embedding.rs"]
mod embedding;


#[path = "property/fuzzy.rs"]
mod fuzzy;

#[path = "property/hybrid.rs"]
mod hybrid;
