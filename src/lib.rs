//! `spanread`: a deterministic reader and retriever over pre-compiled
//! document artifacts.
//!
//! A build step (`build`) compiles one source document (Markdown or plain
//! text) into four on-disk artifacts: `manifest.json`, `spans.jsonl`,
//! `nodeMap.json`, and `buildReport.json`. A `Reader` loads that artifact
//! set and serves lexical search (`lexical`, `scoring::tfidf`), optional
//! fuzzy matching (`fuzzy`) and semantic/hybrid ranking (`embedding`,
//! `scoring::hybrid`), neighbor- or section-based retrieval packs
//! (`retrieval`), and citation-bearing prompt assembly (`prompt`).
//!
//! Module flow:
//!
//! ```text
//! build  ---> manifest.json, spans.jsonl, nodeMap.json, buildReport.json
//!               |
//!               v
//! loader ---> LoadedArtifacts ---> Reader (reader)
//!                                     |
//!                    +----------------+----------------+
//!                    |                |                |
//!               lexical/fuzzy    scoring::tfidf   embedding/scoring::hybrid
//!                    |                |                |
//!                    +----------------+----------------+
//!                                     |
//!                                 search / retrieval / prompt
//! ```
//!
//! Indexes are built lazily and cached for the Reader's lifetime; see
//! `reader` for the concurrency contract this relies on.

pub mod build;
pub mod contracts;
pub mod embedding;
pub mod error;
pub mod fuzzy;
pub mod lexical;
pub mod loader;
pub mod phrase;
pub mod prompt;
pub mod reader;
pub mod retrieval;
pub mod scoring;
pub mod tokenizer;
pub mod types;

pub use error::{ReaderError, Result};
pub use reader::Reader;
