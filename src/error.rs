//! The error taxonomy for artifact loading and query-time misuse.
//!
//! Loading failures carry enough context (path, record index, reason) to
//! point straight at the offending artifact. Query-time errors are reserved
//! for caller misuse — an empty query or an unknown token is a normal,
//! non-error outcome (see `spec.md` §7), not something that belongs here.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong loading artifacts or misusing the query API.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// A required artifact file does not exist.
    #[error("required artifact missing: {path}")]
    ArtifactMissing { path: PathBuf },

    /// An artifact exists but fails schema validation.
    #[error("invalid artifact {path}{}: {reason}", record_index.map(|i| format!(" (record {i})")).unwrap_or_default())]
    ArtifactInvalid {
        path: PathBuf,
        record_index: Option<usize>,
        reason: String,
    },

    /// Caller passed an argument outside its documented domain, e.g. hybrid
    /// weights that are negative or sum to more than 1.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Cosine similarity was asked to compare vectors of different length.
    /// Spec treats this as a case of `InvalidArgument`.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReaderError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ReaderError::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
