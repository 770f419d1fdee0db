//! Source reading and format detection.
//!
//! Two declared formats only, per `spec.md` §1's non-goal on reader
//! adapters beyond the declared set: `markdown` and `text`. Both are read
//! as plain UTF-8 — Markdown's extra structure is discovered later, in
//! heading detection, not here.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::types::DetectionMode;

/// Which format a source was read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Markdown,
    Text,
}

impl SourceFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Markdown => "markdown",
            SourceFormat::Text => "text",
        }
    }
}

pub struct SourceDocument {
    pub raw_text: String,
    pub format: SourceFormat,
    pub detection: DetectionMode,
}

/// Read `path` and detect its format. `forced_format` overrides
/// extension-based detection when present (`DetectionMode::Flag`).
pub fn read_source(path: &Path, forced_format: Option<SourceFormat>) -> Result<SourceDocument> {
    let raw_text = fs::read_to_string(path)?;
    let (format, detection) = match forced_format {
        Some(format) => (format, DetectionMode::Flag),
        None => (detect_format(path), DetectionMode::Auto),
    };
    Ok(SourceDocument { raw_text, format, detection })
}

fn detect_format(path: &Path) -> SourceFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("md") | Some("markdown") => SourceFormat::Markdown,
        _ => SourceFormat::Text,
    }
}
