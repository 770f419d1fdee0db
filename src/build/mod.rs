//! Build pipeline (C12, external contract).
//!
//! Reads one source file, normalizes it, splits it into spans, derives
//! the node map and manifest, and writes the four-artifact contract to an
//! output directory. Not part of the Reader's core, but the shape the
//! Reader depends on (`spec.md` §4.12).

pub mod manifest;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod timestamp;

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::types::Thresholds;

pub use source::SourceFormat;

/// Run the full pipeline against `input_path`, writing artifacts into
/// `output_dir`. `title` defaults to the input file's stem when absent.
pub fn run_build(
    input_path: &Path,
    output_dir: &Path,
    title: Option<&str>,
    forced_format: Option<SourceFormat>,
) -> Result<()> {
    let source_doc = source::read_source(input_path, forced_format)?;
    let normalized_text = normalize::normalize(&source_doc.raw_text);

    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| input_path.file_stem().and_then(|s| s.to_str()).unwrap_or("untitled").to_string());

    let source_hash = manifest::source_hash_hex(&normalized_text);
    let corpus_id = manifest::corpus_id(&source_hash);

    let split = pipeline::split(&normalized_text, source_doc.format, &corpus_id, &title);

    let manifest = manifest::build_manifest(
        &title,
        &input_path.display().to_string(),
        &normalized_text,
        split.spans.len(),
        source_doc.format,
        source_doc.detection,
        source_doc.format.as_str(),
    );

    let texts: Vec<&str> = split.spans.iter().map(|s| s.text.as_str()).collect();
    let report = report::build_report(
        &texts,
        split.node_map.chapters.len(),
        split.node_map.sections.len(),
        Thresholds::default(),
        &manifest.id,
        &manifest.source_hash,
    );

    fs::create_dir_all(output_dir)?;
    write_pretty_json(output_dir, "manifest.json", &manifest)?;
    write_pretty_json(output_dir, "nodeMap.json", &split.node_map)?;
    write_pretty_json(output_dir, "buildReport.json", &report)?;
    write_spans_jsonl(output_dir, &split.spans)?;

    Ok(())
}

fn write_pretty_json<T: serde::Serialize>(output_dir: &Path, filename: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(output_dir.join(filename), json)?;
    Ok(())
}

fn write_spans_jsonl(output_dir: &Path, spans: &[crate::types::Span]) -> Result<()> {
    let mut body = String::new();
    for span in spans {
        body.push_str(&serde_json::to_string(span)?);
        body.push('\n');
    }
    fs::write(output_dir.join("spans.jsonl"), body)?;
    Ok(())
}
