//! Shared test fixtures.

#![allow(dead_code)]

use std::fs;

use tempfile::TempDir;

use spanread::build;
use spanread::reader::Reader;

/// Nine-span Markdown corpus: one H1, two H2s, interleaved paragraphs,
/// a `**bold**` word, and a `Here's` contraction.
pub const SAMPLE_MARKDOWN: &str = "\
# Sample Markdown Document

This is the opening paragraph before any heading appears, one of two introductions.

## Section Two

This paragraph contains a **bold** word for testing.

Here's a contraction test in this section.

## Section Three

First paragraph of section three.

Second paragraph mentions keywords again.

Third paragraph closes out the document.
";

/// Compile [`SAMPLE_MARKDOWN`] into a fresh artifact directory and open a
/// [`Reader`] over it. The returned [`TempDir`] must stay alive for as long
/// as the reader is used; dropping it deletes the artifacts on disk.
pub fn build_sample_reader() -> (Reader, TempDir) {
    build_reader_from(SAMPLE_MARKDOWN, "Sample Markdown Document")
}

/// Compile arbitrary Markdown `text` under `title` and open a [`Reader`].
pub fn build_reader_from(text: &str, title: &str) -> (Reader, TempDir) {
    let input_dir = TempDir::new().expect("create input dir");
    let output_dir = TempDir::new().expect("create output dir");

    let input_path = input_dir.path().join("doc.md");
    fs::write(&input_path, text).expect("write source document");

    build::run_build(&input_path, output_dir.path(), Some(title), None).expect("build sample corpus");

    let reader = Reader::open(output_dir.path()).expect("open compiled corpus");
    (reader, output_dir)
}
