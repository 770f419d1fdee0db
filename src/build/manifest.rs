//! Manifest construction: content-addressed corpus id, source hash, and
//! the fixed normalization/schema-version record every manifest carries.

use sha2::{Digest, Sha256};

use crate::build::source::SourceFormat;
use crate::build::timestamp::now_iso8601;
use crate::loader::default_schema;
use crate::types::{DetectionMode, Manifest, Normalization};

pub const COMPILER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn source_hash_hex(normalized_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized_text.as_bytes());
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn corpus_id(source_hash: &str) -> String {
    format!("corpus:{}", &source_hash[..12.min(source_hash.len())])
}

#[allow(clippy::too_many_arguments)]
pub fn build_manifest(
    title: &str,
    source_path: &str,
    normalized_text: &str,
    span_count: usize,
    format: SourceFormat,
    detection: DetectionMode,
    reader: &str,
) -> Manifest {
    let source_hash = source_hash_hex(normalized_text);
    Manifest {
        id: corpus_id(&source_hash),
        title: title.to_string(),
        created_at: now_iso8601(),
        source_path: source_path.to_string(),
        source_hash,
        byte_length: normalized_text.len() as u64,
        span_count,
        version: COMPILER_VERSION.to_string(),
        format: format.as_str().to_string(),
        detection,
        reader: reader.to_string(),
        normalization: Normalization::default(),
        schema: default_schema(),
    }
}
