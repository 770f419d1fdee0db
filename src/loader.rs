//! Artifact loader (C11).
//!
//! Reads the four-file artifact contract from a directory: `manifest.json`
//! and `spans.jsonl` are required, `nodeMap.json` and `buildReport.json`
//! are optional. The loader performs no transformation — it does not
//! recompute the node map or report from spans, it only parses and
//! schema-validates what's on disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReaderError, Result};
use crate::types::{BuildReport, Manifest, NodeMap, Span};

/// The schema major versions this loader was built against. A manifest
/// whose `schema` entry has a different major component is rejected —
/// same rule `spec.md` §6 states for forward/backward compatibility.
const EXPECTED_SCHEMA_MAJOR: &[(&str, u32)] = &[
    ("manifest", 1),
    ("spans", 1),
    ("nodeMap", 1),
    ("buildReport", 1),
];

/// Everything loaded from one artifact directory, ready to hand to a
/// `Reader`.
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub manifest: Manifest,
    pub spans: Vec<Span>,
    pub node_map: Option<NodeMap>,
    pub build_report: Option<BuildReport>,
}

/// Load and validate every artifact in `directory`.
pub fn load_artifacts(directory: &Path) -> Result<LoadedArtifacts> {
    if !directory.is_dir() {
        return Err(ReaderError::ArtifactMissing {
            path: directory.to_path_buf(),
        });
    }

    let manifest = load_manifest(directory)?;
    check_schema_compatibility(&manifest)?;
    let spans = load_spans(directory)?;
    let node_map = load_optional::<NodeMap>(directory, "nodeMap.json")?;
    let build_report = load_optional::<BuildReport>(directory, "buildReport.json")?;

    Ok(LoadedArtifacts {
        manifest,
        spans,
        node_map,
        build_report,
    })
}

fn load_manifest(directory: &Path) -> Result<Manifest> {
    let path = directory.join("manifest.json");
    let content = read_required(&path)?;
    serde_json::from_str(&content).map_err(|err| ReaderError::ArtifactInvalid {
        path,
        record_index: None,
        reason: err.to_string(),
    })
}

fn load_spans(directory: &Path) -> Result<Vec<Span>> {
    let path = directory.join("spans.jsonl");
    let content = read_required(&path)?;
    let mut spans = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.is_empty() {
            return Err(ReaderError::ArtifactInvalid {
                path,
                record_index: Some(index + 1),
                reason: "empty line within spans.jsonl body".to_string(),
            });
        }
        let span: Span = serde_json::from_str(line).map_err(|err| ReaderError::ArtifactInvalid {
            path: path.clone(),
            record_index: Some(index + 1),
            reason: err.to_string(),
        })?;
        spans.push(span);
    }
    Ok(spans)
}

fn load_optional<T: serde::de::DeserializeOwned>(directory: &Path, filename: &str) -> Result<Option<T>> {
    let path = directory.join(filename);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let value = serde_json::from_str(&content).map_err(|err| ReaderError::ArtifactInvalid {
        path: path.clone(),
        record_index: None,
        reason: err.to_string(),
    })?;
    Ok(Some(value))
}

fn read_required(path: &PathBuf) -> Result<String> {
    if !path.exists() {
        return Err(ReaderError::ArtifactMissing { path: path.clone() });
    }
    Ok(fs::read_to_string(path)?)
}

fn check_schema_compatibility(manifest: &Manifest) -> Result<()> {
    for (artifact, expected_major) in EXPECTED_SCHEMA_MAJOR {
        let Some(version) = manifest.schema.get(*artifact) else {
            continue;
        };
        let major = major_component(version).ok_or_else(|| ReaderError::ArtifactInvalid {
            path: PathBuf::from("manifest.json"),
            record_index: None,
            reason: format!("schema.{artifact} is not a valid semantic version: {version}"),
        })?;
        if major != *expected_major {
            return Err(ReaderError::ArtifactInvalid {
                path: PathBuf::from("manifest.json"),
                record_index: None,
                reason: format!(
                    "schema.{artifact} major version {major} is incompatible with loader version {expected_major}"
                ),
            });
        }
    }
    Ok(())
}

fn major_component(version: &str) -> Option<u32> {
    version.split('.').next()?.parse().ok()
}

pub fn default_schema() -> HashMap<String, String> {
    EXPECTED_SCHEMA_MAJOR
        .iter()
        .map(|(name, major)| (name.to_string(), format!("{major}.0.0")))
        .collect()
}
