//! The building blocks of a compiled corpus.
//!
//! These types mirror the four on-disk artifacts (`manifest.json`,
//! `spans.jsonl`, `nodeMap.json`, `buildReport.json`) plus the product types
//! the Reader hands back from queries. Everything here is immutable once
//! constructed — the indexes built over them (lexical, TF-IDF, embedding)
//! live on the `Reader`, not on these types.
//!
//! # Invariants
//!
//! - **Span**: `order` values are a permutation of `0..spanCount`; `id` and
//!   `order` are in bijection.
//! - **NodeMap**: every span id appears in exactly one section's
//!   `paragraph_ids` and exactly once in `paragraphs`; a section's
//!   `paragraph_ids` are in document order.
//! - **BuildReport**: `length_stats.p10 <= p50 <= p90`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// ARTIFACT TYPES
// =============================================================================

/// One paragraph of the normalized source document.
///
/// `order` is dense from 0 and unique within the corpus; `id` is a stable
/// opaque string (conventionally `span:NNNNNN`). The two are bijective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub id: String,
    pub text: String,
    pub order: usize,
    #[serde(default)]
    pub heading_path: Vec<String>,
    /// 128-dim unit vector, present only when the build pipeline computed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f64>>,
}

/// How a format was selected for a source document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    Auto,
    Flag,
}

/// Normalization choices applied by the build pipeline. Fixed by this
/// implementation, but recorded so a loader can refuse an artifact built
/// under different assumptions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Normalization {
    pub unicode: String,
    pub eol: String,
    pub blank_line_collapse: bool,
}

impl Default for Normalization {
    fn default() -> Self {
        Normalization {
            unicode: "NFC".to_string(),
            eol: "LF".to_string(),
            blank_line_collapse: true,
        }
    }
}

/// Corpus-level metadata: identity, provenance, and schema versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub source_path: String,
    pub source_hash: String,
    pub byte_length: u64,
    pub span_count: usize,
    pub version: String,
    pub format: String,
    pub detection: DetectionMode,
    pub reader: String,
    pub normalization: Normalization,
    /// Artifact name -> semantic version string ("major.minor.patch").
    pub schema: HashMap<String, String>,
}

/// A section's contents: its ordered paragraph ids and its heading text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionEntry {
    pub paragraph_ids: Vec<String>,
    pub heading: String,
}

/// Hierarchical chapter/section/paragraph structure over a corpus.
///
/// A plain-text document yields a single synthetic chapter with a single
/// synthetic section, whose heading is the document title and whose
/// `paragraph_ids` are every span in the corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeMap {
    pub book: BookRef,
    pub chapters: HashMap<String, Vec<String>>,
    pub sections: HashMap<String, SectionEntry>,
    pub paragraphs: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookRef {
    pub id: String,
    pub title: String,
}

/// Nearest-rank percentiles over span text lengths.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LengthStats {
    pub min: usize,
    pub max: usize,
    pub p10: usize,
    pub p50: usize,
    pub p90: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub short_span_chars: usize,
    pub long_span_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            short_span_chars: 20,
            long_span_chars: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Warnings {
    pub short_spans: usize,
    pub long_spans: usize,
    pub duplicate_text_spans: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub span_count: usize,
    pub chapter_count: usize,
    pub section_count: usize,
    pub total_chars: usize,
    pub average_chars: f64,
    pub multi_line_spans: usize,
}

/// Shortest/longest span text, truncated to 200 characters with a trailing
/// ellipsis marker when cut.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Samples {
    pub shortest: String,
    pub longest: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub manifest_id: String,
    pub source_hash: String,
}

/// Quality metrics emitted by the build pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub summary: Summary,
    pub length_stats: LengthStats,
    pub thresholds: Thresholds,
    pub warnings: Warnings,
    pub samples: Samples,
    pub provenance: Provenance,
}

// =============================================================================
// QUERY OPTION TYPES
// =============================================================================

/// Fuzzy matching parameters for `search`/`searchWithHits`.
///
/// Only `max_edits == 1` is meaningful; any other value disables fuzzy
/// matching for the query (`spec.md` §4.3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyOptions {
    pub enabled: bool,
    pub max_edits: usize,
    pub min_token_len: usize,
    pub df_threshold: usize,
    pub max_candidates_per_token: usize,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        FuzzyOptions {
            enabled: false,
            max_edits: 1,
            min_token_len: 4,
            df_threshold: 5,
            max_candidates_per_token: 50,
        }
    }
}

/// Fusion weights for the hybrid ranker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridOptions {
    pub weight_lexical: f64,
    pub weight_semantic: f64,
    pub normalize: bool,
}

impl Default for HybridOptions {
    fn default() -> Self {
        HybridOptions {
            weight_lexical: 0.7,
            weight_semantic: 0.3,
            normalize: true,
        }
    }
}

/// How a search's results should be ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankMode {
    #[default]
    None,
    Tfidf,
    Hybrid,
}

/// Options accepted by `Reader::search`.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub limit: Option<usize>,
    pub rank: RankMode,
    pub fuzzy: Option<FuzzyOptions>,
    pub hybrid: Option<HybridOptions>,
}

/// How a retrieval-pack entry is expanded into a full context window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandMode {
    #[default]
    Neighbors,
    Section,
}

/// Options accepted by `Reader::retrieve`.
#[derive(Debug, Clone)]
pub struct RetrievalOptions {
    pub limit: usize,
    pub per_hit_neighbors: usize,
    pub expand: ExpandMode,
    pub max_tokens: Option<usize>,
    pub rank: RankMode,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        RetrievalOptions {
            limit: 5,
            per_hit_neighbors: 1,
            expand: ExpandMode::Neighbors,
            max_tokens: None,
            rank: RankMode::Tfidf,
        }
    }
}

/// Which fixed system prompt to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    #[default]
    Qa,
    Summarize,
}

/// How citation markers are rendered. The spec defines only one style;
/// kept as an enum (rather than a bare string) per `spec.md` §9's guidance
/// to model tagged variants as sum types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CitationStyle {
    #[default]
    Numeric,
}

/// Options accepted by `Reader::assemble_prompt`.
#[derive(Debug, Clone)]
pub struct PromptOptions {
    pub headroom_tokens: usize,
    pub style: PromptStyle,
    pub citation_style: CitationStyle,
    /// Effectively unbounded unless tightened by the integrator.
    pub max_prompt_tokens: usize,
}

impl Default for PromptOptions {
    fn default() -> Self {
        PromptOptions {
            headroom_tokens: 300,
            style: PromptStyle::Qa,
            citation_style: CitationStyle::Numeric,
            max_prompt_tokens: usize::MAX / 2,
        }
    }
}

// =============================================================================
// RESULT / PRODUCT TYPES
// =============================================================================

/// A single query token's match against one span.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenHit {
    pub token: String,
    pub fuzzy: bool,
}

/// A phrase's non-overlapping match ranges within one span's normalized text.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseHit {
    pub phrase: String,
    pub ranges: Vec<(usize, usize)>,
}

/// Per-span match annotations, carried alongside a `SearchResult` so rankers
/// can compute phrase boosts and callers can see what actually matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitAnnotation {
    pub tokens: Vec<TokenHit>,
    pub phrases: Vec<PhraseHit>,
}

impl HitAnnotation {
    /// Number of distinct phrases that matched at least once.
    pub fn phrase_count(&self) -> usize {
        self.phrases.iter().filter(|p| !p.ranges.is_empty()).count()
    }
}

/// One span's result from `search`/`searchWithHits`, with a placeholder
/// score of 0 until a ranker fills it in.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub span_id: String,
    pub order: usize,
    pub score: f64,
    pub hits: HitAnnotation,
}

/// A pre-expansion retrieval candidate: one search hit, not yet widened
/// into a pack.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalPackEntry {
    pub span_id: String,
    pub order: usize,
    pub score: f64,
    pub heading_path: Vec<String>,
    pub hits: HitAnnotation,
}

/// How a pack's span range was produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PackScope {
    Neighbors { start: usize, end: usize },
    Section { section_id: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PackMeta {
    pub span_count: usize,
    pub char_count: usize,
}

/// A merged, deduplicated, scope-annotated window of spans ready for
/// prompting.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalPack {
    pub id: String,
    pub scope: PackScope,
    pub heading_path: Vec<String>,
    pub paragraph_ids: Vec<String>,
    pub text: String,
    pub meta: PackMeta,
    /// The best-scoring entry this pack was built from; retained so the
    /// prompt assembler's citations can carry span offsets.
    pub entry: RetrievalPackEntry,
}

/// One citation attached to an assembled prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Citation {
    pub marker: String,
    pub pack_id: String,
    pub doc_id: String,
    pub heading_path: Vec<String>,
    pub span_offsets: Option<Vec<(usize, usize)>>,
}

/// The final prompt, ready to send to a model.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPrompt {
    pub system: String,
    pub user: String,
    pub citations: Vec<Citation>,
}
