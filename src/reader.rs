//! The Reader (C8): owns loaded artifacts, builds and caches indexes, and
//! serves span/section/search/retrieval/prompt queries.
//!
//! Indexes are built lazily on first use and reused for the Reader's
//! lifetime. Per `spec.md` §9, this crate resolves the interior-mutability
//! question by threading state through `&mut self` on query methods —
//! acceptable because the concurrency contract (§5) is single-threaded.

use std::collections::HashMap;
use std::path::Path;

use crate::embedding;
use crate::error::Result;
use crate::lexical::LexicalIndex;
use crate::loader::{self, LoadedArtifacts};
use crate::phrase;
use crate::prompt;
use crate::retrieval;
use crate::scoring::hybrid;
use crate::scoring::tfidf::TfidfRanker;
use crate::types::{
    AssembledPrompt, BuildReport, Manifest, NodeMap, PromptOptions, RankMode, RetrievalOptions, RetrievalPack,
    SearchOptions, SearchResult, Span,
};

/// In-memory owner of one corpus's artifacts and derived indexes.
pub struct Reader {
    manifest: Manifest,
    spans_by_id: HashMap<String, Span>,
    ordered_spans: Vec<Span>,
    order_to_id: Vec<String>,
    section_index: HashMap<String, Vec<String>>,
    node_map: Option<NodeMap>,
    build_report: Option<BuildReport>,

    lexical: Option<LexicalIndex>,
    tfidf: TfidfRanker,

    span_text: HashMap<String, String>,
    span_embedding: HashMap<String, Vec<f64>>,

    warnings: Vec<String>,
    warned_spans: std::collections::HashSet<String>,
}

impl Reader {
    /// Load artifacts from `directory` and construct a Reader over them.
    pub fn open(directory: &Path) -> Result<Reader> {
        let LoadedArtifacts {
            manifest,
            spans,
            node_map,
            build_report,
        } = loader::load_artifacts(directory)?;
        Ok(Reader::from_artifacts(manifest, spans, node_map, build_report))
    }

    fn from_artifacts(
        manifest: Manifest,
        mut spans: Vec<Span>,
        node_map: Option<NodeMap>,
        build_report: Option<BuildReport>,
    ) -> Reader {
        spans.sort_by_key(|s| s.order);

        let mut spans_by_id = HashMap::with_capacity(spans.len());
        let mut order_to_id = Vec::with_capacity(spans.len());
        let mut span_text = HashMap::with_capacity(spans.len());
        let mut span_embedding = HashMap::new();

        for span in &spans {
            spans_by_id.insert(span.id.clone(), span.clone());
            order_to_id.push(span.id.clone());
            span_text.insert(span.id.clone(), span.text.clone());
            if let Some(embedding) = &span.embedding {
                span_embedding.insert(span.id.clone(), embedding.clone());
            }
        }

        let section_index = node_map
            .as_ref()
            .map(|nm| {
                nm.sections
                    .iter()
                    .map(|(id, entry)| (id.clone(), entry.paragraph_ids.clone()))
                    .collect()
            })
            .unwrap_or_default();

        crate::contracts::check_order_bijection(&spans_by_id, &spans);
        if let Some(nm) = &node_map {
            crate::contracts::check_node_map_coverage(nm, &spans_by_id);
        }

        Reader {
            manifest,
            spans_by_id,
            ordered_spans: spans,
            order_to_id,
            section_index,
            node_map,
            build_report,
            lexical: None,
            tfidf: TfidfRanker::new(),
            span_text,
            span_embedding,
            warnings: Vec::new(),
            warned_spans: std::collections::HashSet::new(),
        }
    }

    fn lexical_index(&mut self) -> &LexicalIndex {
        if self.lexical.is_none() {
            self.lexical = Some(LexicalIndex::build(&self.ordered_spans));
        }
        self.lexical.as_ref().unwrap()
    }

    /// Every warning accumulated so far (e.g. one per span missing an
    /// embedding during a semantic or hybrid query).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn warn_missing_embedding(&mut self, span_id: &str) {
        if self.warned_spans.insert(span_id.to_string()) {
            self.warnings
                .push(format!("span {span_id} has no embedding; skipped for semantic scoring"));
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn span(&self, id: &str) -> Option<&Span> {
        self.spans_by_id.get(id)
    }

    pub fn span_by_order(&self, order: usize) -> Option<&Span> {
        self.order_to_id.get(order).and_then(|id| self.spans_by_id.get(id))
    }

    pub fn span_count(&self) -> usize {
        self.ordered_spans.len()
    }

    /// Span ids for orders in `[max(0, order-before), order+after]`,
    /// clipped to `[0, N-1]`, ascending, target included. Empty when `id`
    /// is unknown.
    pub fn neighbors(&self, id: &str, before: usize, after: usize) -> Vec<String> {
        let Some(span) = self.spans_by_id.get(id) else {
            return Vec::new();
        };
        let order = span.order;
        let start = order.saturating_sub(before);
        let end = (order + after).min(self.ordered_spans.len().saturating_sub(1));
        (start..=end)
            .filter_map(|o| self.order_to_id.get(o).cloned())
            .collect()
    }

    pub fn list_sections(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.section_index.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn section(&self, section_id: &str) -> Option<&Vec<String>> {
        self.section_index.get(section_id)
    }

    pub fn node_map(&self) -> Option<&NodeMap> {
        self.node_map.as_ref()
    }

    pub fn build_report(&self) -> Option<&BuildReport> {
        self.build_report.as_ref()
    }

    /// Force-build the lexical index and TF-IDF ranker if needed, then
    /// enable the LRU term-frequency cache with the given capacity.
    pub fn enable_tf_cache(&mut self, capacity: usize) {
        self.lexical_index();
        self.tfidf.enable_cache(capacity);
    }

    pub(crate) fn section_id_for_span(&self, span_id: &str) -> Option<String> {
        self.section_index
            .iter()
            .find(|(_, ids)| ids.iter().any(|id| id == span_id))
            .map(|(section_id, _)| section_id.clone())
    }

    pub(crate) fn section_paragraph_ids(&self, section_id: &str) -> Option<&Vec<String>> {
        self.section_index.get(section_id)
    }

    /// The section's raw heading text, unmodified. Real Markdown headings
    /// retain their leading `#` characters; a synthetic section's heading
    /// is the bare document title with no `#` prefix — callers that need
    /// the "stripped, empty for synthetic" heading path described in
    /// `spec.md` §4.9 derive it from this by checking for the prefix.
    pub(crate) fn section_heading(&self, section_id: &str) -> Option<String> {
        self.node_map
            .as_ref()
            .and_then(|nm| nm.sections.get(section_id))
            .map(|entry| entry.heading.clone())
    }

    pub(crate) fn span_text_map(&self) -> &HashMap<String, String> {
        &self.span_text
    }

    pub(crate) fn spans_by_id_map(&self) -> &HashMap<String, Span> {
        &self.spans_by_id
    }

    pub(crate) fn ordered_spans(&self) -> &[Span] {
        &self.ordered_spans
    }

    /// Run `search`, ranked with the given options, emitting the spec's
    /// ordering: descending score when ranked (ties by ascending order),
    /// ascending order when not.
    pub fn search(&mut self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        let ranked = options.rank != RankMode::None;
        let limit_for_search = if ranked { None } else { options.limit };

        self.lexical_index();
        let lexical = self.lexical.as_ref().unwrap();
        let mut results = lexical.search_with_hits(query, limit_for_search, options.fuzzy);

        let parsed = phrase::parse_query(query);

        match options.rank {
            RankMode::None => {}
            RankMode::Tfidf => {
                let lexical = self.lexical.as_ref().unwrap();
                self.tfidf
                    .rank_with_hits(&mut results, &parsed.tokens, lexical, &self.span_text, 0.1);
            }
            RankMode::Hybrid => {
                let hybrid_options = options.hybrid.unwrap_or_default();
                let query_embedding = embedding::embed_text(query);
                let lexical = self.lexical.as_ref().unwrap();
                let warned = &mut self.warned_spans;
                let warnings = &mut self.warnings;
                hybrid::rank_with_hits(
                    &mut results,
                    &parsed.tokens,
                    &query_embedding,
                    lexical,
                    &self.span_text,
                    &self.span_embedding,
                    &hybrid_options,
                    |span_id| {
                        if warned.insert(span_id.to_string()) {
                            warnings.push(format!("span {span_id} has no embedding; skipped for semantic scoring"));
                        }
                    },
                )?;
            }
        }

        if ranked {
            results.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.order.cmp(&b.order))
            });
        } else {
            results.sort_by_key(|r| r.order);
        }

        if let Some(limit) = options.limit {
            results.truncate(limit);
        }

        Ok(results)
    }

    pub fn retrieve(&mut self, query: &str, options: &RetrievalOptions) -> Result<Vec<RetrievalPack>> {
        retrieval::retrieve(self, query, options)
    }

    pub fn assemble_prompt(
        &self,
        question: &str,
        packs: &[RetrievalPack],
        options: &PromptOptions,
    ) -> AssembledPrompt {
        prompt::assemble_prompt(&self.manifest.id, question, packs, options)
    }
}
