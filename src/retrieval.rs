//! Retrieval-pack builder (C9).
//!
//! Expands search hits into merged, deduplicated, budget-constrained
//! context blocks. Grounded on the greedy token-budget fill used by
//! `other_examples/41fb7121_redisun-ctx__crates-ctx_core-src-pack.rs.rs`'s
//! `build_pack`/`estimate_tokens` pair, adapted here to the spec's
//! character-count proxy and neighbors/section expansion modes.

use std::collections::HashMap;

use crate::contracts;
use crate::error::Result;
use crate::reader::Reader;
use crate::types::{
    ExpandMode, PackMeta, PackScope, RetrievalOptions, RetrievalPack, RetrievalPackEntry, SearchOptions,
};

struct Expansion {
    pack_id: String,
    scope: PackScope,
    heading_path: Vec<String>,
    paragraph_ids: Vec<String>,
    entry: RetrievalPackEntry,
}

pub fn retrieve(reader: &mut Reader, query: &str, options: &RetrievalOptions) -> Result<Vec<RetrievalPack>> {
    let oversampled = reader.search(
        query,
        &SearchOptions {
            limit: Some(options.limit * 4),
            rank: options.rank,
            fuzzy: None,
            hybrid: None,
        },
    )?;

    let entries: Vec<RetrievalPackEntry> = oversampled
        .into_iter()
        .map(|result| RetrievalPackEntry {
            span_id: result.span_id.clone(),
            order: result.order,
            score: result.score,
            heading_path: reader.span(&result.span_id).map(|s| s.heading_path.clone()).unwrap_or_default(),
            hits: result.hits,
        })
        .collect();

    let expansions: Vec<Expansion> = entries
        .into_iter()
        .map(|entry| expand_entry(reader, entry, options))
        .collect();

    let merged = merge_dedupe(expansions);

    let mut packs: Vec<RetrievalPack> = merged
        .into_iter()
        .filter_map(|expansion| materialize(reader, expansion))
        .collect();

    packs.sort_by(|a, b| {
        b.entry
            .score
            .partial_cmp(&a.entry.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.entry.order.cmp(&b.entry.order))
    });

    let budgeted = apply_budget(packs, options.limit, options.max_tokens);

    let ids: Vec<&str> = budgeted.iter().map(|p| p.id.as_str()).collect();
    contracts::check_unique_pack_ids(&ids);

    Ok(budgeted)
}

fn expand_entry(reader: &Reader, entry: RetrievalPackEntry, options: &RetrievalOptions) -> Expansion {
    if matches!(options.expand, ExpandMode::Section) {
        if let Some(expansion) = expand_section(reader, &entry) {
            return expansion;
        }
    }
    expand_neighbors(reader, entry, options.per_hit_neighbors)
}

fn expand_neighbors(reader: &Reader, entry: RetrievalPackEntry, per_hit_neighbors: usize) -> Expansion {
    let last_order = reader.span_count().saturating_sub(1);
    let start = entry.order.saturating_sub(per_hit_neighbors);
    let end = (entry.order + per_hit_neighbors).min(last_order);

    let paragraph_ids: Vec<String> = (start..=end)
        .filter_map(|order| reader.span_by_order(order).map(|s| s.id.clone()))
        .collect();

    Expansion {
        pack_id: format!("o:{start}-{end}"),
        scope: PackScope::Neighbors { start, end },
        heading_path: entry.heading_path.clone(),
        paragraph_ids,
        entry,
    }
}

fn expand_section(reader: &Reader, entry: &RetrievalPackEntry) -> Option<Expansion> {
    let section_id = reader.section_id_for_span(&entry.span_id)?;
    let paragraph_ids = reader.section_paragraph_ids(&section_id)?.clone();
    let heading = reader.section_heading(&section_id).unwrap_or_default();
    let heading_path = if let Some(stripped) = heading.strip_prefix('#') {
        let text = stripped.trim_start_matches('#').trim();
        if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        }
    } else {
        Vec::new()
    };

    Some(Expansion {
        pack_id: format!("s:{section_id}"),
        scope: PackScope::Section { section_id },
        heading_path,
        paragraph_ids,
        entry: entry.clone(),
    })
}

fn merge_dedupe(expansions: Vec<Expansion>) -> Vec<Expansion> {
    let mut groups: HashMap<String, Expansion> = HashMap::new();
    for expansion in expansions {
        match groups.remove(&expansion.pack_id) {
            Some(mut existing) => {
                let keep_new = expansion.entry.score > existing.entry.score
                    || (expansion.entry.score == existing.entry.score && expansion.entry.order < existing.entry.order);

                for id in &expansion.paragraph_ids {
                    if !existing.paragraph_ids.contains(id) {
                        existing.paragraph_ids.push(id.clone());
                    }
                }
                existing.paragraph_ids.sort_by_key(|id| order_suffix(id));

                if keep_new {
                    existing.scope = expansion.scope;
                    existing.heading_path = expansion.heading_path;
                    existing.entry = expansion.entry;
                }
                groups.insert(existing.pack_id.clone(), existing);
            }
            None => {
                groups.insert(expansion.pack_id.clone(), expansion);
            }
        }
    }
    groups.into_values().collect()
}

/// Document-order key extracted from a `span:NNNNNN` id. Falls back to the
/// id's natural ordering when it doesn't match the convention.
fn order_suffix(span_id: &str) -> u64 {
    span_id
        .rsplit(':')
        .next()
        .and_then(|suffix| suffix.parse().ok())
        .unwrap_or(0)
}

fn materialize(reader: &Reader, expansion: Expansion) -> Option<RetrievalPack> {
    let mut texts = Vec::with_capacity(expansion.paragraph_ids.len());
    for id in &expansion.paragraph_ids {
        texts.push(reader.span(id)?.text.clone());
    }
    let text = texts.join("\n\n");
    let meta = PackMeta {
        span_count: expansion.paragraph_ids.len(),
        char_count: text.chars().count(),
    };

    Some(RetrievalPack {
        id: expansion.pack_id,
        scope: expansion.scope,
        heading_path: expansion.heading_path,
        paragraph_ids: expansion.paragraph_ids,
        text,
        meta,
        entry: expansion.entry,
    })
}

fn apply_budget(packs: Vec<RetrievalPack>, limit: usize, max_tokens: Option<usize>) -> Vec<RetrievalPack> {
    let mut accepted = Vec::new();
    let mut running_chars = 0usize;
    for pack in packs {
        if accepted.len() >= limit {
            break;
        }
        if let Some(max) = max_tokens {
            if running_chars + pack.meta.char_count > max {
                break;
            }
        }
        running_chars += pack.meta.char_count;
        accepted.push(pack);
    }
    contracts::check_budget(running_chars, max_tokens);
    accepted
}
