//! Prompt assembler (C10).
//!
//! Formats retrieval packs into citation-annotated context blocks and
//! enforces a token-headroom budget, using `characterCount` as the token
//! estimate (`spec.md` §9). Grounded on the greedy budget-fill ordering in
//! `other_examples/41fb7121_redisun-ctx__crates-ctx_core-src-pack.rs.rs`.

use crate::types::{AssembledPrompt, Citation, PromptOptions, PromptStyle, RetrievalPack};

const QA_SYSTEM_PROMPT: &str = "You are a careful assistant that answers only from the supplied context. \
Every claim must be grounded in the numbered context blocks and cited with their markers. \
If the context is insufficient to answer, say so explicitly rather than guessing.";

const SUMMARIZE_SYSTEM_PROMPT: &str = "You are a careful assistant that writes concise, citable summaries \
of the supplied context. Every sentence must trace back to a numbered context block via its marker. \
Do not add information that is not present in the context.";

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

fn superscript(n: usize) -> String {
    n.to_string()
        .chars()
        .map(|c| SUPERSCRIPT_DIGITS[c.to_digit(10).unwrap() as usize])
        .collect()
}

fn marker(n: usize) -> String {
    format!("[{}]", superscript(n))
}

fn format_block(marker: &str, doc_id: &str, pack: &RetrievalPack) -> String {
    let mut block = format!("{marker}\nDoc: {doc_id}\n");
    if !pack.heading_path.is_empty() {
        block.push_str(&format!("Path: {}\n", pack.heading_path.join(" > ")));
    }
    block.push_str("---\n");
    block.push_str(&pack.text);
    block
}

/// Assemble a prompt from `packs`, already assumed ranked by the caller.
/// Stops accepting packs as soon as the running budget check fails;
/// dropped packs are always the lowest-ranked ones since input order is
/// the drop order.
pub fn assemble_prompt(doc_id: &str, question: &str, packs: &[RetrievalPack], options: &PromptOptions) -> AssembledPrompt {
    let system = match options.style {
        PromptStyle::Qa => QA_SYSTEM_PROMPT,
        PromptStyle::Summarize => SUMMARIZE_SYSTEM_PROMPT,
    }
    .to_string();

    let base_size = question.chars().count();
    let budget = options.max_prompt_tokens.saturating_sub(options.headroom_tokens);

    let mut accepted_blocks: Vec<String> = Vec::new();
    let mut citations = Vec::new();
    let mut total_chars = 0usize;

    for pack in packs {
        let index = accepted_blocks.len() + 1;
        let pack_marker = marker(index);
        let block = format_block(&pack_marker, doc_id, pack);
        let block_size = block.chars().count();

        if base_size + total_chars + block_size > budget {
            break;
        }

        total_chars += block_size;
        citations.push(Citation {
            marker: pack_marker,
            pack_id: pack.id.clone(),
            doc_id: doc_id.to_string(),
            heading_path: pack.heading_path.clone(),
            span_offsets: phrase_offsets(pack),
        });
        accepted_blocks.push(block);
    }

    let user = if accepted_blocks.is_empty() {
        question.to_string()
    } else {
        let reference_line = format!("You may reference [¹]…[{}].", superscript(accepted_blocks.len()));
        format!("{question}\n\n{reference_line}\n\n{}", accepted_blocks.join("\n\n"))
    };

    AssembledPrompt { system, user, citations }
}

fn phrase_offsets(pack: &RetrievalPack) -> Option<Vec<(usize, usize)>> {
    let ranges: Vec<(usize, usize)> = pack
        .entry
        .hits
        .phrases
        .iter()
        .flat_map(|hit| hit.ranges.iter().copied())
        .collect();
    if ranges.is_empty() {
        None
    } else {
        Some(ranges)
    }
}
