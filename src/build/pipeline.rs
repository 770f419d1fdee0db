//! Span splitting, heading detection, and node-map construction (C12).
//!
//! Spans are fragments of normalized text separated by runs of 2+
//! newlines. For Markdown sources, a fragment whose first line matches
//! `^#{1,3}\s+` is a heading: it contributes to the three-level heading
//! path every later span inherits, and itself gets the *parent* path.
//! Chapters come from H1, sections from H2; H3 only affects the heading
//! path, since the node-map schema has no third structural level.

use std::collections::HashMap;

use crate::build::source::SourceFormat;
use crate::types::{BookRef, NodeMap, SectionEntry, Span};

struct HeadingLine {
    level: u8,
    text: String,
}

fn detect_heading(fragment: &str) -> Option<HeadingLine> {
    let first_line = fragment.lines().next()?;
    let hashes = first_line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 3 {
        return None;
    }
    let rest = &first_line[hashes..];
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    Some(HeadingLine {
        level: hashes as u8,
        text: rest.trim().to_string(),
    })
}

/// Split on runs of 2+ newlines, trim each fragment, and drop empty ones.
fn split_fragments(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut blank_run = 0;
    for line in text.split('\n') {
        if line.trim().is_empty() {
            blank_run += 1;
        } else {
            if blank_run >= 1 && !current.is_empty() {
                fragments.push(current.trim().to_string());
                current = String::new();
            }
            blank_run = 0;
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.trim().is_empty() {
        fragments.push(current.trim().to_string());
    }
    fragments.into_iter().filter(|f| !f.is_empty()).collect()
}

pub struct SplitResult {
    pub spans: Vec<Span>,
    pub node_map: NodeMap,
}

/// Split `normalized_text` into spans and build the node map, following
/// the heading rules above for `format == Markdown`; for `format == Text`
/// every span is plain content under one synthetic chapter/section.
pub fn split(normalized_text: &str, format: SourceFormat, corpus_id: &str, title: &str) -> SplitResult {
    let fragments = split_fragments(normalized_text);

    let headings: Vec<Option<HeadingLine>> = fragments
        .iter()
        .map(|f| if format == SourceFormat::Markdown { detect_heading(f) } else { None })
        .collect();

    let has_structure = headings.iter().any(|h| matches!(h, Some(h) if h.level <= 2));

    if !has_structure {
        return whole_document_fallback(fragments, corpus_id, title);
    }

    build_structured(fragments, headings, corpus_id, title)
}

fn whole_document_fallback(fragments: Vec<String>, corpus_id: &str, title: &str) -> SplitResult {
    let chapter_id = format!("chap:{:06}", 1);
    let section_id = format!("sec:{:06}", 1);

    let mut spans = Vec::with_capacity(fragments.len());
    let mut paragraph_ids = Vec::with_capacity(fragments.len());
    for (i, text) in fragments.into_iter().enumerate() {
        let id = format!("span:{:06}", i + 1);
        paragraph_ids.push(id.clone());
        spans.push(Span { id, text, order: i, heading_path: Vec::new(), embedding: None });
    }

    let mut chapters = HashMap::new();
    chapters.insert(chapter_id.clone(), vec![section_id.clone()]);
    let mut sections = HashMap::new();
    sections.insert(section_id.clone(), SectionEntry { paragraph_ids: paragraph_ids.clone(), heading: title.to_string() });
    let mut paragraphs = HashMap::new();
    for id in &paragraph_ids {
        paragraphs.insert(id.clone(), section_id.clone());
    }

    SplitResult {
        spans,
        node_map: NodeMap {
            book: BookRef { id: corpus_id.to_string(), title: title.to_string() },
            chapters,
            sections,
            paragraphs,
        },
    }
}

fn build_structured(fragments: Vec<String>, headings: Vec<Option<HeadingLine>>, corpus_id: &str, title: &str) -> SplitResult {
    let mut spans = Vec::with_capacity(fragments.len());
    let mut chapters: HashMap<String, Vec<String>> = HashMap::new();
    let mut sections: HashMap<String, SectionEntry> = HashMap::new();
    let mut paragraphs: HashMap<String, String> = HashMap::new();

    let mut chapter_counter = 0u32;
    let mut section_counter = 0u32;
    let mut current_chapter: Option<String> = None;
    let mut current_section: Option<String> = None;
    let mut path: [Option<String>; 3] = [None, None, None];

    for (i, text) in fragments.into_iter().enumerate() {
        let id = format!("span:{:06}", i + 1);
        let order = i;

        match &headings[i] {
            Some(heading) if heading.level == 1 => {
                let parent_path = current_heading_path(&path);
                spans.push(Span { id: id.clone(), text, order, heading_path: parent_path, embedding: None });

                chapter_counter += 1;
                let chapter_id = format!("chap:{chapter_counter:06}");
                chapters.insert(chapter_id.clone(), Vec::new());
                current_chapter = Some(chapter_id.clone());
                current_section = None;

                path[0] = Some(heading.text.clone());
                path[1] = None;
                path[2] = None;

                let section_id = new_section(&mut chapters, &mut sections, &mut section_counter, &chapter_id, String::new());
                sections.get_mut(&section_id).unwrap().paragraph_ids.push(id.clone());
                paragraphs.insert(id, section_id.clone());
                current_section = Some(section_id);
            }
            Some(heading) if heading.level == 2 => {
                let parent_path = current_heading_path(&path);
                spans.push(Span { id: id.clone(), text, order, heading_path: parent_path, embedding: None });

                let chapter_id = ensure_chapter(&mut chapters, &mut chapter_counter, &mut current_chapter);
                let raw_heading = format!("{} {}", "#".repeat(heading.level as usize), heading.text);
                let section_id = new_section(&mut chapters, &mut sections, &mut section_counter, &chapter_id, raw_heading);
                sections.get_mut(&section_id).unwrap().paragraph_ids.push(id.clone());
                paragraphs.insert(id, section_id.clone());
                current_section = Some(section_id);

                path[1] = Some(heading.text.clone());
                path[2] = None;
            }
            Some(heading) => {
                // H3: affects the path only, still ordinary content for the node map.
                let current_path = current_heading_path(&path);
                spans.push(Span { id: id.clone(), text, order, heading_path: current_path, embedding: None });
                place_in_current_section(
                    &mut chapters,
                    &mut sections,
                    &mut chapter_counter,
                    &mut section_counter,
                    &mut current_chapter,
                    &mut current_section,
                    &id,
                    &mut paragraphs,
                );
                path[2] = Some(heading.text.clone());
            }
            None => {
                let current_path = current_heading_path(&path);
                spans.push(Span { id: id.clone(), text, order, heading_path: current_path, embedding: None });
                place_in_current_section(
                    &mut chapters,
                    &mut sections,
                    &mut chapter_counter,
                    &mut section_counter,
                    &mut current_chapter,
                    &mut current_section,
                    &id,
                    &mut paragraphs,
                );
            }
        }
    }

    SplitResult {
        spans,
        node_map: NodeMap {
            book: BookRef { id: corpus_id.to_string(), title: title.to_string() },
            chapters,
            sections,
            paragraphs,
        },
    }
}

fn ensure_chapter(
    chapters: &mut HashMap<String, Vec<String>>,
    counter: &mut u32,
    current_chapter: &mut Option<String>,
) -> String {
    if let Some(id) = current_chapter.clone() {
        return id;
    }
    *counter += 1;
    let id = format!("chap:{counter:06}");
    chapters.insert(id.clone(), Vec::new());
    *current_chapter = Some(id.clone());
    id
}

fn new_section(
    chapters: &mut HashMap<String, Vec<String>>,
    sections: &mut HashMap<String, SectionEntry>,
    section_counter: &mut u32,
    chapter_id: &str,
    heading: String,
) -> String {
    *section_counter += 1;
    let id = format!("sec:{section_counter:06}");
    sections.insert(id.clone(), SectionEntry { paragraph_ids: Vec::new(), heading });
    chapters.entry(chapter_id.to_string()).or_default().push(id.clone());
    id
}

#[allow(clippy::too_many_arguments)]
fn place_in_current_section(
    chapters: &mut HashMap<String, Vec<String>>,
    sections: &mut HashMap<String, SectionEntry>,
    chapter_counter: &mut u32,
    section_counter: &mut u32,
    current_chapter: &mut Option<String>,
    current_section: &mut Option<String>,
    span_id: &str,
    paragraphs: &mut HashMap<String, String>,
) {
    if current_section.is_none() {
        if current_chapter.is_none() {
            *chapter_counter += 1;
            let chapter_id = format!("chap:{chapter_counter:06}");
            chapters.insert(chapter_id.clone(), Vec::new());
            *current_chapter = Some(chapter_id);
        }
        let chapter_id = current_chapter.clone().unwrap();
        *section_counter += 1;
        let section_id = format!("sec:{section_counter:06}");
        sections.insert(section_id.clone(), SectionEntry { paragraph_ids: Vec::new(), heading: String::new() });
        chapters.entry(chapter_id).or_default().push(section_id.clone());
        *current_section = Some(section_id);
    }
    let section_id = current_section.clone().unwrap();
    sections.get_mut(&section_id).unwrap().paragraph_ids.push(span_id.to_string());
    paragraphs.insert(span_id.to_string(), section_id);
}

fn current_heading_path(path: &[Option<String>; 3]) -> Vec<String> {
    path.iter().filter_map(|p| p.clone()).collect()
}
