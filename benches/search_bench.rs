//! Benchmarks for the compiled-corpus search and retrieval paths.
//!
//! Simulates a handful of corpus sizes:
//! - Small: ~20 spans   (a short note)
//! - Medium: ~200 spans (a chapter)
//! - Large: ~1000 spans (a book)
//!
//! Run with: cargo bench

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use spanread::embedding;
use spanread::lexical::LexicalIndex;
use spanread::scoring::TfidfRanker;
use spanread::tokenizer::tokenize;
use spanread::types::Span;

struct CorpusSize {
    name: &'static str,
    spans: usize,
}

const CORPUS_SIZES: &[CorpusSize] = &[
    CorpusSize { name: "small", spans: 20 },
    CorpusSize { name: "medium", spans: 200 },
    CorpusSize { name: "large", spans: 1000 },
];

const VOCABULARY: &[&str] = &[
    "rust", "search", "index", "retrieval", "section", "chapter", "paragraph", "token",
    "fuzzy", "score", "embedding", "hybrid", "lexical", "prompt", "citation", "manifest",
    "document", "corpus", "span", "phrase",
];

fn generate_span_text(word_count: usize, seed: usize) -> String {
    (0..word_count)
        .map(|i| VOCABULARY[(seed * 7 + i * 3) % VOCABULARY.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_corpus(size: &CorpusSize) -> Vec<Span> {
    (0..size.spans)
        .map(|i| Span {
            id: format!("span:{:06}", i + 1),
            text: generate_span_text(40, i),
            order: i,
            heading_path: vec![format!("Chapter {}", i / 10 + 1)],
            embedding: None,
        })
        .collect()
}

fn bench_lexical_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexical_index_build");
    for size in CORPUS_SIZES {
        let spans = generate_corpus(size);
        group.bench_with_input(BenchmarkId::from_parameter(size.name), &spans, |b, spans| {
            b.iter(|| LexicalIndex::build(black_box(spans)));
        });
    }
    group.finish();
}

fn bench_lexical_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexical_search");
    let size = &CORPUS_SIZES[1];
    let spans = generate_corpus(size);
    let index = LexicalIndex::build(&spans);

    let queries = ["rust", "rust search", "nonexistentterm", "fuzzy hybrid"];
    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, query| {
            b.iter(|| index.search(black_box(query), None));
        });
    }
    group.finish();
}

fn bench_tfidf_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf_rank");
    let size = &CORPUS_SIZES[1];
    let spans = generate_corpus(size);
    let index = LexicalIndex::build(&spans);
    let span_text: HashMap<String, String> = spans.iter().map(|s| (s.id.clone(), s.text.clone())).collect();
    let query_tokens = tokenize("rust search index");

    group.bench_function("rank_200_spans", |b| {
        b.iter(|| {
            let mut results = index.search_with_hits("rust search index", None, None);
            let mut ranker = TfidfRanker::new();
            ranker.rank_with_hits(black_box(&mut results), &query_tokens, &index, &span_text, 0.1);
            black_box(&results);
        });
    });
    group.finish();
}

fn bench_embedding(c: &mut Criterion) {
    let mut group = c.benchmark_group("embedding");
    let texts: Vec<String> = (0..50).map(|i| generate_span_text(40, i)).collect();

    group.bench_function("embed_50_spans", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(embedding::embed_text(black_box(text)));
            }
        });
    });
    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_scaling");
    for size in CORPUS_SIZES {
        let spans = generate_corpus(size);
        let index = LexicalIndex::build(&spans);
        group.bench_with_input(BenchmarkId::from_parameter(size.name), &index, |b, index| {
            b.iter(|| index.search(black_box("rust search"), None));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lexical_build, bench_lexical_search, bench_tfidf_rank, bench_embedding, bench_scaling);
criterion_main!(benches);
