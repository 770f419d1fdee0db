//! `spanread` CLI: build, search, and inspect compiled corpora.
//!
//! ```bash
//! spanread build --input doc.md --output ./out
//! spanread search ./out "section two" --rank tfidf
//! spanread inspect ./out
//! ```

use std::path::Path;

use clap::Parser;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use spanread::build::{self, SourceFormat};
use spanread::reader::Reader;
use spanread::types::{FuzzyOptions, RankMode, SearchOptions};

mod cli;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { input, output, title, format } => run_build(&input, &output, title.as_deref(), format.as_deref()),
        Commands::Search { directory, queries, limit, rank, fuzzy } => {
            run_search(&directory, &queries, limit, &rank, fuzzy)
        }
        Commands::Inspect { directory } => run_inspect(&directory),
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

fn run_build(input: &str, output: &str, title: Option<&str>, format: Option<&str>) -> Result<(), String> {
    let forced_format = match format {
        Some("markdown") => Some(SourceFormat::Markdown),
        Some("text") => Some(SourceFormat::Text),
        _ => None,
    };
    build::run_build(Path::new(input), Path::new(output), title, forced_format).map_err(|e| e.to_string())?;
    eprintln!("build complete: {output}");
    Ok(())
}

fn run_search(directory: &str, queries: &[String], limit: Option<usize>, rank: &str, fuzzy: bool) -> Result<(), String> {
    let rank_mode = match rank {
        "none" => RankMode::None,
        "hybrid" => RankMode::Hybrid,
        _ => RankMode::Tfidf,
    };
    let fuzzy_options = fuzzy.then(|| FuzzyOptions { enabled: true, ..FuzzyOptions::default() });

    let run_one = |query: &String| -> Result<String, String> {
        let mut reader = Reader::open(Path::new(directory)).map_err(|e| e.to_string())?;
        let options = SearchOptions { limit, rank: rank_mode, fuzzy: fuzzy_options, hybrid: None };
        let results = reader.search(query, &options).map_err(|e| e.to_string())?;
        let mut out = format!("query: {query}\n");
        for result in results {
            out.push_str(&format!("  {} (order {}, score {:.4})\n", result.span_id, result.order, result.score));
        }
        Ok(out)
    };

    #[cfg(feature = "parallel")]
    let outputs: Vec<Result<String, String>> = queries.par_iter().map(run_one).collect();
    #[cfg(not(feature = "parallel"))]
    let outputs: Vec<Result<String, String>> = queries.iter().map(run_one).collect();

    for output in outputs {
        print!("{}", output?);
    }
    Ok(())
}

fn run_inspect(directory: &str) -> Result<(), String> {
    let reader = Reader::open(Path::new(directory)).map_err(|e| e.to_string())?;
    let manifest = reader.manifest();
    println!("corpus: {} ({})", manifest.title, manifest.id);
    println!("format: {}  spans: {}", manifest.format, manifest.span_count);
    println!("created: {}", manifest.created_at);
    if let Some(report) = reader.build_report() {
        println!(
            "lengths: min={} p50={} max={}  warnings: short={} long={} duplicate={}",
            report.length_stats.min,
            report.length_stats.p50,
            report.length_stats.max,
            report.warnings.short_spans,
            report.warnings.long_spans,
            report.warnings.duplicate_text_spans
        );
    }
    Ok(())
}
