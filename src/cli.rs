//! CLI definitions for the `spanread` command-line interface.
//!
//! Three subcommands: `build` compiles a source document into the
//! four-artifact contract, `search` queries a compiled corpus, and
//! `inspect` prints a compiled corpus's manifest and build-report summary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "spanread", about = "Deterministic reader/retriever over pre-compiled document artifacts", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a source document into manifest.json, spans.jsonl,
    /// nodeMap.json, and buildReport.json.
    Build {
        /// Path to the source document.
        #[arg(short, long)]
        input: String,

        /// Output directory for the compiled artifacts.
        #[arg(short, long)]
        output: String,

        /// Corpus title; defaults to the input file's stem.
        #[arg(long)]
        title: Option<String>,

        /// Force the source format instead of detecting it by extension.
        #[arg(long, value_parser = ["markdown", "text"])]
        format: Option<String>,
    },

    /// Search a compiled corpus and print matching spans.
    Search {
        /// Path to the compiled corpus directory.
        directory: String,

        /// One or more search queries, run independently and printed in order.
        #[arg(required = true)]
        queries: Vec<String>,

        /// Maximum number of results per query.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Ranking mode.
        #[arg(long, value_parser = ["none", "tfidf", "hybrid"], default_value = "tfidf")]
        rank: String,

        /// Enable edit-distance-1 fuzzy matching.
        #[arg(long)]
        fuzzy: bool,
    },

    /// Print a compiled corpus's manifest and build report.
    Inspect {
        /// Path to the compiled corpus directory.
        directory: String,
    },
}
