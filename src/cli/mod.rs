//! Command-line interface for kmer-lookup.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **find**: Report every offset where each query occurs
//! - **context**: Report the residues flanking each occurrence
//! - **index**: Build a k-mer index from a FASTA file and save it
//!
//! ## Usage
//!
//! ```text
//! # Find peptides in a proteome
//! kmer-lookup find proteome.fa SIINFEKL GILGFVFTL -k 5
//!
//! # Queries from a file, JSON output
//! kmer-lookup find proteome.fa --queries peptides.txt --format json
//!
//! # Build the index once, then search it repeatedly
//! kmer-lookup index proteome.fa -k 5 -o proteome.kidx.gz
//! kmer-lookup find proteome.kidx.gz SIINFEKL
//!
//! # Flanking context, 8 residues on each side
//! kmer-lookup context proteome.fa SIINFEKL -k 5 -u 8 -d 8
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::index::kmer::{IndexConfig, WindowMode, DEFAULT_KMER_SIZE};
use crate::matching::engine::{ChainBreak, MatchingConfig};
use crate::parsing;

pub mod context;
pub mod find;
pub mod index;

#[derive(Parser)]
#[command(name = "kmer-lookup")]
#[command(version)]
#[command(about = "Find exact subsequence occurrences with a k-mer seed index")]
#[command(
    long_about = "kmer-lookup finds every exact occurrence of query subsequences in a set of reference sequences.\n\nQueries are seeded on their first k-mer and extended one k-mer at a time, so queries may be any length of at least k. Flanking context around each hit can be reported, padded with '-' to a fixed width."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find every occurrence of each query
    Find(find::FindArgs),

    /// Report flanking context around each occurrence
    Context(context::ContextArgs),

    /// Build a k-mer index and save it
    Index(index::IndexArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Query sources shared by `find` and `context`
#[derive(clap::Args)]
pub struct QueryArgs {
    /// Query sequences
    pub queries: Vec<String>,

    /// File of queries (one per line, or FASTA); '-' reads stdin
    #[arg(short = 'q', long = "queries")]
    pub queries_file: Option<PathBuf>,
}

impl QueryArgs {
    /// All queries from the command line followed by those from the file
    pub fn collect(&self) -> anyhow::Result<Vec<Vec<u8>>> {
        let mut queries: Vec<Vec<u8>> = self
            .queries
            .iter()
            .map(|q| q.as_bytes().to_vec())
            .collect();

        if let Some(path) = &self.queries_file {
            queries.extend(parsing::queries::read_queries(path)?);
        }

        if queries.is_empty() {
            anyhow::bail!("No queries given: pass query sequences or --queries <FILE>");
        }

        Ok(queries)
    }
}

/// Index and matching options shared by `find` and `context`
#[derive(clap::Args)]
pub struct MatchingArgs {
    /// K-mer size (defaults to 8, or the size stored in a saved index)
    #[arg(short = 'k', long = "kmer-size")]
    pub k: Option<usize>,

    /// Stop one window short of the end of sequences and queries, reproducing
    /// output of earlier versions
    #[arg(long)]
    pub legacy_windows: bool,

    /// When a query stops chaining part way, report the partial chain instead
    /// of no hit
    #[arg(long)]
    pub keep_partial_chains: bool,

    /// Return empty results instead of failing when the index has no k-mers
    #[arg(long)]
    pub allow_empty_index: bool,
}

impl MatchingArgs {
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            k: self.k.unwrap_or(DEFAULT_KMER_SIZE),
            window_mode: WindowMode::from_legacy(self.legacy_windows),
        }
    }

    pub fn matching_config(&self) -> MatchingConfig {
        MatchingConfig {
            chain_break: if self.keep_partial_chains {
                ChainBreak::KeepPrevious
            } else {
                ChainBreak::Discard
            },
            reject_empty_index: !self.allow_empty_index,
        }
    }
}
