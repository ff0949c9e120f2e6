//! Loaders for reference sequences and query lists.
//!
//! - **FASTA files**: reference sequences, optionally gzip/bgzip compressed
//! - **Query lists**: one query per line, or a FASTA file of queries
//!
//! ## Example
//!
//! ```rust,no_run
//! use kmer_lookup::parsing::fasta::parse_fasta_file;
//! use kmer_lookup::parsing::queries::read_queries;
//! use std::path::Path;
//!
//! let sequences = parse_fasta_file(Path::new("proteome.fa.gz")).unwrap();
//! let queries = read_queries(Path::new("peptides.txt")).unwrap();
//! ```

use thiserror::Error;

pub mod fasta;
pub mod queries;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Duplicate sequence name: {0}")]
    DuplicateSequence(String),

    #[error("Too many sequences: {0} exceeds maximum allowed")]
    TooManySequences(usize),
}
