//! # kmer-lookup
//!
//! A library for finding exact occurrences of query subsequences in a
//! collection of named reference sequences, with optional flanking context.
//!
//! Every k-length window of every reference sequence is indexed once. A query
//! of any length of at least k is then located by seeding on its first k-mer
//! and chaining each following k-mer that starts exactly one residue later in
//! the same sequence. There is no approximate matching, no gaps and no scoring.
//!
//! ## Example
//!
//! ```rust
//! use kmer_lookup::{
//!     ContextConfig, IndexConfig, MatchingConfig, SequenceCollection, SequenceLookup,
//! };
//!
//! let sequences: SequenceCollection = vec![("a", "xxxABCyyy"), ("b", "!!ABC$$")]
//!     .into_iter()
//!     .collect();
//!
//! let mut lookup = SequenceLookup::new(sequences, IndexConfig::new(3));
//! lookup.index().unwrap();
//!
//! let matches = lookup.find_occurrences("ABC").unwrap();
//! assert_eq!(matches.total(), 2);
//!
//! let config = ContextConfig { upstream: 4, downstream: 3, pad: true };
//! let generator = lookup
//!     .context_generator(MatchingConfig::default(), config)
//!     .unwrap();
//! for context in generator.sequence_contexts("ABC").unwrap() {
//!     println!("{} {} {} {}", context.sequence_id, context.offset, context.upstream, context.downstream);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sequence collections, identifiers, results and errors
//! - [`index`]: K-mer index construction, persistence and lookup
//! - [`matching`]: Seed-and-chain matcher and context extraction
//! - [`parsing`]: FASTA and query list loaders
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod index;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::error::LookupError;
pub use crate::core::sequences::SequenceCollection;
pub use crate::core::types::*;
pub use index::kmer::{IndexConfig, KmerIndex, WindowMode};
pub use index::lookup::{IndexState, SequenceLookup};
pub use matching::context::{ContextConfig, ContextGenerator};
pub use matching::engine::{ChainBreak, MatchingConfig, SubsequenceMatcher};
