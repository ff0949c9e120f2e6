//! Exact subsequence search over a built k-mer index.
//!
//! - [`SubsequenceMatcher`]: finds every exact occurrence of a query
//! - [`ContextGenerator`]: reports the residues flanking each occurrence
//!
//! ## Matching Algorithm
//!
//! Queries must be at least k residues long.
//!
//! 1. **Seed**: the first k-mer of the query gives the candidate start offsets
//! 2. **Chain**: each following k-mer keeps only candidates whose previous
//!    window started exactly one residue earlier in the same sequence
//! 3. **Normalize**: surviving offsets are shifted back to the start of the query
//!
//! Offsets are stored as sets, so each chaining step is a constant-time
//! membership test per occurrence.
//!
//! ## Example
//!
//! ```rust
//! use kmer_lookup::{IndexConfig, KmerIndex, SequenceCollection, SubsequenceMatcher};
//!
//! let sequences: SequenceCollection = vec![("a", "xxxABCyyy"), ("b", "!!ABC$$")]
//!     .into_iter()
//!     .collect();
//! let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
//!
//! let matches = SubsequenceMatcher::new(&index).find("ABC").unwrap();
//! for (id, offset) in matches.iter() {
//!     println!("{id}\t{offset}");
//! }
//! ```

pub mod context;
pub mod engine;

pub use context::{ContextConfig, ContextGenerator};
pub use engine::{ChainBreak, MatchingConfig, SubsequenceMatcher};
