//! Core data types shared by the index and the matcher.
//!
//! - [`SequenceCollection`](sequences::SequenceCollection): named reference sequences
//! - [`SequenceId`](types::SequenceId): identifier of one sequence
//! - [`MatchResult`](types::MatchResult): occurrences of a query, keyed by sequence
//! - [`SequenceContext`](types::SequenceContext): flanking residues around one occurrence
//! - [`LookupError`](error::LookupError): errors raised while building or searching
//!
//! Residues are single bytes. Sequences are usually ASCII nucleotide or amino
//! acid letters, but any byte is accepted and compared exactly (no case folding).

pub mod error;
pub mod sequences;
pub mod types;
