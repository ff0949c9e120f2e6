//! K-mer index construction, persistence and the build-on-demand lookup.
//!
//! The index maps every k-length window of every sequence to the sequences and
//! start offsets where it occurs. It is built once and never modified.
//!
//! ## Window bound
//!
//! [`WindowMode::Inclusive`](kmer::WindowMode::Inclusive) indexes every window.
//! [`WindowMode::Exclusive`](kmer::WindowMode::Exclusive) stops one window short
//! of the end of each sequence, matching output produced by earlier versions of
//! this lookup. The mode is stored in the index so queries are chained with the
//! same bound.
//!
//! ## Example
//!
//! ```rust,no_run
//! use kmer_lookup::index::store::{load_index, save_index};
//! use kmer_lookup::{IndexConfig, KmerIndex, SequenceCollection};
//! use std::path::Path;
//!
//! let sequences: SequenceCollection = vec![("chr1", "ACGTACGTTTGA")].into_iter().collect();
//! let index = KmerIndex::build(&sequences, IndexConfig::new(4)).unwrap();
//!
//! save_index(&index, Path::new("refs.kidx.gz")).unwrap();
//! let loaded = load_index(Path::new("refs.kidx.gz")).unwrap();
//! assert_eq!(loaded.k(), 4);
//! ```

pub mod kmer;
pub mod lookup;
pub mod store;
