use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ops::Range;

use tracing::debug;

use crate::core::error::LookupError;
use crate::core::sequences::SequenceCollection;
use crate::core::types::SequenceId;
use crate::utils::validation::validate_kmer_size;

/// Default k-mer size when none is given
pub const DEFAULT_KMER_SIZE: usize = 8;

/// Which sliding windows of length k are visited, in both sequences and queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Every window, including the one ending on the last residue
    #[default]
    Inclusive,
    /// Stops one window short of the end: start offsets `0..len - k`.
    ///
    /// Reproduces the historical lookup, which never indexed the final window of
    /// a sequence nor chained the final window of a query.
    Exclusive,
}

impl WindowMode {
    /// `Exclusive` when the historical bound was requested
    #[must_use]
    pub fn from_legacy(legacy: bool) -> Self {
        if legacy {
            Self::Exclusive
        } else {
            Self::Inclusive
        }
    }

    /// Start offsets of the windows of length `k` in a sequence of length `len`
    #[must_use]
    pub fn window_starts(self, len: usize, k: usize) -> Range<usize> {
        match self {
            Self::Inclusive if len >= k => 0..len - k + 1,
            Self::Inclusive => 0..0,
            Self::Exclusive => 0..len.saturating_sub(k),
        }
    }
}

/// Parameters fixed when an index is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    pub k: usize,
    pub window_mode: WindowMode,
}

impl IndexConfig {
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            window_mode: WindowMode::default(),
        }
    }

    /// Configuration reproducing the historical window bound
    #[must_use]
    pub fn legacy(k: usize) -> Self {
        Self {
            k,
            window_mode: WindowMode::Exclusive,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_KMER_SIZE)
    }
}

/// Offsets of one k-mer, grouped by sequence ordinal
pub(crate) type Postings = HashMap<usize, HashSet<usize>>;

/// Immutable mapping from k-mer to the positions where it starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KmerIndex {
    k: usize,
    window_mode: WindowMode,

    /// Sequence ordinal -> ID
    ids: Vec<SequenceId>,

    /// Index: k-mer -> sequence ordinal -> start offsets
    kmers: HashMap<Vec<u8>, Postings>,
}

impl KmerIndex {
    /// Build an index over every sequence in `sequences`.
    ///
    /// Sequences shorter than k (and, in [`WindowMode::Exclusive`], sequences of
    /// exactly k residues) contribute no k-mers.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::InvalidParameter` if `config.k` is zero.
    pub fn build(sequences: &SequenceCollection, config: IndexConfig) -> Result<Self, LookupError> {
        let k = validate_kmer_size(config.k)?;

        let mut ids = Vec::with_capacity(sequences.len());
        let mut kmers: HashMap<Vec<u8>, Postings> = HashMap::new();

        for (ordinal, (id, residues)) in sequences.iter().enumerate() {
            ids.push(id.clone());
            for i in config.window_mode.window_starts(residues.len(), k) {
                kmers
                    .entry(residues[i..i + k].to_vec())
                    .or_default()
                    .entry(ordinal)
                    .or_default()
                    .insert(i);
            }
        }

        let index = Self {
            k,
            window_mode: config.window_mode,
            ids,
            kmers,
        };

        debug!(
            k,
            window_mode = ?index.window_mode,
            sequences = index.ids.len(),
            distinct_kmers = index.len(),
            occurrences = index.total_occurrences(),
            "built k-mer index"
        );

        Ok(index)
    }

    /// All `(sequence id, start offset)` pairs where `kmer` occurs.
    ///
    /// Unknown k-mers, including those of the wrong length, yield an empty set.
    #[must_use]
    pub fn occurrences_of(&self, kmer: &[u8]) -> HashSet<(&SequenceId, usize)> {
        self.postings(kmer)
            .map(|postings| {
                postings
                    .iter()
                    .flat_map(|(&ordinal, offsets)| {
                        offsets.iter().map(move |&offset| (&self.ids[ordinal], offset))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check invariants that `build` guarantees but a decoded index may break:
    /// positive k, every key k residues long, every ordinal naming a sequence.
    pub(crate) fn check_consistency(&self) -> Result<(), String> {
        validate_kmer_size(self.k).map_err(|e| e.to_string())?;

        for (kmer, postings) in &self.kmers {
            if kmer.len() != self.k {
                return Err(format!(
                    "k-mer of length {} in an index with k = {}",
                    kmer.len(),
                    self.k
                ));
            }
            if let Some(&ordinal) = postings.keys().find(|&&o| o >= self.ids.len()) {
                return Err(format!(
                    "sequence ordinal {ordinal} out of range for {} sequences",
                    self.ids.len()
                ));
            }
        }

        Ok(())
    }

    pub(crate) fn postings(&self, kmer: &[u8]) -> Option<&Postings> {
        self.kmers.get(kmer)
    }

    pub(crate) fn sequence_id(&self, ordinal: usize) -> &SequenceId {
        &self.ids[ordinal]
    }

    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    #[must_use]
    pub fn window_mode(&self) -> WindowMode {
        self.window_mode
    }

    /// IDs of the indexed sequences, in build order
    #[must_use]
    pub fn sequence_ids(&self) -> &[SequenceId] {
        &self.ids
    }

    /// Number of distinct k-mers
    #[must_use]
    pub fn len(&self) -> usize {
        self.kmers.len()
    }

    /// True when no sequence contributed a k-mer
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kmers.is_empty()
    }

    /// Number of `(k-mer, sequence, offset)` entries
    #[must_use]
    pub fn total_occurrences(&self) -> usize {
        self.kmers
            .values()
            .flat_map(HashMap::values)
            .map(HashSet::len)
            .sum()
    }
}
