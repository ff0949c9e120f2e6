use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier of a sequence in a [`SequenceCollection`](super::sequences::SequenceCollection)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceId(pub String);

impl SequenceId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SequenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SequenceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SequenceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Exact occurrences of a query, keyed by sequence.
///
/// Sequences without any occurrence are never present, so an empty result
/// means the query was not found anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    hits: BTreeMap<SequenceId, BTreeSet<usize>>,
}

impl MatchResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence of the query at `offset` within `id`
    pub fn insert(&mut self, id: SequenceId, offset: usize) {
        self.hits.entry(id).or_default().insert(offset);
    }

    /// Offsets for a single sequence, if it has any
    #[must_use]
    pub fn offsets(&self, id: &SequenceId) -> Option<&BTreeSet<usize>> {
        self.hits.get(id)
    }

    /// Sequence ids that contain at least one occurrence
    pub fn sequence_ids(&self) -> impl Iterator<Item = &SequenceId> {
        self.hits.keys()
    }

    /// Flatten into `(id, offset)` pairs ordered by id, then offset
    pub fn iter(&self) -> impl Iterator<Item = (&SequenceId, usize)> {
        self.hits
            .iter()
            .flat_map(|(id, offsets)| offsets.iter().map(move |&offset| (id, offset)))
    }

    /// Total number of occurrences across all sequences
    #[must_use]
    pub fn total(&self) -> usize {
        self.hits.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Borrow the underlying id -> offsets mapping
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<SequenceId, BTreeSet<usize>> {
        &self.hits
    }
}

impl FromIterator<(SequenceId, usize)> for MatchResult {
    fn from_iter<I: IntoIterator<Item = (SequenceId, usize)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (id, offset) in iter {
            result.insert(id, offset);
        }
        result
    }
}

/// Flanking residues around one occurrence of a query
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SequenceContext {
    pub sequence_id: SequenceId,
    pub offset: usize,
    pub upstream: String,
    pub downstream: String,
}

impl SequenceContext {
    pub fn new(
        sequence_id: impl Into<SequenceId>,
        offset: usize,
        upstream: impl Into<String>,
        downstream: impl Into<String>,
    ) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            offset,
            upstream: upstream.into(),
            downstream: downstream.into(),
        }
    }
}
