use std::collections::{HashMap, HashSet};
use std::ops::Range;

use tracing::debug;

use crate::core::error::LookupError;
use crate::core::types::MatchResult;
use crate::index::kmer::{KmerIndex, Postings, WindowMode};

/// What survives when a later window fails to extend any candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChainBreak {
    /// The chain is broken, so the query does not occur
    #[default]
    Discard,
    /// Keep the candidates of the last window that did extend.
    ///
    /// This is the historical behaviour and can report occurrences of a
    /// prefix of the query as if they were occurrences of the whole query.
    KeepPrevious,
}

/// Configuration for the subsequence matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingConfig {
    pub chain_break: ChainBreak,
    /// Fail with `LookupError::EmptyIndex` instead of returning empty results
    pub reject_empty_index: bool,
}

impl MatchingConfig {
    /// Configuration reproducing the historical chaining behaviour
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            chain_break: ChainBreak::KeepPrevious,
            ..Self::default()
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            chain_break: ChainBreak::default(),
            reject_empty_index: true,
        }
    }
}

/// Finds exact occurrences of queries by seeding on the first k-mer and
/// chaining each following k-mer one residue further along.
#[derive(Debug, Clone, Copy)]
pub struct SubsequenceMatcher<'a> {
    index: &'a KmerIndex,
    config: MatchingConfig,
}

impl<'a> SubsequenceMatcher<'a> {
    /// Create a new matcher with default configuration
    pub fn new(index: &'a KmerIndex) -> Self {
        Self {
            index,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matcher with custom configuration
    pub fn with_config(index: &'a KmerIndex, config: MatchingConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &'a KmerIndex {
        self.index
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Find every offset at which `query` occurs.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::QueryTooShort` if the query is shorter than k, or
    /// `LookupError::EmptyIndex` if the index holds no k-mers and the
    /// configuration rejects empty indexes.
    pub fn find(&self, query: impl AsRef<[u8]>) -> Result<MatchResult, LookupError> {
        let query = query.as_ref();
        let k = self.index.k();

        if self.config.reject_empty_index && self.index.is_empty() {
            return Err(LookupError::EmptyIndex);
        }
        if query.len() < k {
            return Err(LookupError::query_too_short(query, k));
        }

        // Step 1: seed on the first k-mer
        let Some(seed) = self.index.postings(&query[..k]) else {
            return Ok(MatchResult::new());
        };
        let mut hits: Postings = seed.clone();

        // Step 2: chain each following window onto the previous one
        let windows = chain_windows(self.index.window_mode(), query.len(), k);
        let mut chained_to = 0;
        for i in windows {
            let new_hits = self.extend(&hits, &query[i..i + k]);
            if new_hits.is_empty() {
                debug!(window = i, "chain broken");
                if self.config.chain_break == ChainBreak::Discard {
                    hits.clear();
                }
                break;
            }
            hits = new_hits;
            chained_to = i;
        }

        // Step 3: offsets are those of the last chained window, shift back to the query start
        let shift = query.len() - k;
        let mut result = MatchResult::new();
        for (ordinal, offsets) in hits {
            for offset in offsets {
                if let Some(start) = offset.checked_sub(shift) {
                    result.insert(self.index.sequence_id(ordinal).clone(), start);
                }
            }
        }

        debug!(
            query_len = query.len(),
            last_window = chained_to,
            occurrences = result.total(),
            "searched query"
        );

        Ok(result)
    }

    /// Occurrences of `kmer` that start one residue after a surviving candidate
    fn extend(&self, hits: &Postings, kmer: &[u8]) -> Postings {
        let mut new_hits: Postings = HashMap::new();

        let Some(postings) = self.index.postings(kmer) else {
            return new_hits;
        };

        for (ordinal, offsets) in postings {
            let Some(previous) = hits.get(ordinal) else {
                continue;
            };
            let extended: HashSet<usize> = offsets
                .iter()
                .copied()
                .filter(|&offset| offset > 0 && previous.contains(&(offset - 1)))
                .collect();
            if !extended.is_empty() {
                new_hits.insert(*ordinal, extended);
            }
        }

        new_hits
    }
}

/// Query windows chained after the seed
fn chain_windows(mode: WindowMode, query_len: usize, k: usize) -> Range<usize> {
    let starts = mode.window_starts(query_len, k);
    1.min(starts.end)..starts.end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequences::SequenceCollection;
    use crate::core::types::SequenceId;
    use crate::index::kmer::IndexConfig;

    fn make_sequences() -> SequenceCollection {
        vec![("a", "xxxABCyyy"), ("b", "!!ABC$$")]
            .into_iter()
            .collect()
    }

    fn hits(result: &MatchResult) -> Vec<(String, usize)> {
        result.iter().map(|(id, o)| (id.0.clone(), o)).collect()
    }

    #[test]
    fn test_chain_windows() {
        assert_eq!(chain_windows(WindowMode::Inclusive, 3, 3), 1..1);
        assert_eq!(chain_windows(WindowMode::Inclusive, 6, 3), 1..4);
        assert_eq!(chain_windows(WindowMode::Exclusive, 3, 3), 0..0);
        assert_eq!(chain_windows(WindowMode::Exclusive, 4, 3), 1..1);
        assert_eq!(chain_windows(WindowMode::Exclusive, 6, 3), 1..3);
    }

    #[test]
    fn test_find_query_equal_to_k() {
        let sequences = make_sequences();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let matcher = SubsequenceMatcher::new(&index);

        let result = matcher.find("ABC").unwrap();
        assert_eq!(
            hits(&result),
            vec![("a".to_string(), 3), ("b".to_string(), 2)]
        );
    }

    #[test]
    fn test_find_query_longer_than_k() {
        let sequences: SequenceCollection =
            vec![("s", "GATTACAGATTACA"), ("t", "TTACAG")].into_iter().collect();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let matcher = SubsequenceMatcher::new(&index);

        let result = matcher.find("ATTACA").unwrap();
        assert_eq!(hits(&result), vec![("s".to_string(), 1), ("s".to_string(), 8)]);

        let result = matcher.find("TTACAG").unwrap();
        assert_eq!(hits(&result), vec![("s".to_string(), 2), ("t".to_string(), 0)]);
    }

    #[test]
    fn test_find_at_sequence_end() {
        let sequences: SequenceCollection = vec![("s", "AACCGGTT")].into_iter().collect();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let matcher = SubsequenceMatcher::new(&index);

        assert_eq!(hits(&matcher.find("GGTT").unwrap()), vec![("s".to_string(), 4)]);
        assert_eq!(hits(&matcher.find("GTT").unwrap()), vec![("s".to_string(), 5)]);
        assert_eq!(
            hits(&matcher.find("AACCGGTT").unwrap()),
            vec![("s".to_string(), 0)]
        );
    }

    #[test]
    fn test_unknown_query_is_empty() {
        let sequences = make_sequences();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let matcher = SubsequenceMatcher::new(&index);

        assert!(matcher.find("DOES_NOT_OCCUR").unwrap().is_empty());
    }

    #[test]
    fn test_query_too_short() {
        let sequences = make_sequences();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let matcher = SubsequenceMatcher::new(&index);

        let err = matcher.find("AB").unwrap_err();
        assert_eq!(
            err,
            LookupError::QueryTooShort {
                query: "AB".to_string(),
                k: 3
            }
        );
    }

    #[test]
    fn test_empty_index() {
        let sequences: SequenceCollection = vec![("s", "AC")].into_iter().collect();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();

        let strict = SubsequenceMatcher::new(&index);
        assert_eq!(strict.find("ACG").unwrap_err(), LookupError::EmptyIndex);

        let lenient = SubsequenceMatcher::with_config(
            &index,
            MatchingConfig {
                reject_empty_index: false,
                ..MatchingConfig::default()
            },
        );
        assert!(lenient.find("ACG").unwrap().is_empty());
    }

    #[test]
    fn test_partial_chain_discarded() {
        // "ABCD" occurs, "ABCDQ" does not: the last window "CDQ" breaks the chain
        let sequences: SequenceCollection = vec![("s", "xxABCDEFyy")].into_iter().collect();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let matcher = SubsequenceMatcher::new(&index);

        assert!(matcher.find("ABCDQ").unwrap().is_empty());
        assert!(matcher.find("ABCDQQQ").unwrap().is_empty());
    }

    #[test]
    fn test_partial_chain_kept_previous() {
        let sequences: SequenceCollection = vec![("s", "xxABCDEFyy")].into_iter().collect();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let matcher = SubsequenceMatcher::with_config(
            &index,
            MatchingConfig {
                chain_break: ChainBreak::KeepPrevious,
                ..MatchingConfig::default()
            },
        );

        // "ABCDQQQ": windows ABC@2, BCD@3, then CDQ breaks; hits stay at 3.
        // Shifting by len - k = 4 underflows, so nothing is reported.
        assert!(matcher.find("ABCDQQQ").unwrap().is_empty());

        // "xxABCDQ": windows xxA@0, xAB@1, ABC@2, BCD@3, then CDQ breaks.
        // The stale window offset 3 minus shift 4 underflows as well.
        assert!(matcher.find("xxABCDQ").unwrap().is_empty());

        // Longer sequence so the stale offset survives the shift
        let sequences: SequenceCollection =
            vec![("s", "ABCDEFGHIJKLMNOP")].into_iter().collect();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let matcher = SubsequenceMatcher::with_config(&index, MatchingConfig::legacy());

        // "IJKLQ": IJK@8, JKL@9, KLQ breaks; 9 - (5 - 3) = 7 is reported
        // even though "IJKLQ" does not occur.
        assert_eq!(
            hits(&matcher.find("IJKLQ").unwrap()),
            vec![("s".to_string(), 7)]
        );
    }

    #[test]
    fn test_legacy_windows_shift_longer_queries() {
        let sequences: SequenceCollection =
            vec![("s", "xxxxABCDEFGxxxx")].into_iter().collect();
        let index = KmerIndex::build(&sequences, IndexConfig::legacy(3)).unwrap();
        let matcher = SubsequenceMatcher::with_config(&index, MatchingConfig::legacy());

        // Query of length k: no chaining, offset exact
        assert_eq!(hits(&matcher.find("ABC").unwrap()), vec![("s".to_string(), 4)]);

        // Longer queries: the final window is never chained, so the reported
        // offset lands one residue before the true start
        assert_eq!(hits(&matcher.find("ABCD").unwrap()), vec![("s".to_string(), 3)]);
        assert_eq!(
            hits(&matcher.find("ABCDEFG").unwrap()),
            vec![("s".to_string(), 3)]
        );
    }

    #[test]
    fn test_legacy_misses_final_window() {
        let sequences: SequenceCollection = vec![("s", "xxxxABC")].into_iter().collect();
        let index = KmerIndex::build(&sequences, IndexConfig::legacy(3)).unwrap();
        let matcher = SubsequenceMatcher::with_config(&index, MatchingConfig::legacy());

        assert!(matcher.find("ABC").unwrap().is_empty());
        assert_eq!(hits(&matcher.find("xAB").unwrap()), vec![("s".to_string(), 3)]);
    }

    #[test]
    fn test_legacy_offset_at_sequence_start_is_dropped() {
        let sequences: SequenceCollection = vec![("s", "ABCDxx")].into_iter().collect();
        let index = KmerIndex::build(&sequences, IndexConfig::legacy(3)).unwrap();
        let matcher = SubsequenceMatcher::with_config(&index, MatchingConfig::legacy());

        // True start 0 would be reported as -1
        assert!(matcher.find("ABCD").unwrap().is_empty());
    }

    #[test]
    fn test_find_is_idempotent() {
        let sequences = make_sequences();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let matcher = SubsequenceMatcher::new(&index);

        let first = matcher.find("ABC").unwrap();
        let second = matcher.find("ABC").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.offsets(&SequenceId::new("a")).map(|o| o.len()),
            Some(1)
        );
    }
}
