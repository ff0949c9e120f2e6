use std::collections::BTreeMap;

use tracing::warn;

use crate::core::error::LookupError;
use crate::core::sequences::SequenceCollection;
use crate::core::types::{MatchResult, SequenceContext};
use crate::matching::engine::SubsequenceMatcher;
use crate::utils::validation::{pad_left, pad_right};

/// Filler used when padding short flanks
pub const PAD_CHAR: u8 = b'-';

/// Default number of residues shown on each side of a hit
pub const DEFAULT_FLANK_LENGTH: usize = 10;

/// How much flanking sequence to report around each hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextConfig {
    /// Width the upstream flank is padded to
    pub upstream: usize,
    /// Width the downstream flank is padded to
    pub downstream: usize,
    /// Pad short flanks with [`PAD_CHAR`]; flanks are never truncated
    pub pad: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            upstream: DEFAULT_FLANK_LENGTH,
            downstream: DEFAULT_FLANK_LENGTH,
            pad: true,
        }
    }
}

/// Looks up queries and reports the sequence surrounding each occurrence
pub struct ContextGenerator<'a> {
    matcher: SubsequenceMatcher<'a>,
    sequences: &'a SequenceCollection,
    config: ContextConfig,
}

impl<'a> ContextGenerator<'a> {
    /// `sequences` must be the collection the matcher's index was built from
    pub fn new(
        matcher: SubsequenceMatcher<'a>,
        sequences: &'a SequenceCollection,
        config: ContextConfig,
    ) -> Self {
        Self {
            matcher,
            sequences,
            config,
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Contexts for every occurrence of `query`, ordered by sequence id then offset.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`SubsequenceMatcher::find`].
    pub fn sequence_contexts(
        &self,
        query: impl AsRef<[u8]>,
    ) -> Result<Vec<SequenceContext>, LookupError> {
        let query = query.as_ref();
        let matches = self.matcher.find(query)?;
        Ok(self.contexts(query, &matches))
    }

    /// Contexts for already located occurrences of `query`
    pub fn contexts(&self, query: &[u8], matches: &MatchResult) -> Vec<SequenceContext> {
        let mut contexts = Vec::with_capacity(matches.total());

        for (id, offset) in matches.iter() {
            let Some(sequence) = self.sequences.get(id) else {
                warn!(sequence_id = %id, "hit on a sequence missing from the collection");
                continue;
            };

            let (upstream, downstream) = flanks(sequence, offset, query.len(), &self.config);
            contexts.push(SequenceContext::new(
                id.clone(),
                offset,
                String::from_utf8_lossy(&upstream).into_owned(),
                String::from_utf8_lossy(&downstream).into_owned(),
            ));
        }

        contexts
    }

    /// Map each query to its contexts. Queries without hits map to an empty list.
    ///
    /// # Errors
    ///
    /// Fails on the first query that cannot be searched; no partial map is returned.
    pub fn sequence_contexts_by_query<I, Q>(
        &self,
        queries: I,
    ) -> Result<BTreeMap<String, Vec<SequenceContext>>, LookupError>
    where
        I: IntoIterator<Item = Q>,
        Q: AsRef<[u8]>,
    {
        let mut by_query = BTreeMap::new();
        for query in queries {
            let query = query.as_ref();
            let contexts = self.sequence_contexts(query)?;
            by_query.insert(String::from_utf8_lossy(query).into_owned(), contexts);
        }
        Ok(by_query)
    }
}

/// Residues before and after a hit of `query_len` residues at `offset`
fn flanks(
    sequence: &[u8],
    offset: usize,
    query_len: usize,
    config: &ContextConfig,
) -> (Vec<u8>, Vec<u8>) {
    let start = offset.min(sequence.len());
    let end = offset.saturating_add(query_len).min(sequence.len());

    let upstream = &sequence[..start];
    let downstream = &sequence[end..];

    if config.pad {
        (
            pad_left(upstream, config.upstream, PAD_CHAR),
            pad_right(downstream, config.downstream, PAD_CHAR),
        )
    } else {
        (upstream.to_vec(), downstream.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::kmer::{IndexConfig, KmerIndex};

    fn make_sequences() -> SequenceCollection {
        vec![("a", "xxxABCyyy"), ("b", "!!ABC$$")]
            .into_iter()
            .collect()
    }

    fn config(upstream: usize, downstream: usize, pad: bool) -> ContextConfig {
        ContextConfig {
            upstream,
            downstream,
            pad,
        }
    }

    #[test]
    fn test_sequence_contexts_padded() {
        let sequences = make_sequences();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let generator =
            ContextGenerator::new(SubsequenceMatcher::new(&index), &sequences, config(4, 3, true));

        let contexts = generator.sequence_contexts("ABC").unwrap();
        assert_eq!(
            contexts,
            vec![
                SequenceContext::new("a", 3, "-xxx", "yyy"),
                SequenceContext::new("b", 2, "--!!", "$$-"),
            ]
        );
    }

    #[test]
    fn test_sequence_contexts_unpadded() {
        let sequences = make_sequences();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let generator =
            ContextGenerator::new(SubsequenceMatcher::new(&index), &sequences, config(4, 3, false));

        let contexts = generator.sequence_contexts("ABC").unwrap();
        assert_eq!(
            contexts,
            vec![
                SequenceContext::new("a", 3, "xxx", "yyy"),
                SequenceContext::new("b", 2, "!!", "$$"),
            ]
        );
    }

    #[test]
    fn test_padding_never_truncates() {
        let (upstream, downstream) = flanks(b"0123456789ABC0123456789", 10, 3, &config(4, 2, true));
        assert_eq!(upstream, b"0123456789");
        assert_eq!(downstream, b"0123456789");
    }

    #[test]
    fn test_flanks_at_sequence_edges() {
        let (upstream, downstream) = flanks(b"ABC", 0, 3, &config(2, 2, true));
        assert_eq!(upstream, b"--");
        assert_eq!(downstream, b"--");

        let (upstream, downstream) = flanks(b"ABC", 0, 3, &config(2, 2, false));
        assert!(upstream.is_empty());
        assert!(downstream.is_empty());
    }

    #[test]
    fn test_sequence_contexts_by_query() {
        let sequences = make_sequences();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let generator =
            ContextGenerator::new(SubsequenceMatcher::new(&index), &sequences, config(4, 3, true));

        let by_query = generator
            .sequence_contexts_by_query(["ABC", "DOES_NOT_OCCUR"])
            .unwrap();

        assert_eq!(by_query.len(), 2);
        assert_eq!(by_query["ABC"].len(), 2);
        assert!(by_query["DOES_NOT_OCCUR"].is_empty());
    }

    #[test]
    fn test_sequence_contexts_by_query_propagates_errors() {
        let sequences = make_sequences();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let generator = ContextGenerator::new(
            SubsequenceMatcher::new(&index),
            &sequences,
            ContextConfig::default(),
        );

        let result = generator.sequence_contexts_by_query(["ABC", "AB"]);
        assert!(matches!(result, Err(LookupError::QueryTooShort { .. })));
    }

    #[test]
    fn test_hits_on_unknown_sequences_are_skipped() {
        let sequences = make_sequences();
        let index = KmerIndex::build(&sequences, IndexConfig::new(3)).unwrap();
        let other = SequenceCollection::new();
        let generator =
            ContextGenerator::new(SubsequenceMatcher::new(&index), &other, config(4, 3, true));

        assert!(generator.sequence_contexts("ABC").unwrap().is_empty());
    }
}
