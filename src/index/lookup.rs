use crate::core::error::LookupError;
use crate::core::sequences::SequenceCollection;
use crate::core::types::MatchResult;
use crate::index::kmer::{IndexConfig, KmerIndex};
use crate::matching::context::{ContextConfig, ContextGenerator};
use crate::matching::engine::{MatchingConfig, SubsequenceMatcher};

/// Whether the k-mer index has been built yet
#[derive(Debug, Clone, Default)]
pub enum IndexState {
    #[default]
    Unbuilt,
    Built(KmerIndex),
}

/// Sequences paired with a k-mer index that is built on request.
///
/// Searching before [`SequenceLookup::index`] fails with
/// `LookupError::IndexNotBuilt`.
#[derive(Debug, Clone)]
pub struct SequenceLookup {
    sequences: SequenceCollection,
    config: IndexConfig,
    state: IndexState,
}

impl SequenceLookup {
    /// Save the arguments; no index is built until [`Self::index`]
    #[must_use]
    pub fn new(sequences: SequenceCollection, config: IndexConfig) -> Self {
        Self {
            sequences,
            config,
            state: IndexState::Unbuilt,
        }
    }

    /// Build the k-mer index over the stored sequences.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::InvalidParameter` if k is zero.
    pub fn index(&mut self) -> Result<&mut Self, LookupError> {
        let index = KmerIndex::build(&self.sequences, self.config)?;
        self.state = IndexState::Built(index);
        Ok(self)
    }

    #[must_use]
    pub fn is_indexed(&self) -> bool {
        matches!(self.state, IndexState::Built(_))
    }

    pub fn state(&self) -> &IndexState {
        &self.state
    }

    pub fn sequences(&self) -> &SequenceCollection {
        &self.sequences
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The built index.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::IndexNotBuilt` before [`Self::index`] has run.
    pub fn kmer_index(&self) -> Result<&KmerIndex, LookupError> {
        match &self.state {
            IndexState::Built(index) => Ok(index),
            IndexState::Unbuilt => Err(LookupError::IndexNotBuilt),
        }
    }

    /// Matcher over the built index.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::IndexNotBuilt` before [`Self::index`] has run.
    pub fn matcher(&self, config: MatchingConfig) -> Result<SubsequenceMatcher<'_>, LookupError> {
        Ok(SubsequenceMatcher::with_config(self.kmer_index()?, config))
    }

    /// Context generator over the built index and the stored sequences.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::IndexNotBuilt` before [`Self::index`] has run.
    pub fn context_generator(
        &self,
        matching: MatchingConfig,
        context: ContextConfig,
    ) -> Result<ContextGenerator<'_>, LookupError> {
        Ok(ContextGenerator::new(
            self.matcher(matching)?,
            &self.sequences,
            context,
        ))
    }

    /// Find occurrences of `query` with the default matching configuration.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::IndexNotBuilt`, `LookupError::EmptyIndex` or
    /// `LookupError::QueryTooShort`.
    pub fn find_occurrences(&self, query: impl AsRef<[u8]>) -> Result<MatchResult, LookupError> {
        self.matcher(MatchingConfig::default())?.find(query)
    }
}
