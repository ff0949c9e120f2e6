use std::collections::HashMap;

use crate::core::types::SequenceId;

/// Named reference sequences, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct SequenceCollection {
    ids: Vec<SequenceId>,
    sequences: Vec<Vec<u8>>,

    /// Index: sequence ID -> position in `ids`/`sequences`
    id_to_index: HashMap<SequenceId, usize>,
}

impl SequenceCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sequence, returning the one it replaced when the id already existed
    pub fn insert(
        &mut self,
        id: impl Into<SequenceId>,
        sequence: impl Into<Vec<u8>>,
    ) -> Option<Vec<u8>> {
        let id = id.into();
        let sequence = sequence.into();

        if let Some(&idx) = self.id_to_index.get(&id) {
            return Some(std::mem::replace(&mut self.sequences[idx], sequence));
        }

        self.id_to_index.insert(id.clone(), self.ids.len());
        self.ids.push(id);
        self.sequences.push(sequence);
        None
    }

    /// Get a sequence by ID
    #[must_use]
    pub fn get(&self, id: &SequenceId) -> Option<&[u8]> {
        self.id_to_index
            .get(id)
            .map(|&idx| self.sequences[idx].as_slice())
    }

    #[must_use]
    pub fn contains(&self, id: &SequenceId) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Iterate `(id, residues)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&SequenceId, &[u8])> {
        self.ids
            .iter()
            .zip(self.sequences.iter().map(Vec::as_slice))
    }

    pub fn ids(&self) -> &[SequenceId] {
        &self.ids
    }

    /// Sum of all sequence lengths
    #[must_use]
    pub fn total_residues(&self) -> usize {
        self.sequences.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<I, S> FromIterator<(I, S)> for SequenceCollection
where
    I: Into<SequenceId>,
    S: Into<Vec<u8>>,
{
    fn from_iter<T: IntoIterator<Item = (I, S)>>(iter: T) -> Self {
        let mut collection = Self::new();
        for (id, sequence) in iter {
            collection.insert(id, sequence);
        }
        collection
    }
}
