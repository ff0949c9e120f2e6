//! Centralized validation and helper functions.

use crate::core::error::LookupError;

/// Maximum number of sequences loaded from a single file (DOS protection)
pub const MAX_SEQUENCES: usize = 1_000_000;

/// Validate the k-mer size used to build an index.
///
/// # Errors
///
/// Returns `LookupError::InvalidParameter` when `k` is zero.
///
/// # Examples
///
/// ```
/// use kmer_lookup::utils::validation::validate_kmer_size;
///
/// assert!(validate_kmer_size(3).is_ok());
/// assert!(validate_kmer_size(0).is_err());
/// ```
pub fn validate_kmer_size(k: usize) -> Result<usize, LookupError> {
    if k == 0 {
        return Err(LookupError::InvalidParameter(
            "k-mer size must be a positive integer".to_string(),
        ));
    }
    Ok(k)
}

/// Check if adding another sequence would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new sequence.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_sequence_limit(count: usize) -> Option<String> {
    if count >= MAX_SEQUENCES {
        Some(format!(
            "Too many sequences: adding another would exceed maximum of {MAX_SEQUENCES}"
        ))
    } else {
        None
    }
}

/// Left-pad `flank` with `filler` up to `width` residues. Never truncates.
#[must_use]
pub fn pad_left(flank: &[u8], width: usize, filler: u8) -> Vec<u8> {
    let mut padded = vec![filler; width.saturating_sub(flank.len())];
    padded.extend_from_slice(flank);
    padded
}

/// Right-pad `flank` with `filler` up to `width` residues. Never truncates.
#[must_use]
pub fn pad_right(flank: &[u8], width: usize, filler: u8) -> Vec<u8> {
    let mut padded = flank.to_vec();
    padded.resize(width.max(flank.len()), filler);
    padded
}
