//! Parser for FASTA files using noodles.
//!
//! Loads every record as a named sequence. Record names are the text up to the
//! first whitespace of the definition line; descriptions are ignored.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna`, `.faa` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz`, `.faa.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz`, `.faa.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::core::sequences::SequenceCollection;
use crate::parsing::ParseError;
use crate::utils::validation::check_sequence_limit;

const FASTA_EXTENSIONS: [&str; 4] = ["fa", "fasta", "fna", "faa"];

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for compressed FASTA
    for ext in FASTA_EXTENSIONS {
        if path_str.ends_with(&format!(".{ext}.gz")) || path_str.ends_with(&format!(".{ext}.bgz")) {
            return true;
        }
    }

    // Check for uncompressed FASTA
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase)
        .is_some_and(|ext| FASTA_EXTENSIONS.contains(&ext.as_str()))
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse a FASTA file into a sequence collection.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no sequences are found,
/// `ParseError::DuplicateSequence` if two records share a name, or
/// `ParseError::TooManySequences` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<SequenceCollection, ParseError> {
    let file = std::fs::File::open(path)?;

    let sequences = if is_gzipped(path) {
        // bgzip is a series of gzip members
        let mut reader = fasta::io::Reader::new(BufReader::new(MultiGzDecoder::new(file)));
        parse_fasta_reader(&mut reader)?
    } else {
        let mut reader = fasta::io::Reader::new(BufReader::new(file));
        parse_fasta_reader(&mut reader)?
    };

    debug!(
        path = %path.display(),
        sequences = sequences.len(),
        residues = sequences.total_residues(),
        "loaded FASTA"
    );

    Ok(sequences)
}

/// Parse FASTA text already held in memory
///
/// # Errors
///
/// Same as [`parse_fasta_file`], minus I/O failures.
pub fn parse_fasta_bytes(bytes: &[u8]) -> Result<SequenceCollection, ParseError> {
    let mut reader = fasta::io::Reader::new(bytes);
    parse_fasta_reader(&mut reader)
}

/// Parse from a noodles FASTA reader
fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<SequenceCollection, ParseError> {
    let mut sequences = SequenceCollection::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        // Check sequence limit for DOS protection
        if check_sequence_limit(sequences.len()).is_some() {
            return Err(ParseError::TooManySequences(sequences.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        let residues = record.sequence().as_ref().to_vec();

        if sequences.insert(name.clone(), residues).is_some() {
            return Err(ParseError::DuplicateSequence(name));
        }
    }

    if sequences.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(sequences)
}
