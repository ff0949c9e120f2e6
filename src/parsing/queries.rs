use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::parsing::fasta::{is_fasta_file, parse_fasta_file};
use crate::parsing::ParseError;

/// Read query sequences from a file.
///
/// FASTA files contribute one query per record. Any other file is read as one
/// query per line, ignoring blank lines and lines starting with `#`. A path of
/// `-` reads the line format from stdin.
///
/// # Errors
///
/// Returns `ParseError::Io` if the input cannot be read, or any FASTA parsing
/// error for FASTA inputs.
pub fn read_queries(path: &Path) -> Result<Vec<Vec<u8>>, ParseError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        return parse_query_lines(buffer.as_slice());
    }

    if is_fasta_file(path) {
        let sequences = parse_fasta_file(path)?;
        return Ok(sequences
            .iter()
            .map(|(_, residues)| residues.to_vec())
            .collect());
    }

    let file = std::fs::File::open(path)?;
    let queries = parse_query_lines(BufReader::new(file))?;
    debug!(path = %path.display(), queries = queries.len(), "read queries");
    Ok(queries)
}

/// Parse the one-query-per-line format
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails.
pub fn parse_query_lines<R: BufRead>(reader: R) -> Result<Vec<Vec<u8>>, ParseError> {
    let mut queries = Vec::new();

    for line in reader.split(b'\n') {
        let line = line?;
        let trimmed = trim_ascii_whitespace(&line);
        if trimmed.is_empty() || trimmed.starts_with(b"#") {
            continue;
        }
        queries.push(trimmed.to_vec());
    }

    Ok(queries)
}

/// Strip leading and trailing ASCII whitespace, leaving every other byte as is
fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
