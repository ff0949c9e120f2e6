use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;
use tracing::debug;

use super::kmer::KmerIndex;

#[derive(Error, Debug)]
pub enum IndexStoreError {
    #[error("Failed to access index file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode index: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Not a k-mer index file")]
    BadMagic,

    #[error("Unsupported index format version (expected {expected}, found {found})")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Corrupt index file: {0}")]
    Corrupt(String),
}

/// Leading bytes of every saved index
pub const INDEX_MAGIC: [u8; 4] = *b"KIDX";

/// Format version for compatibility checking
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Header written ahead of the encoded index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexHeader {
    pub magic: [u8; 4],
    pub format_version: u32,
    pub created_at: String,
}

impl IndexHeader {
    fn current() -> Self {
        Self {
            magic: INDEX_MAGIC,
            format_version: INDEX_FORMAT_VERSION,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Check if the path names a saved index (`.kidx` or `.kidx.gz`)
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_index_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".kidx") || path_str.ends_with(".kidx.gz")
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".gz")
}

/// Save an index to `path`, gzip-compressed when the path ends in `.gz`.
///
/// # Errors
///
/// Returns `IndexStoreError::Io` if the file cannot be written or
/// `IndexStoreError::Codec` if encoding fails.
pub fn save_index(index: &KmerIndex, path: &Path) -> Result<(), IndexStoreError> {
    let file = File::create(path)?;

    if is_gzipped(path) {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        write_index(index, &mut encoder)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = BufWriter::new(file);
        write_index(index, &mut writer)?;
        writer.flush()?;
    }

    debug!(path = %path.display(), "saved k-mer index");
    Ok(())
}

/// Load an index previously written by [`save_index`].
///
/// # Errors
///
/// Returns `IndexStoreError::Io` if the file cannot be read,
/// `IndexStoreError::BadMagic` or `IndexStoreError::VersionMismatch` if it is
/// not a compatible index, `IndexStoreError::Codec` if decoding fails, or
/// `IndexStoreError::Corrupt` if the decoded index is inconsistent.
pub fn load_index(path: &Path) -> Result<KmerIndex, IndexStoreError> {
    let file = File::open(path)?;

    let index = if is_gzipped(path) {
        read_index(&mut BufReader::new(GzDecoder::new(file)))?
    } else {
        read_index(&mut BufReader::new(file))?
    };

    debug!(
        path = %path.display(),
        k = index.k(),
        distinct_kmers = index.len(),
        "loaded k-mer index"
    );
    Ok(index)
}

/// Encode header and index into any writer
pub fn write_index<W: Write>(index: &KmerIndex, writer: &mut W) -> Result<(), IndexStoreError> {
    bincode::serialize_into(&mut *writer, &IndexHeader::current())?;
    bincode::serialize_into(&mut *writer, index)?;
    Ok(())
}

/// Decode an index from any reader, validating the header first and the
/// decoded index after
pub fn read_index<R: Read>(reader: &mut R) -> Result<KmerIndex, IndexStoreError> {
    let header: IndexHeader = bincode::deserialize_from(&mut *reader)?;

    if header.magic != INDEX_MAGIC {
        return Err(IndexStoreError::BadMagic);
    }
    if header.format_version != INDEX_FORMAT_VERSION {
        return Err(IndexStoreError::VersionMismatch {
            expected: INDEX_FORMAT_VERSION,
            found: header.format_version,
        });
    }

    let index: KmerIndex = bincode::deserialize_from(&mut *reader)?;
    index.check_consistency().map_err(IndexStoreError::Corrupt)?;
    Ok(index)
}
