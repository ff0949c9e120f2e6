use thiserror::Error;

/// Errors raised while building an index or searching it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Query sequence '{query}' must be at least {k} characters")]
    QueryTooShort { query: String, k: usize },

    #[error("Index not created, you must call index() before searching")]
    IndexNotBuilt,

    #[error("Kmer index is empty")]
    EmptyIndex,
}

impl LookupError {
    pub(crate) fn query_too_short(query: &[u8], k: usize) -> Self {
        Self::QueryTooShort {
            query: String::from_utf8_lossy(query).into_owned(),
            k,
        }
    }
}
