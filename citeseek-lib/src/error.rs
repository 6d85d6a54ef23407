//! Error types for citeseek

use thiserror::Error;

/// Result type alias for citeseek operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in citeseek operations
#[derive(Error, Debug)]
pub enum Error {
    /// Source document does not exist at the given path
    #[error("document not found: {0}")]
    NotFound(String),

    /// Source document exists but could not be read
    #[error("failed to read document {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Embedding or QA model failed to load
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Failed to compute an embedding
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Vector store operation failure (insert, query, persistence)
    #[error("store error: {0}")]
    Store(String),

    /// QA engine failed at call time
    #[error("extraction error: {0}")]
    Extraction(String),

    /// Invalid input provided
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
