use std::path::PathBuf;
use thiserror::Error;

/// Error type for the ingestion pipeline
#[derive(Error, Debug)]
pub enum IngestError {
    /// A column the pipeline cannot default is absent from the input header
    #[error("Schema error: required column(s) missing from input: {missing:?}")]
    Schema { missing: Vec<String> },

    /// Vectorizer was handed zero documents
    #[error("Empty corpus: no documents to fit")]
    EmptyCorpus,

    /// Every document tokenized to nothing
    #[error("Degenerate vocabulary: {documents} document(s) produced no terms")]
    DegenerateVocabulary { documents: usize },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// CSV read errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// CBOR errors
    #[error("CBOR error: {context}: {source}")]
    Cbor {
        source: serde_cbor::Error,
        context: String,
    },

    /// Record sink database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted artifacts disagree with each other
    #[error("Artifact shape mismatch in {path}: {message}")]
    ShapeMismatch { path: PathBuf, message: String },
}

impl IngestError {
    pub(crate) fn io(source: std::io::Error, context: impl Into<String>) -> Self {
        IngestError::Io {
            source,
            context: context.into(),
        }
    }
}

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;
