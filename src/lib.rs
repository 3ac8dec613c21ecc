//! This crate ingests a tabular item catalog into a deduplicated item store
//! and a TF-IDF representation of every item's text.

pub mod artifacts;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod sink;
pub mod utils;
pub mod vectorizer;

/// Ingestion Pipeline
/// Runs one batch: read, normalize, deduplicate, feed the record sink, build the
/// corpus, fit TF-IDF and write the artifact triple.
///
/// Row `i` of the written feature matrix is item `i` of the deduplicated,
/// first-occurrence-ordered item sequence. Consumers joining metadata to matrix
/// rows must use that same order.
pub use pipeline::{IngestReport, Pipeline};

/// Configuration
/// `IngestConfig` holds output locations and `VectorizerConfig` the fitting
/// parameters. Every field has a default; files are TOML.
pub use config::{ArtifactNames, IngestConfig, Norm, VectorizerConfig};

/// Error type and result alias for every fallible operation of the crate
pub use error::{IngestError, Result};

/// Catalog data model
/// - `RawRow`: untyped row as read from the source table
/// - `NormalizedItem`: trimmed, null-free item keyed by `(title, author)`
pub use catalog::{NormalizedItem, RawRow, RawTable};

/// TF-IDF Vectorizer
/// `TfidfVectorizer` only holds parameters. Its single operation,
/// `fit_transform`, returns the `FittedModel` together with the `FeatureMatrix`
/// of the corpus it was fit on.
///
/// `FittedModel` can transform unseen documents into the same column space
/// and is persisted as one serialized object.
///
/// # Serialization
/// Supported for `FittedModel`, `FeatureMatrix` and `Vocabulary`.
pub use vectorizer::{matrix::FeatureMatrix, vocabulary::Vocabulary, FittedModel, TfidfVectorizer};

/// TF IDF Calculation Engine Trait
/// Plug a different weighting scheme into `TfidfVectorizer<E>`.
/// `DefaultTfIdfEngine` uses smoothed logarithmic IDF and raw-count TF.
pub use vectorizer::tfidf::{DefaultTfIdfEngine, TfIdfEngine};

/// Artifact persistence
pub use artifacts::{ArtifactPaths, ArtifactSet, ArtifactWriter};

/// Record sinks
pub use sink::{MemorySink, RecordSink, SqliteSink};
