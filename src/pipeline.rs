//! One batch ingestion run.
//!
//! read -> normalize -> dedup -> { record sink, corpus -> fit -> artifacts }
//!
//! Each stage consumes its whole input before the next starts. Runs against
//! the same output directory or sink must not overlap.

use std::path::Path;

use tracing::info;

use crate::artifacts::{ArtifactPaths, ArtifactWriter};
use crate::catalog::{
    corpus::build_corpus, dedup::dedup_items, normalizer::normalize_rows, reader::read_rows,
    NormalizedItem, RawTable, REQUIRED_COLUMNS,
};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::sink::RecordSink;
use crate::vectorizer::{matrix::FeatureMatrix, tfidf::DefaultTfIdfEngine, TfidfVectorizer};

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub rows_read: usize,
    pub items: usize,
    pub duplicates_dropped: usize,
    pub vocabulary_size: usize,
    /// (rows, cols) of the feature matrix
    pub matrix_shape: (usize, usize),
    pub nnz: usize,
    pub artifacts: ArtifactPaths,
}

pub struct Pipeline {
    config: IngestConfig,
}

impl Pipeline {
    pub fn new(config: IngestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Run on a CSV file
    pub fn run(&self, input: &Path, sink: Option<&mut dyn RecordSink>) -> Result<IngestReport> {
        info!("Reading catalog from {:?}", input);
        let table = read_rows(input)?;
        self.run_table(table, sink)
    }

    /// Run on rows already in memory
    pub fn run_table(
        &self,
        table: RawTable,
        sink: Option<&mut dyn RecordSink>,
    ) -> Result<IngestReport> {
        table.require_columns(&REQUIRED_COLUMNS)?;
        let rows_read = table.rows.len();

        let items = prepare_items(&table);
        let duplicates_dropped = rows_read - items.len();
        info!(
            "Normalized {} rows into {} items ({} duplicates dropped)",
            rows_read,
            items.len(),
            duplicates_dropped
        );

        if let Some(sink) = sink {
            sink.replace_all(&items)?;
        }

        let corpus = build_corpus(&items);
        let vectorizer =
            TfidfVectorizer::<DefaultTfIdfEngine>::new(self.config.vectorizer.clone())?;
        let (model, matrix): (_, FeatureMatrix<f64>) = vectorizer.fit_transform(&corpus)?;

        let vocabulary_size = model.vocabulary().len();
        let matrix_shape = matrix.shape();
        let nnz = matrix.nnz();

        let writer = ArtifactWriter::new(&self.config.output_dir, &self.config.artifacts);
        let artifacts = writer.write(model, matrix)?;

        info!("Ingest done: {:?}", matrix_shape);
        Ok(IngestReport {
            rows_read,
            items: items.len(),
            duplicates_dropped,
            vocabulary_size,
            matrix_shape,
            nnz,
            artifacts,
        })
    }
}

/// Normalize then deduplicate; the returned order defines matrix rows
pub fn prepare_items(table: &RawTable) -> Vec<NormalizedItem> {
    dedup_items(normalize_rows(&table.rows))
}
