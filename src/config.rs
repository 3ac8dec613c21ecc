//! Pipeline configuration
//!
//! Every field has a default, so an empty TOML file (or no file at all) yields
//! the stock settings: 50k features, unigrams plus bigrams, L2-normalised rows.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Top-level configuration for one ingestion run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    /// Directory receiving the three artifacts
    pub output_dir: PathBuf,
    /// SQLite file for the record sink; `None` skips the sink
    pub sink_path: Option<PathBuf>,
    pub vectorizer: VectorizerConfig,
    pub artifacts: ArtifactNames,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./artifacts"),
            sink_path: None,
            vectorizer: VectorizerConfig::default(),
            artifacts: ArtifactNames::default(),
        }
    }
}

/// Row normalization applied after weighting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L2,
    None,
}

/// TF-IDF fitting parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Upper bound on vocabulary size
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths
    pub ngram_range: (usize, usize),
    pub lowercase: bool,
    /// Tokens shorter than this many characters are dropped
    pub min_token_len: usize,
    pub norm: Norm,
    pub smooth_idf: bool,
    pub sublinear_tf: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 50_000,
            ngram_range: (1, 2),
            lowercase: true,
            min_token_len: 2,
            norm: Norm::L2,
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(IngestError::Config(
                "vectorizer.max_features must be greater than 0".to_string(),
            ));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(IngestError::Config(format!(
                "vectorizer.ngram_range must satisfy 1 <= min <= max, got ({}, {})",
                min_n, max_n
            )));
        }
        if self.min_token_len == 0 {
            return Err(IngestError::Config(
                "vectorizer.min_token_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// File names of the artifact triple inside `output_dir`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtifactNames {
    pub matrix: String,
    pub vocabulary: String,
    pub model: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            matrix: "item_tfidf.cbor".to_string(),
            vocabulary: "tfidf_vocab.json".to_string(),
            model: "tfidf_vectorizer.cbor".to_string(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            IngestError::io(e, format!("Failed to read config file: {:?}", path))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: IngestConfig =
            toml::from_str(content).map_err(|e| IngestError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        let names = [
            &self.artifacts.matrix,
            &self.artifacts.vocabulary,
            &self.artifacts.model,
        ];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(IngestError::Config(
                "artifact file names must not be empty".to_string(),
            ));
        }
        if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
            return Err(IngestError::Config(
                "artifact file names must be distinct".to_string(),
            ));
        }
        Ok(())
    }
}
