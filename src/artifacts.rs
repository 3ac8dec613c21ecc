//! Persistence of the fitted artifact triple.
//!
//! One run writes three files into one directory: the feature matrix (CBOR,
//! CSR layout), the vocabulary (JSON object of term to integer index) and the
//! fitted model (CBOR). The files are written one after another with no
//! multi-file commit; a run that fails halfway can leave the directory with a
//! mix of old and new files. Callers needing atomicity should write to a
//! scratch directory and rename it into place once `write` returns.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use num::Float;
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::config::ArtifactNames;
use crate::error::{IngestError, Result};
use crate::vectorizer::{
    matrix::FeatureMatrix, tfidf::TfIdfEngine, vocabulary::Vocabulary, FittedModel,
};

/// Resolved locations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub matrix: PathBuf,
    pub vocabulary: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: &Path, names: &ArtifactNames) -> Self {
        Self {
            matrix: dir.join(&names.matrix),
            vocabulary: dir.join(&names.vocabulary),
            model: dir.join(&names.model),
        }
    }
}

/// Writes the artifact triple of one run
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
    paths: ArtifactPaths,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>, names: &ArtifactNames) -> Self {
        let dir = dir.into();
        let paths = ArtifactPaths::new(&dir, names);
        Self { dir, paths }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Persist matrix, vocabulary and model, overwriting earlier files.
    /// Consumes both values: after this the files are the only copy.
    pub fn write<N, E>(&self, model: FittedModel<E>, matrix: FeatureMatrix<N>) -> Result<ArtifactPaths>
    where
        N: Float + Serialize,
        E: TfIdfEngine,
    {
        fs::create_dir_all(&self.dir).map_err(|e| {
            IngestError::io(e, format!("Failed to create artifact directory: {:?}", self.dir))
        })?;

        write_cbor(&self.paths.matrix, &matrix)?;
        write_json(&self.paths.vocabulary, model.vocabulary())?;
        write_cbor(&self.paths.model, &model)?;

        info!(
            "Artifacts written: {:?}, {:?}, {:?}",
            self.paths.matrix, self.paths.vocabulary, self.paths.model
        );
        Ok(self.paths.clone())
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| IngestError::io(e, format!("Failed to create artifact: {:?}", path)))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| IngestError::io(e, format!("Failed to open artifact: {:?}", path)))
}

fn flush(mut writer: BufWriter<File>, path: &Path) -> Result<()> {
    writer
        .flush()
        .map_err(|e| IngestError::io(e, format!("Failed to flush artifact: {:?}", path)))
}

fn write_cbor<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = create(path)?;
    serde_cbor::to_writer(&mut writer, value).map_err(|e| IngestError::Cbor {
        source: e,
        context: format!("Failed to encode {:?}", path),
    })?;
    flush(writer, path)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = create(path)?;
    serde_json::to_writer(&mut writer, value).map_err(|e| IngestError::Json {
        source: e,
        context: format!("Failed to encode {:?}", path),
    })?;
    flush(writer, path)
}

fn read_cbor<T: DeserializeOwned>(path: &Path) -> Result<T> {
    serde_cbor::from_reader(open(path)?).map_err(|e| IngestError::Cbor {
        source: e,
        context: format!("Failed to decode {:?}", path),
    })
}

/// Load a persisted feature matrix
pub fn load_matrix<N>(path: &Path) -> Result<FeatureMatrix<N>>
where
    N: Float + DeserializeOwned,
{
    let matrix: FeatureMatrix<N> = read_cbor(path)?;
    matrix.validate(path)?;
    Ok(matrix)
}

/// Load a persisted vocabulary file
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let vocabulary: Vocabulary =
        serde_json::from_reader(open(path)?).map_err(|e| IngestError::Json {
            source: e,
            context: format!("Failed to decode {:?}", path),
        })?;
    vocabulary.validate(path)?;
    Ok(vocabulary)
}

/// Load a persisted fitted model, ready to transform new documents
pub fn load_model<E: TfIdfEngine>(path: &Path) -> Result<FittedModel<E>> {
    let model: FittedModel<E> = read_cbor(path)?;
    model.vocabulary().validate(path)?;
    if !model.is_consistent() {
        return Err(IngestError::ShapeMismatch {
            path: path.to_path_buf(),
            message: format!(
                "{} idf weights for {} vocabulary terms",
                model.idf().len(),
                model.vocabulary().len()
            ),
        });
    }
    Ok(model)
}

/// The three artifacts of one run, loaded and cross-checked
#[derive(Debug, Clone)]
pub struct ArtifactSet<N, E>
where
    E: TfIdfEngine,
{
    pub model: FittedModel<E>,
    pub vocabulary: Vocabulary,
    pub matrix: FeatureMatrix<N>,
}

impl<N, E> ArtifactSet<N, E>
where
    N: Float + DeserializeOwned,
    E: TfIdfEngine,
{
    pub fn load(dir: &Path, names: &ArtifactNames) -> Result<Self> {
        let paths = ArtifactPaths::new(dir, names);
        let model: FittedModel<E> = load_model(&paths.model)?;
        let vocabulary = load_vocabulary(&paths.vocabulary)?;
        let matrix: FeatureMatrix<N> = load_matrix(&paths.matrix)?;

        if &vocabulary != model.vocabulary() {
            return Err(IngestError::ShapeMismatch {
                path: paths.vocabulary,
                message: "vocabulary file differs from the model vocabulary".to_string(),
            });
        }
        if matrix.shape().1 != model.vocabulary().len() {
            return Err(IngestError::ShapeMismatch {
                path: paths.matrix,
                message: format!(
                    "matrix has {} columns, model vocabulary has {} terms",
                    matrix.shape().1,
                    model.vocabulary().len()
                ),
            });
        }
        if matrix.shape().0 as u64 != model.doc_num() {
            return Err(IngestError::ShapeMismatch {
                path: paths.matrix,
                message: format!(
                    "matrix has {} rows, model was fit on {} documents",
                    matrix.shape().0,
                    model.doc_num()
                ),
            });
        }
        Ok(Self {
            model,
            vocabulary,
            matrix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VectorizerConfig;
    use crate::vectorizer::{tfidf::DefaultTfIdfEngine, TfidfVectorizer};
    use tempfile::TempDir;

    fn fitted(docs: &[&str]) -> (FittedModel, FeatureMatrix<f64>) {
        TfidfVectorizer::<DefaultTfIdfEngine>::new(VectorizerConfig::default())
            .unwrap()
            .fit_transform(docs)
            .unwrap()
    }

    #[test]
    fn creates_nested_directories_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        let names = ArtifactNames::default();
        let writer = ArtifactWriter::new(&dir, &names);

        let (model, matrix) = fitted(&["first corpus", "second corpus"]);
        writer.write(model, matrix).unwrap();
        let (model, matrix) = fitted(&["other text"]);
        let paths = writer.write(model, matrix).unwrap();

        assert!(paths.matrix.exists() && paths.vocabulary.exists() && paths.model.exists());
        let set: ArtifactSet<f64, DefaultTfIdfEngine> = ArtifactSet::load(&dir, &names).unwrap();
        assert_eq!(set.matrix.shape(), (1, 3));
    }

    #[test]
    fn vocabulary_file_is_plain_json() {
        let tmp = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(tmp.path(), &ArtifactNames::default());
        let (model, matrix) = fitted(&["café au lait"]);
        let paths = writer.write(model, matrix).unwrap();

        let text = fs::read_to_string(&paths.vocabulary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["café"], serde_json::json!(2));
        assert!(value["lait"].is_u64());
        assert!(text.contains("café"));
    }

    #[test]
    fn mismatched_triple_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let names = ArtifactNames::default();
        let writer = ArtifactWriter::new(tmp.path(), &names);
        let (model, matrix) = fitted(&["alpha beta", "gamma"]);
        writer.write(model, matrix).unwrap();

        // overwrite only the matrix with one from a different fit
        let (_, other) = fitted(&["one two three four"]);
        write_cbor(&ArtifactPaths::new(tmp.path(), &names).matrix, &other).unwrap();

        let err = ArtifactSet::<f64, DefaultTfIdfEngine>::load(tmp.path(), &names).unwrap_err();
        assert!(matches!(err, IngestError::ShapeMismatch { .. }));
    }

    #[test]
    fn matrix_from_a_larger_fit_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let names = ArtifactNames::default();
        let writer = ArtifactWriter::new(tmp.path(), &names);

        // same vocabulary, different number of documents
        let (model, _) = fitted(&["alpha beta", "gamma"]);
        let (other_model, matrix) = fitted(&["alpha beta", "gamma", "alpha beta", "gamma"]);
        assert_eq!(model.vocabulary(), other_model.vocabulary());
        writer.write(model, matrix).unwrap();

        match ArtifactSet::<f64, DefaultTfIdfEngine>::load(tmp.path(), &names) {
            Err(IngestError::ShapeMismatch { path, message }) => {
                assert_eq!(path, ArtifactPaths::new(tmp.path(), &names).matrix);
                assert!(message.contains("4 rows"), "{}", message);
            }
            other => panic!("expected shape mismatch, got {:?}", other.map(|set| set.matrix.shape())),
        }
    }

    #[test]
    fn missing_artifact_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_model::<DefaultTfIdfEngine>(&tmp.path().join("nope.cbor")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
