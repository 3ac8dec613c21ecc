pub mod analyzer;
pub mod corpus;
pub mod matrix;
pub mod term;
pub mod tfidf;
pub mod vocabulary;

use std::marker::PhantomData;

use num::Float;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::VectorizerConfig;
use crate::error::{IngestError, Result};
use crate::vectorizer::{
    analyzer::Analyzer,
    corpus::Corpus,
    matrix::FeatureMatrix,
    term::TermFrequency,
    tfidf::{DefaultTfIdfEngine, TfIdfEngine},
    vocabulary::Vocabulary,
};

/// Unfitted TF-IDF vectorizer: parameters only.
///
/// The only operation is [`TfidfVectorizer::fit_transform`], which returns the
/// fitted model together with the matrix of the corpus it was fit on, so the
/// vocabulary, IDF weights and matrix always come from one corpus snapshot.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer<E = DefaultTfIdfEngine>
where
    E: TfIdfEngine,
{
    config: VectorizerConfig,
    _marker: PhantomData<E>,
}

impl<E> TfidfVectorizer<E>
where
    E: TfIdfEngine,
{
    pub fn new(config: VectorizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            _marker: PhantomData,
        })
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Fit vocabulary and IDF on `docs` and transform the same `docs`.
    ///
    /// # Errors
    /// * `EmptyCorpus` - `docs` is empty
    /// * `DegenerateVocabulary` - no document yields a single term
    pub fn fit_transform<N, S>(&self, docs: &[S]) -> Result<(FittedModel<E>, FeatureMatrix<N>)>
    where
        N: Float + Send,
        S: AsRef<str> + Sync,
    {
        if docs.is_empty() {
            return Err(IngestError::EmptyCorpus);
        }
        let analyzer = Analyzer::new(&self.config);

        // order-preserving: collect keeps the input order of `docs`
        let freqs: Vec<TermFrequency> = docs
            .par_iter()
            .map(|doc| analyzer.term_frequency(doc.as_ref()))
            .collect();

        let corpus = Corpus::from_frequencies(&freqs);
        if corpus.vocab_size() == 0 {
            return Err(IngestError::DegenerateVocabulary {
                documents: docs.len(),
            });
        }
        if corpus.vocab_size() > self.config.max_features {
            warn!(
                "Vocabulary truncated from {} to {} terms",
                corpus.vocab_size(),
                self.config.max_features
            );
        }
        let vocabulary = Vocabulary::from_terms(corpus.top_terms(self.config.max_features));
        let idf = E::idf_vec(&corpus, &vocabulary, &self.config);
        debug!(
            "Fitted {} documents, {} candidate terms, {} kept",
            corpus.get_doc_num(),
            corpus.vocab_size(),
            vocabulary.len()
        );

        let model = FittedModel {
            config: self.config.clone(),
            vocabulary,
            idf,
            doc_num: corpus.get_doc_num(),
            _marker: PhantomData,
        };
        let matrix = model.transform_frequencies(&freqs);
        info!(
            "TF-IDF fit: {} x {} matrix, {} non-zero entries",
            matrix.shape().0,
            matrix.shape().1,
            matrix.nnz()
        );
        Ok((model, matrix))
    }
}

/// Vocabulary plus IDF weights of one fitted corpus.
///
/// Only produced by [`TfidfVectorizer::fit_transform`] or by deserializing a
/// persisted model; it cannot be built or altered field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel<E = DefaultTfIdfEngine>
where
    E: TfIdfEngine,
{
    config: VectorizerConfig,
    vocabulary: Vocabulary,
    /// indexed by vocabulary column
    idf: Vec<f64>,
    /// documents in the fitted corpus
    doc_num: u64,
    #[serde(skip)]
    _marker: PhantomData<E>,
}

impl<E> FittedModel<E>
where
    E: TfIdfEngine,
{
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Vectorize unseen documents into this model's column space.
    /// Terms outside the vocabulary are ignored.
    pub fn transform<N, S>(&self, docs: &[S]) -> FeatureMatrix<N>
    where
        N: Float + Send,
        S: AsRef<str> + Sync,
    {
        let analyzer = Analyzer::new(&self.config);
        let freqs: Vec<TermFrequency> = docs
            .par_iter()
            .map(|doc| analyzer.term_frequency(doc.as_ref()))
            .collect();
        self.transform_frequencies(&freqs)
    }

    fn transform_frequencies<N>(&self, freqs: &[TermFrequency]) -> FeatureMatrix<N>
    where
        N: Float + Send,
    {
        let rows = freqs
            .par_iter()
            .map(|freq| E::tf_idf_vec(freq, &self.vocabulary, &self.idf, &self.config).cast::<N>())
            .collect();
        FeatureMatrix::from_rows(rows, self.vocabulary.len())
    }

    /// Model and vocabulary agree in size
    pub(crate) fn is_consistent(&self) -> bool {
        self.idf.len() == self.vocabulary.len()
    }
}
