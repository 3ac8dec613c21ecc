use crate::{
    config::{Norm, VectorizerConfig},
    utils::sparse::SparseVec,
    vectorizer::{corpus::Corpus, term::TermFrequency, vocabulary::Vocabulary},
};

pub trait TfIdfEngine: Send + Sync {
    /// IDFベクトルを生成するメソッド
    /// # Arguments
    /// * `corpus` - コーパス
    /// * `vocabulary` - 語彙
    /// * `config` - ベクトライザ設定 (smooth_idf)
    /// # Returns
    /// * `Vec<f64>` - IDFベクトル (語彙のindex順)
    fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary, config: &VectorizerConfig) -> Vec<f64>;

    /// 1ドキュメントのTF-IDFベクトルを生成するメソッド
    /// 語彙に無いtermは無視される
    fn tf_idf_vec(
        freq: &TermFrequency,
        vocabulary: &Vocabulary,
        idf: &[f64],
        config: &VectorizerConfig,
    ) -> SparseVec<f64>;
}

/// デフォルトのTF-IDFエンジン
/// - idf = ln((1 + n) / (1 + df)) + 1 (smooth_idf)
/// - idf = ln(n / df) + 1
/// - tf = count, or 1 + ln(count) (sublinear_tf)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultTfIdfEngine;

impl DefaultTfIdfEngine {
    #[inline]
    pub fn idf(doc_num: u64, doc_freq: u64, smooth: bool) -> f64 {
        let (n, df) = if smooth {
            (doc_num as f64 + 1.0, doc_freq as f64 + 1.0)
        } else {
            (doc_num as f64, doc_freq as f64)
        };
        (n / df).ln() + 1.0
    }

    #[inline]
    pub fn tf(count: u64, sublinear: bool) -> f64 {
        if count == 0 {
            0.0
        } else if sublinear {
            1.0 + (count as f64).ln()
        } else {
            count as f64
        }
    }
}

impl TfIdfEngine for DefaultTfIdfEngine {
    fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary, config: &VectorizerConfig) -> Vec<f64> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|(term, _)| Self::idf(doc_num, corpus.get_term_count(term), config.smooth_idf))
            .collect()
    }

    fn tf_idf_vec(
        freq: &TermFrequency,
        vocabulary: &Vocabulary,
        idf: &[f64],
        config: &VectorizerConfig,
    ) -> SparseVec<f64> {
        let mut vec = SparseVec::with_capacity(freq.term_num());
        for (term, count) in freq.iter() {
            if let Some(idx) = vocabulary.get(term) {
                vec.push(idx as u32, Self::tf(count, config.sublinear_tf) * idf[idx]);
            }
        }
        vec.sort();
        if config.norm == Norm::L2 {
            vec.l2_normalize();
        }
        vec
    }
}
