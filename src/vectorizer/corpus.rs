use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::term::TermFrequency;

/// Document count and per-term document frequency of one corpus snapshot.
/// Terms keep first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Corpus {
    doc_num: u64,
    #[serde(with = "indexmap::map::serde_seq")]
    term_doc_counts: IndexMap<String, u64>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from per-document term frequencies
    pub fn from_frequencies(freqs: &[TermFrequency]) -> Self {
        let mut corpus = Self::new();
        for freq in freqs {
            corpus.add_set(&freq.term_set_ref_str());
        }
        corpus
    }

    /// Add one document's distinct terms
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            if let Some(count) = self.term_doc_counts.get_mut(term.as_ref()) {
                *count += 1;
            } else {
                self.term_doc_counts.insert(term.as_ref().to_string(), 1);
            }
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_doc_counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_doc_counts.len()
    }

    /// Up to `limit` terms ranked by document frequency, highest first.
    /// Equal frequencies are ordered lexicographically, so the cut is stable
    /// across runs regardless of hashing or input order.
    pub fn top_terms(&self, limit: usize) -> Vec<&str> {
        let mut ranked: Vec<(&str, u64)> = self
            .term_doc_counts
            .iter()
            .map(|(term, &df)| (term.as_str(), df))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(limit);
        ranked.into_iter().map(|(term, _)| term).collect()
    }
}
