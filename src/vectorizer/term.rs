use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TermFrequency struct
/// Counts how often each term occurs in one document.
/// Terms keep first-seen order, so iteration is deterministic.
///
/// # Examples
/// ```
/// use catalog_tfidf::vectorizer::term::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("term1");
/// term_freq.add_term("term2");
/// term_freq.add_term("term1");
///
/// assert_eq!(term_freq.term_count("term1"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Occurrences of `term`, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of term occurrences
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// (term, count) pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// Distinct terms in first-seen order
    pub fn term_set_ref_str(&self) -> Vec<&str> {
        self.term_count.keys().map(|term| term.as_str()).collect()
    }
}
