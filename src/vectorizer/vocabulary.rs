use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use std::path::Path;

/// Term to column index mapping.
/// Indices are dense (`0..len`) and equal each term's position, which is
/// lexicographic term order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    terms: IndexMap<String, usize>,
}

impl Vocabulary {
    /// Assign dense indices to `terms` in lexicographic order
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sorted: Vec<String> = terms.into_iter().map(Into::into).collect();
        sorted.sort_unstable();
        sorted.dedup();
        let terms = sorted
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();
        Self { terms }
    }

    #[inline]
    pub fn get(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    #[inline]
    pub fn term(&self, idx: usize) -> Option<&str> {
        self.terms.get_index(idx).map(|(term, _)| term.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// (term, index) pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.terms.iter().map(|(term, &idx)| (term.as_str(), idx))
    }

    /// Check the dense-index invariant of a vocabulary read from disk
    pub fn validate(&self, path: &Path) -> Result<()> {
        for (pos, (term, &idx)) in self.terms.iter().enumerate() {
            if idx != pos {
                return Err(IngestError::ShapeMismatch {
                    path: path.to_path_buf(),
                    message: format!("term {:?} has index {} at position {}", term, idx, pos),
                });
            }
        }
        Ok(())
    }
}
