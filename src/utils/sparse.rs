use num::Float;
use serde::{Deserialize, Serialize};

use crate::utils::sort::sort_by_index;

/// Sparse vector stored as parallel index/value arrays.
/// After `sort` the indices are strictly ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVec<N> {
    pub inds: Vec<u32>,
    pub vals: Vec<N>,
}

impl<N: Copy> SparseVec<N> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inds: Vec::with_capacity(capacity),
            vals: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, ind: u32, val: N) {
        self.inds.push(ind);
        self.vals.push(val);
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    pub fn sort(&mut self) {
        sort_by_index(&mut self.inds, &mut self.vals);
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }
}

impl<N: Float> SparseVec<N> {
    pub fn norm(&self) -> N {
        self.vals.iter().fold(N::zero(), |acc, &v| acc + v * v).sqrt()
    }

    /// Scale to unit length; a zero vector is left untouched
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > N::zero() {
            for v in self.vals.iter_mut() {
                *v = *v / norm;
            }
        }
    }

    /// Convert element type, saturating values the target cannot represent to zero
    pub fn cast<M: Float>(self) -> SparseVec<M> {
        SparseVec {
            inds: self.inds,
            vals: self
                .vals
                .into_iter()
                .map(|v| M::from(v).unwrap_or_else(M::zero))
                .collect(),
        }
    }
}
