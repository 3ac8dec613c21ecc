use std::path::Path;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use crate::utils::sparse::SparseVec;

/// Compressed sparse row matrix of TF-IDF weights.
/// Row `i` belongs to corpus document `i`; column `j` to vocabulary index `j`.
/// Column indices within a row are strictly ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix<N = f64> {
    n_rows: usize,
    n_cols: usize,
    /// row `i` occupies `indices[indptr[i]..indptr[i + 1]]`
    indptr: Vec<usize>,
    indices: Vec<u32>,
    data: Vec<N>,
}

impl<N: Float> FeatureMatrix<N> {
    /// Stack rows in order. Zero entries are not stored.
    pub fn from_rows(rows: Vec<SparseVec<N>>, n_cols: usize) -> Self {
        let n_rows = rows.len();
        let nnz: usize = rows.iter().map(|r| r.nnz()).sum();
        let mut indptr = Vec::with_capacity(n_rows + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut data = Vec::with_capacity(nnz);
        indptr.push(0);
        for row in rows {
            for (ind, val) in row.iter() {
                if val != N::zero() {
                    indices.push(ind);
                    data.push(val);
                }
            }
            indptr.push(indices.len());
        }
        Self {
            n_rows,
            n_cols,
            indptr,
            indices,
            data,
        }
    }

    /// (rows, cols)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Number of stored entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Column indices and weights of row `i`
    pub fn row(&self, i: usize) -> Option<(&[u32], &[N])> {
        if i >= self.n_rows {
            return None;
        }
        let (start, end) = (self.indptr[i], self.indptr[i + 1]);
        Some((&self.indices[start..end], &self.data[start..end]))
    }

    /// Weight at (row, col); zero for absent entries or out-of-range positions
    pub fn get(&self, row: usize, col: usize) -> N {
        self.row(row)
            .and_then(|(inds, vals)| {
                inds.binary_search(&(col as u32)).ok().map(|pos| vals[pos])
            })
            .unwrap_or_else(N::zero)
    }

    /// Dense copy of row `i`
    pub fn dense_row(&self, i: usize) -> Vec<N> {
        let mut dense = vec![N::zero(); self.n_cols];
        if let Some((inds, vals)) = self.row(i) {
            for (&ind, &val) in inds.iter().zip(vals) {
                dense[ind as usize] = val;
            }
        }
        dense
    }

    /// Same shape and sparsity pattern, values within `tolerance`
    pub fn approx_eq(&self, other: &Self, tolerance: N) -> bool {
        self.shape() == other.shape()
            && self.indptr == other.indptr
            && self.indices == other.indices
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| (a - b).abs() <= tolerance)
    }

    /// Check CSR structure of a matrix read from disk
    pub fn validate(&self, path: &Path) -> Result<()> {
        let fail = |message: String| IngestError::ShapeMismatch {
            path: path.to_path_buf(),
            message,
        };
        if self.indptr.len() != self.n_rows + 1 || self.indptr.first() != Some(&0) {
            return Err(fail(format!(
                "row pointer length {} does not fit {} rows",
                self.indptr.len(),
                self.n_rows
            )));
        }
        if self.indices.len() != self.data.len() || self.indptr[self.n_rows] != self.data.len() {
            return Err(fail("index and value arrays disagree in length".to_string()));
        }
        // non-decreasing pointers ending at nnz keep every row slice in bounds
        if let Some(i) = self.indptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(fail(format!("row {} has decreasing row pointers", i)));
        }
        for i in 0..self.n_rows {
            let row = &self.indices[self.indptr[i]..self.indptr[i + 1]];
            if row.windows(2).any(|w| w[0] >= w[1]) {
                return Err(fail(format!("row {} has unsorted column indices", i)));
            }
            if row.last().map_or(false, |&c| c as usize >= self.n_cols) {
                return Err(fail(format!("row {} has a column outside {} columns", i, self.n_cols)));
            }
        }
        Ok(())
    }
}
