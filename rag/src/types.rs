//! Core data types for the RAG crate.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// An owned, validated two-dimensional matrix of embedding rows.
///
/// Row `i` is the embedding of chunk `i`; every row has the same width.
/// Construction is the only place shape is checked, so any
/// `EmbeddingMatrix` handed to the index is known rectangular.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbeddingMatrix {
    rows: Vec<Vec<f32>>,
    dim: usize,
}

impl EmbeddingMatrix {
    /// Builds a matrix from embedding rows.
    ///
    /// Fails with [`RagError::Shape`] when the row set is empty, any row is
    /// empty, or the rows disagree on width.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(RagError::Shape("matrix has no rows".into()));
        };
        let dim = first.len();
        if dim == 0 {
            return Err(RagError::Shape("matrix rows are zero-width".into()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != dim) {
            return Err(RagError::Shape(format!(
                "row {i} has width {}, expected {dim}",
                row.len()
            )));
        }
        Ok(Self { rows, dim })
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width shared by every row.
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Borrowed view of the rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// A single row by position.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Consumes the matrix, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<f32>> {
        self.rows
    }
}

/// One nearest-neighbor match: the position of a stored vector and its
/// distance from the query.
///
/// `index` is the insertion position in the index, which by construction
/// equals the chunk's position in the active document's chunk list.
/// `distance` is the true Euclidean (L2) distance, smaller is closer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Zero-based position of the matched vector.
    pub index: usize,
    /// Euclidean distance between the query and the matched vector.
    pub distance: f32,
}
