//! Flat exhaustive L2 index.

use parking_lot::RwLock;
use rayon::prelude::*;

use crate::error::{RagError, Result};
use crate::types::{EmbeddingMatrix, SearchHit};

/// Internal state guarded by the index lock.
#[derive(Default)]
struct FlatState {
    /// Fixed by the first insertion; `None` while the index is empty.
    dimension: Option<usize>,
    /// All stored vectors, in insertion order.
    vectors: Vec<Vec<f32>>,
}

/// A flat L2 nearest-neighbor index.
///
/// Vectors are stored contiguously in insertion order and searched
/// exhaustively with exact Euclidean distance. The first
/// [`add`](FlatIndex::add) call fixes the index dimensionality; every later
/// insertion and every query must match it exactly. The store grows
/// monotonically: there is no delete or update operation — replacement
/// happens by building a fresh index and swapping it in.
///
/// # Example
///
/// ```rust
/// use tome_rag::index::FlatIndex;
/// use tome_rag::EmbeddingMatrix;
///
/// let index = FlatIndex::new();
/// let matrix = EmbeddingMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
/// index.add(&matrix).unwrap();
///
/// let query = EmbeddingMatrix::from_rows(vec![vec![0.9, 0.1]]).unwrap();
/// let hits = index.search(&query, 1).unwrap();
/// assert_eq!(hits[0][0].index, 1);
/// ```
#[derive(Default)]
pub struct FlatIndex {
    state: RwLock<FlatState>,
}

impl std::fmt::Debug for FlatIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("FlatIndex")
            .field("dimension", &state.dimension)
            .field("len", &state.vectors.len())
            .finish()
    }
}

impl FlatIndex {
    /// Creates an empty index. Dimensionality is fixed by the first
    /// insertion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-inserts the matrix rows at the end of the store.
    ///
    /// The first call fixes the index dimensionality to the matrix width;
    /// later calls whose width differs fail with
    /// [`RagError::DimensionMismatch`] and leave the store untouched.
    pub fn add(&self, matrix: &EmbeddingMatrix) -> Result<()> {
        let mut state = self.state.write();

        match state.dimension {
            Some(expected) if expected != matrix.dim() => {
                return Err(RagError::DimensionMismatch {
                    expected,
                    actual: matrix.dim(),
                });
            }
            Some(_) => {}
            None => state.dimension = Some(matrix.dim()),
        }

        state.vectors.extend(matrix.rows().iter().cloned());
        Ok(())
    }

    /// Finds the nearest stored vectors for each query row.
    ///
    /// Returns one hit list per query row, each holding up to `top_k`
    /// [`SearchHit`]s ordered by ascending Euclidean distance. An index
    /// holding fewer than `top_k` vectors returns as many hits as it has.
    ///
    /// Fails with [`RagError::EmptyIndex`] when nothing has been inserted
    /// yet, and [`RagError::DimensionMismatch`] when the query width
    /// differs from the index dimensionality.
    pub fn search(
        &self,
        queries: &EmbeddingMatrix,
        top_k: usize,
    ) -> Result<Vec<Vec<SearchHit>>> {
        let state = self.state.read();

        let Some(dimension) = state.dimension else {
            return Err(RagError::EmptyIndex);
        };
        if queries.dim() != dimension {
            return Err(RagError::DimensionMismatch {
                expected: dimension,
                actual: queries.dim(),
            });
        }

        let results = queries
            .rows()
            .iter()
            .map(|query| {
                let mut scored: Vec<SearchHit> = state
                    .vectors
                    .par_iter()
                    .enumerate()
                    .map(|(index, vector)| SearchHit {
                        index,
                        distance: euclidean(query, vector),
                    })
                    .collect();

                scored.par_sort_unstable_by(|a, b| a.distance.total_cmp(&b.distance));
                scored.truncate(top_k.min(scored.len()));
                scored
            })
            .collect();

        Ok(results)
    }

    /// Number of stored vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().vectors.len()
    }

    /// Returns `true` if nothing has been inserted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fixed dimensionality, or `None` while the index is empty.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.state.read().dimension
    }
}

fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(lhs, rhs)| {
            let diff = lhs - rhs;
            diff * diff
        })
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f32>>) -> EmbeddingMatrix {
        EmbeddingMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn first_insertion_fixes_dimension() {
        let index = FlatIndex::new();
        assert_eq!(index.dimension(), None);

        index.add(&matrix(vec![vec![0.0; 128]; 3])).unwrap();

        assert_eq!(index.dimension(), Some(128));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn mismatched_insertion_fails_and_leaves_index_unchanged() {
        let index = FlatIndex::new();
        index.add(&matrix(vec![vec![0.0; 128]; 2])).unwrap();

        let err = index.add(&matrix(vec![vec![0.0; 64]; 4])).unwrap_err();

        assert!(matches!(
            err,
            RagError::DimensionMismatch {
                expected: 128,
                actual: 64
            }
        ));
        assert_eq!(index.len(), 2);
        assert_eq!(index.dimension(), Some(128));
    }

    #[test]
    fn search_on_empty_index_fails() {
        let index = FlatIndex::new();
        let err = index.search(&matrix(vec![vec![0.0; 4]]), 5).unwrap_err();
        assert!(matches!(err, RagError::EmptyIndex));
    }

    #[test]
    fn mismatched_query_fails() {
        let index = FlatIndex::new();
        index.add(&matrix(vec![vec![0.0; 4]])).unwrap();

        let err = index.search(&matrix(vec![vec![0.0; 3]]), 1).unwrap_err();
        assert!(matches!(err, RagError::DimensionMismatch { .. }));
    }

    #[test]
    fn nearest_first_ordering() {
        let index = FlatIndex::new();
        index
            .add(&matrix(vec![
                vec![10.0, 0.0],
                vec![1.0, 0.0],
                vec![5.0, 0.0],
            ]))
            .unwrap();

        let hits = index.search(&matrix(vec![vec![0.0, 0.0]]), 3).unwrap();
        let row = &hits[0];

        assert_eq!(row.len(), 3);
        assert_eq!(row[0].index, 1);
        assert_eq!(row[1].index, 2);
        assert_eq!(row[2].index, 0);
        assert!(row[0].distance <= row[1].distance);
        assert!(row[1].distance <= row[2].distance);
    }

    #[test]
    fn distances_are_euclidean() {
        let index = FlatIndex::new();
        index.add(&matrix(vec![vec![3.0, 4.0]])).unwrap();

        let hits = index.search(&matrix(vec![vec![0.0, 0.0]]), 1).unwrap();
        assert!((hits[0][0].distance - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn top_k_larger_than_store_returns_all_available() {
        let index = FlatIndex::new();
        index
            .add(&matrix(vec![vec![0.0, 1.0], vec![1.0, 0.0]]))
            .unwrap();

        let hits = index.search(&matrix(vec![vec![0.0, 0.0]]), 10).unwrap();
        assert_eq!(hits[0].len(), 2);
    }

    #[test]
    fn one_hit_list_per_query_row() {
        let index = FlatIndex::new();
        index
            .add(&matrix(vec![vec![0.0, 1.0], vec![1.0, 0.0]]))
            .unwrap();

        let queries = matrix(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let hits = index.search(&queries, 1).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0][0].index, 0);
        assert_eq!(hits[1][0].index, 1);
    }

    #[test]
    fn store_grows_monotonically_across_insertions() {
        let index = FlatIndex::new();
        index.add(&matrix(vec![vec![0.0; 8]; 2])).unwrap();
        index.add(&matrix(vec![vec![1.0; 8]; 3])).unwrap();

        assert_eq!(index.len(), 5);
    }
}
