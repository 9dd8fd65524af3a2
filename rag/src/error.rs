//! Error types for the RAG crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in RAG operations.
///
/// Validation failures (`NotFound`, `Shape`, `DimensionMismatch`,
/// `EmptyIndex`, `ChunkConfig`, `InvalidBatchSize`) are raised immediately
/// by the component that detects them. Upstream failures crossing the
/// [`RagManager`](crate::RagManager) boundary are re-raised once as the
/// single [`Processing`](RagError::Processing) kind, so callers have exactly
/// one failure shape to handle for a whole ingestion or retrieval operation.
#[derive(Debug, Error)]
pub enum RagError {
    /// The document path does not exist.
    #[error("document not found: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The document exists but yielded no readable text.
    #[error("unreadable document {}: {reason}", path.display())]
    Unreadable {
        /// The offending document path.
        path: PathBuf,
        /// Why no text could be extracted.
        reason: String,
    },

    /// Embedding rows do not form a two-dimensional matrix.
    #[error("invalid embedding matrix: {0}")]
    Shape(String),

    /// Vector width differs from the index's fixed dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality the index was fixed to.
        expected: usize,
        /// Dimensionality actually provided.
        actual: usize,
    },

    /// Search was attempted against an index holding no vectors.
    #[error("cannot search an empty index")]
    EmptyIndex,

    /// Fixed-size chunking configured with `overlap >= chunk_size`.
    #[error("overlap ({overlap}) must be less than chunk size ({chunk_size})")]
    ChunkConfig {
        /// Configured chunk width in characters.
        chunk_size: usize,
        /// Configured overlap in characters.
        overlap: usize,
    },

    /// Embedding batch size of zero.
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    /// An upstream stage (reading, embedding, indexing) failed during a
    /// manager operation; carries the original cause.
    #[error("error processing document: {0}")]
    Processing(#[source] anyhow::Error),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
