//! Text chunking strategies for RAG.
//!
//! This module provides the [`Chunker`] trait and implementations for
//! splitting extracted document text into smaller, indexable chunks.

mod fixed;
mod paragraph;

pub use fixed::FixedSizeChunker;
pub use paragraph::ParagraphChunker;

use crate::error::Result;

/// Trait for text chunking strategies.
///
/// Chunkers split a document's concatenated text into an ordered list of
/// segments that can be individually embedded and searched. A chunk is
/// identified by its position in the returned list; that position is also
/// its row in the embedding matrix and its slot in the vector index, so
/// chunkers must be deterministic and stateless for a given input and
/// configuration.
///
/// - [`FixedSizeChunker`]: fixed-width character windows with overlap
/// - [`ParagraphChunker`]: blank-line-delimited paragraph splitting
pub trait Chunker: Send + Sync {
    /// Splits text into an ordered sequence of chunks.
    fn chunk(&self, text: &str) -> Result<Vec<String>>;

    /// Returns the name of this chunking strategy.
    fn name(&self) -> &'static str;
}
