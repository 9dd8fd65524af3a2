//! Fixed-size text chunking.

use crate::error::{RagError, Result};

use super::Chunker;

/// Chunks text into fixed-width character windows with configurable overlap.
///
/// Each chunk holds `chunk_size` characters and the window start advances by
/// `chunk_size - overlap` per step, so consecutive chunks share `overlap`
/// characters of context. The final chunk may be shorter than `chunk_size`.
/// Windows are measured in characters, never bytes, so multi-byte text can
/// not be split inside a code point.
///
/// # Example
///
/// ```rust
/// use tome_rag::chunking::{Chunker, FixedSizeChunker};
///
/// let chunker = FixedSizeChunker::new(100, 20).unwrap();
/// let chunks = chunker.chunk("Long text content...").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    /// Width of each chunk in characters.
    chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    overlap: usize,
}

impl FixedSizeChunker {
    /// Creates a new fixed-size chunker.
    ///
    /// Fails with [`RagError::ChunkConfig`] unless `overlap < chunk_size`:
    /// an equal or greater overlap makes the window step zero or negative
    /// and the walk would never advance.
    pub const fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if overlap >= chunk_size {
            return Err(RagError::ChunkConfig {
                chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Creates a chunker with default settings (512 chars, 64 overlap).
    #[must_use]
    pub const fn default_settings() -> Self {
        Self {
            chunk_size: 512,
            overlap: 64,
        }
    }
}

impl Default for FixedSizeChunker {
    fn default() -> Self {
        Self::default_settings()
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, text: &str) -> Result<Vec<String>> {
        let chars: Vec<char> = text.chars().collect();
        let step = self.chunk_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            start += step;
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "fixed_size"
    }
}
