//! Configuration for the RAG pipeline.

/// Configuration for a [`RagManager`](crate::RagManager) and its document
/// engine.
///
/// When `chunk_size` and `overlap` are both set, documents are chunked into
/// fixed-width overlapping character windows; when either is unset, they are
/// split on blank-line paragraph boundaries.
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Chunk width in characters for fixed-size chunking.
    pub chunk_size: Option<usize>,
    /// Overlap in characters between consecutive fixed-size chunks.
    pub overlap: Option<usize>,
    /// Number of chunks embedded per provider call.
    pub batch_size: usize,
    /// Default number of results returned by searches.
    pub default_top_k: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: None,
            overlap: None,
            batch_size: 32,
            default_top_k: 5,
        }
    }
}

impl RagConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::new()
    }
}

/// Builder for [`RagConfig`].
#[derive(Debug, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RagConfig::default(),
        }
    }

    /// Sets the fixed chunk width in characters.
    #[must_use]
    pub const fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = Some(chunk_size);
        self
    }

    /// Sets the overlap between consecutive fixed-size chunks.
    #[must_use]
    pub const fn overlap(mut self, overlap: usize) -> Self {
        self.config.overlap = Some(overlap);
        self
    }

    /// Sets the number of chunks embedded per provider call.
    #[must_use]
    pub const fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Sets the default number of search results.
    #[must_use]
    pub const fn default_top_k(mut self, k: usize) -> Self {
        self.config.default_top_k = k;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> RagConfig {
        self.config
    }
}
