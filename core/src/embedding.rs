//! # Embedding Module
//!
//! Types and traits for working with text embeddings.
//!
//! Embeddings are dense vector representations of text that capture semantic
//! meaning: similar texts produce similar vectors, which makes them the
//! substrate for semantic search and retrieval-augmented generation. An
//! embedding model is characterized by its **dimension** — the fixed length
//! of every vector it produces (e.g. 384, 768, 1536).
//!
//! This module provides the [`EmbeddingModel`] trait that abstracts over
//! different embedding implementations, allowing you to switch between
//! providers while maintaining the same interface. Retrieval pipelines lean
//! on the batch operation: embedding a document goes through
//! [`embed_batch`](EmbeddingModel::embed_batch) one bucket of chunks at a
//! time, and the trait guarantees the returned rows line up with the input
//! texts.
//!
//! ```rust
//! use tome_core::EmbeddingModel;
//!
//! async fn example<T: EmbeddingModel>(model: &T) -> tome_core::Result<()> {
//!     let dim = model.dim();
//!     let embedding = model.embed("Hello, world!").await?;
//!     assert_eq!(embedding.len(), dim);
//!     Ok(())
//! }
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::future::Future;

/// A type alias for an embedding vector of 32-bit floats.
///
/// The vector length is determined by the embedding model's architecture
/// and reported through [`EmbeddingModel::dim`].
pub type Embedding = Vec<f32>;

/// Converts text to vector representations.
///
/// This trait provides a unified interface for different embedding model
/// implementations, allowing you to switch between providers (`OpenAI`,
/// `Azure OpenAI`, `TogetherAI`, local backends, etc.) while maintaining the
/// same API.
///
/// # Implementation Requirements
///
/// - [`embed`](EmbeddingModel::embed) must return vectors with length equal
///   to [`dim`](EmbeddingModel::dim), and the dimension must be constant
///   across calls for a given model.
/// - [`embed_batch`](EmbeddingModel::embed_batch) must return exactly one
///   row per input text, **in input order**. Retrieval pipelines map row
///   positions back to chunk positions, so reordering is a correctness bug,
///   not a quality bug.
///
/// # Example
///
/// ```rust
/// use tome_core::EmbeddingModel;
///
/// struct MyEmbedding {
///     api_key: String,
/// }
///
/// impl EmbeddingModel for MyEmbedding {
///     fn dim(&self) -> usize {
///         1536
///     }
///
///     async fn embed(&self, text: &str) -> tome_core::Result<Vec<f32>> {
///         // In a real implementation, this would call the embedding API
///         Ok(vec![0.0; self.dim()])
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let model = MyEmbedding { api_key: "sk-...".to_string() };
/// let embedding = model.embed("The quick brown fox").await.unwrap();
/// assert_eq!(embedding.len(), 1536);
/// # });
/// ```
pub trait EmbeddingModel: Send + Sync + Sized {
    /// Returns the embedding vector dimension.
    ///
    /// This value determines the length of vectors returned by
    /// [`embed`](EmbeddingModel::embed) and of every row returned by
    /// [`embed_batch`](EmbeddingModel::embed_batch).
    fn dim(&self) -> usize;

    /// Converts text to an embedding vector.
    ///
    /// Returns a [`Vec<f32>`] with length equal to
    /// [`dim`](EmbeddingModel::dim).
    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Embedding>> + Send;

    /// Converts a batch of texts to embedding vectors, one row per input
    /// text, in input order.
    ///
    /// The default implementation embeds each text sequentially through
    /// [`embed`](EmbeddingModel::embed), which preserves ordering but pays
    /// one round-trip per text. Providers with a batch endpoint should
    /// override this with a single request per call.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = crate::Result<Vec<Embedding>>> + Send {
        async move {
            let mut rows = Vec::with_capacity(texts.len());
            for text in texts {
                rows.push(self.embed(text).await?);
            }
            Ok(rows)
        }
    }
}
