//! `OpenAI`-compatible embedding provider for tome.
//!
//! One client covers `OpenAI`, Azure `OpenAI`, and TogetherAI style
//! endpoints: they share the `/embeddings` request shape and differ only in
//! base URL and auth header, both of which are configurable. Transient
//! failures (transport errors, 429s, 5xx) are retried with exponential
//! backoff and jitter per [`RetryConfig`]; everything else surfaces
//! immediately.
//!
//! ```rust,no_run
//! use tome_core::EmbeddingModel;
//! use tome_openai::OpenAI;
//!
//! # async fn demo() -> tome_core::Result<()> {
//! let model = OpenAI::new(std::env::var("OPENAI_API_KEY").unwrap_or_default());
//! let vector = model.embed("The quick brown fox").await?;
//! assert_eq!(vector.len(), model.dim());
//! # Ok(())
//! # }
//! ```

mod client;
mod embedding;
mod error;

pub use client::{
    AuthStyle, Builder, DEFAULT_BASE_URL, DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_MODEL, OpenAI,
    RetryConfig, TOGETHER_BASE_URL,
};
pub use error::OpenAIError;
