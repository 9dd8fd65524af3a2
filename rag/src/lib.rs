//! Retrieval-Augmented Generation pipeline.
//!
//! This crate turns a document into searchable context for an LLM chat
//! application:
//!
//! - [`chunking`] splits extracted text into ordered chunks (fixed-width
//!   overlapping windows or blank-line paragraphs);
//! - [`reader`] is the per-page document reading boundary, with a bundled
//!   PDF implementation;
//! - [`DocumentEngine`] composes the two and keeps the active document's
//!   chunk list;
//! - [`index`] holds the flat exhaustive L2 nearest-neighbor index;
//! - [`RagManager`] orchestrates the whole flow against any
//!   [`EmbeddingModel`](tome_core::EmbeddingModel): batched embedding on
//!   ingest, query embedding plus index lookup on retrieval.
//!
//! Chunk order is load-bearing everywhere: chunk `i` produces embedding
//! matrix row `i` which lands at index position `i`, so retrieval results
//! resolve back to chunk texts by position alone.
//!
//! ```rust,no_run
//! use tome_rag::{RagConfig, RagManager, reader::PdfReader};
//! # use tome_core::EmbeddingModel;
//! # async fn demo(embedder: impl EmbeddingModel) -> tome_rag::Result<()> {
//! let manager = RagManager::new(embedder, PdfReader::new(), RagConfig::default())?;
//! manager.process_document("manual.pdf", 32).await?;
//! let context = manager.search_similar_chunks("how do I reset it?", 5).await?;
//! # Ok(())
//! # }
//! ```

pub mod chunking;
pub mod index;
pub mod reader;

mod config;
mod engine;
mod error;
mod manager;
mod types;

pub use config::{RagConfig, RagConfigBuilder};
pub use engine::DocumentEngine;
pub use error::{RagError, Result};
pub use manager::RagManager;
pub use types::{EmbeddingMatrix, SearchHit};
