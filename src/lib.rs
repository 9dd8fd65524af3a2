#![no_std]
//! # tome
//!
//! High level façade crate for building document-grounded LLM chat
//! applications. Pull this crate into your binary to ingest documents,
//! embed them through any provider that implements the core traits, and
//! retrieve the best-matching chunks at question time.
//!
//! ## What's inside?
//!
//! - [`EmbeddingModel`](tome_core::EmbeddingModel) — the provider boundary:
//!   single and batched text-to-vector conversion.
//! - `tome-rag` (feature `rag`) — chunking, flat L2 indexing, and the
//!   ingestion/retrieval manager.
//! - `tome-pdf-process` (feature `pdf-process`) — per-page PDF text
//!   extraction with tagged unreadable-page results.
//! - `tome-openai` (feature `openai`) — an `OpenAI`-compatible embedding
//!   client with retry/backoff, covering Azure `OpenAI` and TogetherAI
//!   style endpoints through one configurable surface.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tome::rag::{RagConfig, RagManager, reader::PdfReader};
//! use tome_openai::OpenAI;
//!
//! async fn demo(api_key: &str) -> tome::Result<()> {
//!     let embedder = OpenAI::new(api_key);
//!     let manager = RagManager::new(embedder, PdfReader::new(), RagConfig::default())?;
//!
//!     manager.process_document("manual.pdf", 32).await?;
//!     let context = manager.search_similar_chunks("how do I reset it?", 5).await?;
//!     for chunk in context {
//!         println!("{chunk}");
//!     }
//!     Ok(())
//! }
//! ```

pub use tome_core::*;

/// Retrieval-augmented generation pipeline.
#[cfg(feature = "rag")]
pub use tome_rag as rag;

/// Per-page PDF text extraction.
#[cfg(feature = "pdf-process")]
pub use tome_pdf_process as pdf_process;

/// `OpenAI`-compatible embedding provider.
#[cfg(feature = "openai")]
pub use tome_openai as openai;
