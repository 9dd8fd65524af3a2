//! # tome-core
//!
//! `tome-core` hosts the no-std trait APIs that power the rest of the
//! workspace. The chat application, the retrieval pipeline, and every
//! provider crate meet at these traits: a provider crate implements
//! [`EmbeddingModel`], and everything downstream stays portable across
//! `OpenAI`, Azure, or local inference backends.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Your App      │───▶│   tome-core      │◀───│   Providers     │
//! │                 │    │   (this crate)   │    │                 │
//! │ - Chat bots     │    │                  │    │ - openai        │
//! │ - Document Q&A  │    │ - EmbeddingModel │    │ - azure         │
//! │ - Search        │    │                  │    │ - togetherai    │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```

#![no_std]
extern crate alloc;

/// Text embeddings.
pub mod embedding;

use alloc::string::String;

#[doc(inline)]
pub use embedding::EmbeddingModel;

/// Result type used throughout the crate.
///
/// Type alias for [`anyhow::Result<T>`](anyhow::Result) with [`String`] as default success type.
pub type Result<T = String> = anyhow::Result<T>;

pub use anyhow::Error;
