//! Per-page PDF text extraction.
//!
//! This crate turns a PDF into an ordered sequence of per-page results for
//! retrieval pipelines. Extraction never aborts halfway through a document:
//! a page (or the whole document) that cannot be decoded is reported as
//! [`PageContent::Unreadable`] so the caller decides whether to skip it or
//! surface the failure, instead of an error string being silently treated
//! as document content downstream.

mod error;

pub use error::{PdfProcessError, Result};

use std::path::{Path, PathBuf};

use lopdf::Document;

/// The extraction result for a single page, in physical page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// Text extracted from the page.
    Text(String),
    /// The page (or the whole document) could not be decoded.
    Unreadable {
        /// Human-readable decode failure description.
        reason: String,
    },
}

impl PageContent {
    /// Returns the extracted text, or `None` for unreadable pages.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Unreadable { .. } => None,
        }
    }

    /// Returns `true` if the page could not be decoded.
    #[must_use]
    pub const fn is_unreadable(&self) -> bool {
        matches!(self, Self::Unreadable { .. })
    }
}

/// PDF extractor entrypoint.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    source: PdfSource,
}

#[derive(Debug, Clone)]
enum PdfSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl PdfExtractor {
    /// Build an extractor from a PDF file path.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: PdfSource::Path(path.into()),
        }
    }

    /// Build an extractor from PDF bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            source: PdfSource::Bytes(bytes.into()),
        }
    }

    /// Extracts per-page text, one entry per page in physical order.
    ///
    /// A missing file fails with [`PdfProcessError::NotFound`]. A document
    /// that does not decode at all yields a single
    /// [`PageContent::Unreadable`] entry rather than an error, keeping
    /// ingestion pipelines non-fatal on malformed input; individual pages
    /// that fail to decode become `Unreadable` entries while the remaining
    /// pages are still extracted.
    pub fn pages(&self) -> Result<Vec<PageContent>> {
        let doc = match &self.source {
            PdfSource::Path(path) => {
                if !path.exists() {
                    return Err(PdfProcessError::NotFound(path.clone()));
                }
                Document::load(path)
            }
            PdfSource::Bytes(bytes) => Document::load_mem(bytes),
        };

        let doc = match doc {
            Ok(doc) => doc,
            Err(err) => {
                return Ok(vec![PageContent::Unreadable {
                    reason: err.to_string(),
                }]);
            }
        };

        let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        page_numbers.sort_unstable();

        let pages = page_numbers
            .into_iter()
            .map(|number| match doc.extract_text(&[number]) {
                Ok(text) => PageContent::Text(text),
                Err(err) => PageContent::Unreadable {
                    reason: err.to_string(),
                },
            })
            .collect();

        Ok(pages)
    }

    /// Returns the source path if the extractor was built from one.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        match &self.source {
            PdfSource::Path(path) => Some(path.as_path()),
            PdfSource::Bytes(_) => None,
        }
    }
}
