//! Document reading boundary.
//!
//! The [`DocumentReader`] trait is the seam between the RAG pipeline and
//! whatever produces per-page text: the bundled [`PdfReader`] in
//! production, or an in-memory fake in tests.

use std::path::Path;

use tome_pdf_process::{PdfExtractor, PdfProcessError};

pub use tome_pdf_process::PageContent;

use crate::error::{RagError, Result};

/// Produces ordered per-page content for a document path.
pub trait DocumentReader: Send + Sync {
    /// Reads the document, returning one [`PageContent`] per page in
    /// physical order.
    ///
    /// Fails with [`RagError::NotFound`] when the path does not exist.
    /// Pages that exist but cannot be decoded are reported as
    /// [`PageContent::Unreadable`] entries, not errors.
    fn read(&self, path: &Path) -> Result<Vec<PageContent>>;
}

/// [`DocumentReader`] backed by [`tome_pdf_process`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Creates a PDF reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentReader for PdfReader {
    fn read(&self, path: &Path) -> Result<Vec<PageContent>> {
        PdfExtractor::from_path(path)
            .pages()
            .map_err(|err| match err {
                PdfProcessError::NotFound(path) => RagError::NotFound { path },
                PdfProcessError::Parse(reason) => RagError::Unreadable {
                    path: path.to_path_buf(),
                    reason,
                },
                PdfProcessError::Io(err) => RagError::Io(err),
            })
    }
}
