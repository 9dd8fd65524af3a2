use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the PDF extraction pipeline.
#[derive(Debug, Error)]
pub enum PdfProcessError {
    /// The source path does not exist on the filesystem.
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The input bytes do not decode as a valid PDF structure.
    #[error("failed to parse PDF: {0}")]
    Parse(String),
    /// The source PDF could not be read from the filesystem.
    #[error("failed to read PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, PdfProcessError>;
