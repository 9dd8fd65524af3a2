//! Document engine: reading plus chunking, with the active chunk list.

use std::path::Path;

use parking_lot::RwLock;

use crate::chunking::{Chunker, FixedSizeChunker, ParagraphChunker};
use crate::config::RagConfig;
use crate::error::{RagError, Result};
use crate::reader::DocumentReader;

/// Composes a [`DocumentReader`] and a [`Chunker`] into a single
/// document-to-chunk-list pipeline, and owns the most recently produced
/// chunk list for lookup by index position.
///
/// The engine holds at most one document's chunks at a time: processing a
/// new document replaces the previous list wholesale. This single-slot
/// design matches a single-session retrieval workflow; a multi-document
/// corpus would instead key chunk lists by a document identifier (e.g. a
/// content hash) and address chunks as (document, position) pairs.
pub struct DocumentEngine<R: DocumentReader> {
    reader: R,
    chunker: Box<dyn Chunker>,
    chunks: RwLock<Vec<String>>,
}

impl<R: DocumentReader> std::fmt::Debug for DocumentEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentEngine")
            .field("chunker", &self.chunker.name())
            .field("chunks", &self.chunks.read().len())
            .finish_non_exhaustive()
    }
}

impl<R: DocumentReader> DocumentEngine<R> {
    /// Creates an engine whose chunking strategy is selected by `config`:
    /// fixed-size windows when `chunk_size` and `overlap` are both set,
    /// paragraph splitting otherwise.
    pub fn new(reader: R, config: &RagConfig) -> Result<Self> {
        let chunker: Box<dyn Chunker> = match (config.chunk_size, config.overlap) {
            (Some(chunk_size), Some(overlap)) => {
                Box::new(FixedSizeChunker::new(chunk_size, overlap)?)
            }
            _ => Box::new(ParagraphChunker::new()),
        };
        Ok(Self::with_chunker(reader, chunker))
    }

    /// Creates an engine with an explicit chunking strategy.
    #[must_use]
    pub fn with_chunker(reader: R, chunker: Box<dyn Chunker>) -> Self {
        Self {
            reader,
            chunker,
            chunks: RwLock::new(Vec::new()),
        }
    }

    /// Reads and chunks the document, then stores the produced chunk list
    /// as the active one, replacing whatever was there before.
    pub fn preprocess_document(&self, path: &Path) -> Result<Vec<String>> {
        let chunks = self.chunk_document(path)?;
        self.install_chunks(chunks.clone());
        Ok(chunks)
    }

    /// Reads and chunks the document without touching the active chunk
    /// list. Callers that need an all-or-nothing state transition run this
    /// first and commit via [`install_chunks`](Self::install_chunks) once
    /// every later stage has succeeded.
    pub fn chunk_document(&self, path: &Path) -> Result<Vec<String>> {
        let pages = self.reader.read(path)?;

        let mut readable = Vec::with_capacity(pages.len());
        let mut first_failure = None;
        for (page, content) in pages.iter().enumerate() {
            match content {
                crate::reader::PageContent::Text(text) => readable.push(text.as_str()),
                crate::reader::PageContent::Unreadable { reason } => {
                    tracing::warn!(page, %reason, "skipping unreadable page");
                    if first_failure.is_none() {
                        first_failure = Some(reason.clone());
                    }
                }
            }
        }

        if readable.is_empty() {
            return Err(RagError::Unreadable {
                path: path.to_path_buf(),
                reason: first_failure
                    .unwrap_or_else(|| "document contains no extractable text".into()),
            });
        }

        // Pages are joined with a single newline so that a paragraph break
        // inside a page is still the only kind of blank-line boundary the
        // paragraph chunker sees.
        let text = readable.join("\n");
        self.chunker.chunk(&text)
    }

    /// Commits a chunk list as the active one.
    pub fn install_chunks(&self, chunks: Vec<String>) {
        *self.chunks.write() = chunks;
    }

    /// Looks up a chunk by its position in the active list.
    #[must_use]
    pub fn chunk(&self, index: usize) -> Option<String> {
        self.chunks.read().get(index).cloned()
    }

    /// Number of chunks in the active list.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::PageContent;

    /// Reader serving a fixed page list, ignoring the path.
    struct FixedPages(Vec<PageContent>);

    impl DocumentReader for FixedPages {
        fn read(&self, _path: &Path) -> Result<Vec<PageContent>> {
            Ok(self.0.clone())
        }
    }

    fn paragraph_engine(pages: Vec<PageContent>) -> DocumentEngine<FixedPages> {
        DocumentEngine::new(FixedPages(pages), &RagConfig::default()).unwrap()
    }

    #[test]
    fn preprocess_stores_chunks_for_lookup() {
        let engine = paragraph_engine(vec![PageContent::Text("one\n\ntwo".into())]);

        let chunks = engine.preprocess_document(Path::new("doc.pdf")).unwrap();

        assert_eq!(chunks, vec!["one", "two"]);
        assert_eq!(engine.chunk(0).as_deref(), Some("one"));
        assert_eq!(engine.chunk(1).as_deref(), Some("two"));
        assert_eq!(engine.chunk(2), None);
        assert_eq!(engine.chunk_count(), 2);
    }

    #[test]
    fn reprocessing_replaces_previous_chunks() {
        let engine = paragraph_engine(vec![PageContent::Text("old".into())]);
        engine.preprocess_document(Path::new("a.pdf")).unwrap();

        let engine2 = paragraph_engine(vec![PageContent::Text("brand\n\nnew".into())]);
        let chunks = engine2.preprocess_document(Path::new("b.pdf")).unwrap();
        engine.install_chunks(chunks);

        assert_eq!(engine.chunk_count(), 2);
        assert_eq!(engine.chunk(0).as_deref(), Some("brand"));
    }

    #[test]
    fn pages_join_with_single_newline() {
        let engine = paragraph_engine(vec![
            PageContent::Text("Alpha beta.\n\ngamma delta.".into()),
            PageContent::Text("Epsilon.".into()),
        ]);

        let chunks = engine.preprocess_document(Path::new("doc.pdf")).unwrap();

        assert_eq!(chunks, vec!["Alpha beta.", "gamma delta.\nEpsilon."]);
    }

    #[test]
    fn unreadable_pages_are_skipped() {
        let engine = paragraph_engine(vec![
            PageContent::Text("kept".into()),
            PageContent::Unreadable {
                reason: "broken stream".into(),
            },
            PageContent::Text("also kept".into()),
        ]);

        let chunks = engine.preprocess_document(Path::new("doc.pdf")).unwrap();

        assert_eq!(chunks, vec!["kept\nalso kept"]);
    }

    #[test]
    fn fully_unreadable_document_is_an_error() {
        let engine = paragraph_engine(vec![PageContent::Unreadable {
            reason: "encrypted".into(),
        }]);

        let err = engine.preprocess_document(Path::new("doc.pdf")).unwrap_err();

        assert!(matches!(err, RagError::Unreadable { reason, .. } if reason == "encrypted"));
        assert_eq!(engine.chunk_count(), 0);
    }

    #[test]
    fn chunk_document_does_not_commit() {
        let engine = paragraph_engine(vec![PageContent::Text("text".into())]);

        let chunks = engine.chunk_document(Path::new("doc.pdf")).unwrap();

        assert_eq!(chunks, vec!["text"]);
        assert_eq!(engine.chunk_count(), 0);
    }

    #[test]
    fn fixed_config_selects_fixed_chunker() {
        let config = RagConfig::builder().chunk_size(4).overlap(1).build();
        let engine =
            DocumentEngine::new(FixedPages(vec![PageContent::Text("abcdefgh".into())]), &config)
                .unwrap();

        let chunks = engine.preprocess_document(Path::new("doc.pdf")).unwrap();

        assert_eq!(chunks, vec!["abcd", "defg", "gh"]);
    }

    #[test]
    fn invalid_fixed_config_is_rejected_at_construction() {
        let config = RagConfig::builder().chunk_size(8).overlap(8).build();
        let err = DocumentEngine::new(FixedPages(Vec::new()), &config).unwrap_err();

        assert!(matches!(err, RagError::ChunkConfig { .. }));
    }
}
