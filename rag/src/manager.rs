//! High-level RAG orchestrator.

use std::path::Path;

use parking_lot::RwLock;

use tome_core::embedding::EmbeddingModel;

use crate::config::RagConfig;
use crate::engine::DocumentEngine;
use crate::error::{RagError, Result};
use crate::index::FlatIndex;
use crate::reader::DocumentReader;
use crate::types::EmbeddingMatrix;

/// Ties a [`DocumentEngine`], an [`EmbeddingModel`], and a [`FlatIndex`]
/// together into the two operations a chat application needs: ingest a
/// document and retrieve the chunks most similar to a query.
///
/// A manager is constructed per session with its collaborators passed in
/// explicitly; it exclusively owns its engine and index and must not be
/// shared between concurrent writers. Ingestion is all-or-nothing: the
/// chunk list, every embedding batch, and a freshly built index are staged
/// in full before a single commit point, so a failed
/// [`process_document`](Self::process_document) leaves the previous state
/// (empty, or the prior document) untouched, and a successful one replaces
/// it wholesale. Nothing is cached, deduplicated, or persisted: the index
/// and chunk list live and die with the manager instance.
pub struct RagManager<M: EmbeddingModel, R: DocumentReader> {
    embedder: M,
    engine: DocumentEngine<R>,
    index: RwLock<FlatIndex>,
    config: RagConfig,
}

impl<M: EmbeddingModel, R: DocumentReader> std::fmt::Debug for RagManager<M, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagManager")
            .field("engine", &self.engine)
            .field("index", &*self.index.read())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<M, R> RagManager<M, R>
where
    M: EmbeddingModel,
    R: DocumentReader,
{
    /// Creates a manager from its collaborators.
    ///
    /// Fails with [`RagError::ChunkConfig`] when the configuration selects
    /// fixed-size chunking with `overlap >= chunk_size`.
    pub fn new(embedder: M, reader: R, config: RagConfig) -> Result<Self> {
        let engine = DocumentEngine::new(reader, &config)?;
        Ok(Self::with_engine(embedder, engine, config))
    }

    /// Creates a manager around an already-built engine.
    #[must_use]
    pub fn with_engine(embedder: M, engine: DocumentEngine<R>, config: RagConfig) -> Self {
        Self {
            embedder,
            engine,
            index: RwLock::new(FlatIndex::new()),
            config,
        }
    }

    /// Ingests a document: read, chunk, embed in buckets of at most
    /// `batch_size` chunks, and index.
    ///
    /// Buckets are embedded sequentially in list order and their rows
    /// concatenated in request order, so embedding row `i` is always chunk
    /// `i`. Returns the number of chunks indexed.
    ///
    /// A missing file fails immediately with [`RagError::NotFound`] and a
    /// zero `batch_size` with [`RagError::InvalidBatchSize`]; every other
    /// reading, embedding, or indexing failure is re-raised as
    /// [`RagError::Processing`] carrying the original cause, and leaves the
    /// manager's previous state intact.
    pub async fn process_document(
        &self,
        path: impl AsRef<Path>,
        batch_size: usize,
    ) -> Result<usize> {
        let path = path.as_ref();
        if batch_size == 0 {
            return Err(RagError::InvalidBatchSize);
        }

        let chunks = self.engine.chunk_document(path).map_err(|err| match err {
            err @ RagError::NotFound { .. } => err,
            other => RagError::Processing(anyhow::Error::new(other)),
        })?;

        let mut rows = Vec::with_capacity(chunks.len());
        for (bucket_idx, bucket) in chunks.chunks(batch_size).enumerate() {
            let bucket_rows = self
                .embedder
                .embed_batch(bucket)
                .await
                .map_err(RagError::Processing)?;
            if bucket_rows.len() != bucket.len() {
                return Err(RagError::Processing(anyhow::anyhow!(
                    "embedding provider returned {} rows for a bucket of {} chunks",
                    bucket_rows.len(),
                    bucket.len()
                )));
            }
            rows.extend(bucket_rows);
            tracing::debug!(
                bucket = bucket_idx,
                embedded = rows.len(),
                total = chunks.len(),
                "embedded chunk bucket"
            );
        }

        let matrix = EmbeddingMatrix::from_rows(rows)
            .map_err(|err| RagError::Processing(anyhow::Error::new(err)))?;

        let staged = FlatIndex::new();
        staged
            .add(&matrix)
            .map_err(|err| RagError::Processing(anyhow::Error::new(err)))?;

        // Commit point: everything before this can fail without touching
        // the active chunk list or index.
        let count = chunks.len();
        self.engine.install_chunks(chunks);
        *self.index.write() = staged;
        tracing::debug!(chunks = count, "document indexed");

        Ok(count)
    }

    /// Retrieves the `top_k` chunks most similar to `query`, nearest first.
    ///
    /// The query is embedded as a one-row matrix, searched against the
    /// index, and each hit is resolved back into the text of the chunk at
    /// that index position. Any embedding or search failure — including
    /// searching before any document was processed — is re-raised as
    /// [`RagError::Processing`] carrying the original cause.
    pub async fn search_similar_chunks(&self, query: &str, top_k: usize) -> Result<Vec<String>> {
        let embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(RagError::Processing)?;
        let queries = EmbeddingMatrix::from_rows(vec![embedding])
            .map_err(|err| RagError::Processing(anyhow::Error::new(err)))?;

        let hits = self
            .index
            .read()
            .search(&queries, top_k)
            .map_err(|err| RagError::Processing(anyhow::Error::new(err)))?;

        let hits = hits.into_iter().next().unwrap_or_default();
        hits.iter()
            .map(|hit| {
                self.engine.chunk(hit.index).ok_or_else(|| {
                    RagError::Processing(anyhow::anyhow!(
                        "index position {} has no matching chunk",
                        hit.index
                    ))
                })
            })
            .collect()
    }

    /// Number of indexed vectors (equals the active document's chunk count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    /// Returns `true` while no document has been ingested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` once a document has been ingested and searches can
    /// succeed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.is_empty()
    }

    /// Returns the document engine.
    pub const fn engine(&self) -> &DocumentEngine<R> {
        &self.engine
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &RagConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::PageContent;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Reader serving page lists keyed by path.
    struct PathPages(HashMap<PathBuf, Vec<PageContent>>);

    impl PathPages {
        fn single(path: &str, pages: Vec<PageContent>) -> Self {
            Self(HashMap::from([(PathBuf::from(path), pages)]))
        }
    }

    impl DocumentReader for PathPages {
        fn read(&self, path: &Path) -> Result<Vec<PageContent>> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| RagError::NotFound {
                    path: path.to_path_buf(),
                })
        }
    }

    /// Deterministic embedder: the vector encodes the text length, so any
    /// exact chunk text embeds at distance zero from itself.
    #[derive(Clone)]
    struct MockEmbedder {
        dimension: usize,
        batch_sizes: Arc<Mutex<Vec<usize>>>,
    }

    impl MockEmbedder {
        fn new(dimension: usize) -> Self {
            Self {
                dimension,
                batch_sizes: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl EmbeddingModel for MockEmbedder {
        fn dim(&self) -> usize {
            self.dimension
        }

        #[allow(clippy::cast_precision_loss)]
        async fn embed(&self, text: &str) -> tome_core::Result<Vec<f32>> {
            let mut vec = vec![0.0; self.dimension];
            vec[0] = text.len() as f32;
            Ok(vec)
        }

        async fn embed_batch(&self, texts: &[String]) -> tome_core::Result<Vec<Vec<f32>>> {
            self.batch_sizes.lock().unwrap().push(texts.len());
            let mut rows = Vec::with_capacity(texts.len());
            for text in texts {
                rows.push(self.embed(text).await?);
            }
            Ok(rows)
        }
    }

    /// Embedder with hand-programmed vectors per text.
    struct TableEmbedder {
        dimension: usize,
        table: HashMap<String, Vec<f32>>,
    }

    impl EmbeddingModel for TableEmbedder {
        fn dim(&self) -> usize {
            self.dimension
        }

        async fn embed(&self, text: &str) -> tome_core::Result<Vec<f32>> {
            Ok(self
                .table
                .get(text)
                .cloned()
                .unwrap_or_else(|| vec![0.0; self.dimension]))
        }
    }

    /// Embedder whose nth `embed_batch` call fails.
    struct FlakyEmbedder {
        inner: MockEmbedder,
        fail_at_call: usize,
        calls: AtomicUsize,
    }

    impl EmbeddingModel for FlakyEmbedder {
        fn dim(&self) -> usize {
            self.inner.dim()
        }

        async fn embed(&self, text: &str) -> tome_core::Result<Vec<f32>> {
            self.inner.embed(text).await
        }

        async fn embed_batch(&self, texts: &[String]) -> tome_core::Result<Vec<Vec<f32>>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_at_call {
                anyhow::bail!("embedding backend unavailable");
            }
            self.inner.embed_batch(texts).await
        }
    }

    fn manager<M: EmbeddingModel>(embedder: M, reader: PathPages) -> RagManager<M, PathPages> {
        RagManager::new(embedder, reader, RagConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn ingest_then_search_returns_chunk_texts() {
        let reader = PathPages::single(
            "doc.pdf",
            vec![
                PageContent::Text("Alpha beta.\n\ngamma delta.".into()),
                PageContent::Text("Epsilon.".into()),
            ],
        );
        let embedder = TableEmbedder {
            dimension: 4,
            table: HashMap::from([
                ("Alpha beta.".to_string(), vec![1.0, 0.0, 0.0, 0.0]),
                (
                    "gamma delta.\nEpsilon.".to_string(),
                    vec![0.0, 1.0, 0.0, 0.0],
                ),
                ("beta".to_string(), vec![0.9, 0.1, 0.0, 0.0]),
            ]),
        };
        let manager = manager(embedder, reader);

        let indexed = manager.process_document("doc.pdf", 32).await.unwrap();

        assert_eq!(indexed, 2);
        assert!(manager.is_ready());
        assert_eq!(manager.len(), 2);

        let results = manager.search_similar_chunks("beta", 1).await.unwrap();
        assert_eq!(results, vec!["Alpha beta.".to_string()]);
    }

    #[tokio::test]
    async fn chunks_are_embedded_in_buckets_of_batch_size() {
        let reader = PathPages::single(
            "doc.pdf",
            vec![PageContent::Text("c1\n\nc22\n\nc333\n\nc4444\n\nc55555".into())],
        );
        let embedder = MockEmbedder::new(4);
        let batch_sizes = Arc::clone(&embedder.batch_sizes);
        let manager = manager(embedder, reader);

        let indexed = manager.process_document("doc.pdf", 2).await.unwrap();

        assert_eq!(indexed, 5);
        assert_eq!(*batch_sizes.lock().unwrap(), vec![2, 2, 1]);

        // Row order survived the bucket boundaries: an exact chunk text
        // embeds at distance zero and must resolve back to itself.
        let results = manager.search_similar_chunks("c333", 1).await.unwrap();
        assert_eq!(results, vec!["c333".to_string()]);
    }

    #[tokio::test]
    async fn zero_batch_size_is_rejected_immediately() {
        let reader = PathPages::single("doc.pdf", vec![PageContent::Text("text".into())]);
        let manager = manager(MockEmbedder::new(4), reader);

        let err = manager.process_document("doc.pdf", 0).await.unwrap_err();
        assert!(matches!(err, RagError::InvalidBatchSize));
        assert!(manager.is_empty());
    }

    #[tokio::test]
    async fn missing_document_fails_with_not_found() {
        let reader = PathPages::single("doc.pdf", vec![PageContent::Text("text".into())]);
        let manager = manager(MockEmbedder::new(4), reader);

        let err = manager.process_document("other.pdf", 8).await.unwrap_err();
        assert!(matches!(err, RagError::NotFound { .. }));
    }

    #[tokio::test]
    async fn search_before_ingest_fails_with_wrapped_empty_index() {
        let reader = PathPages::single("doc.pdf", vec![PageContent::Text("text".into())]);
        let manager = manager(MockEmbedder::new(4), reader);

        let err = manager.search_similar_chunks("anything", 3).await.unwrap_err();

        let RagError::Processing(cause) = err else {
            panic!("expected Processing, got {err:?}");
        };
        assert!(cause.to_string().contains("empty index"));
    }

    #[tokio::test]
    async fn failed_ingestion_leaves_previous_state_intact() {
        let reader = PathPages(HashMap::from([
            (
                PathBuf::from("a.pdf"),
                vec![PageContent::Text("alpha".into())],
            ),
            (
                PathBuf::from("b.pdf"),
                vec![PageContent::Text("b1\n\nb2\n\nb3\n\nb4".into())],
            ),
        ]));
        let embedder = FlakyEmbedder {
            inner: MockEmbedder::new(4),
            // Call 1 ingests a.pdf; b.pdf needs two buckets and dies on its
            // second one.
            fail_at_call: 3,
            calls: AtomicUsize::new(0),
        };
        let manager = manager(embedder, reader);

        manager.process_document("a.pdf", 8).await.unwrap();
        assert_eq!(manager.len(), 1);

        let err = manager.process_document("b.pdf", 2).await.unwrap_err();
        assert!(matches!(err, RagError::Processing(_)));

        // Previous document still fully searchable.
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.engine().chunk(0).as_deref(), Some("alpha"));
        let results = manager.search_similar_chunks("alpha", 1).await.unwrap();
        assert_eq!(results, vec!["alpha".to_string()]);
    }

    #[tokio::test]
    async fn reingestion_replaces_the_previous_document() {
        let reader = PathPages(HashMap::from([
            (
                PathBuf::from("a.pdf"),
                vec![PageContent::Text("one\n\ntwo".into())],
            ),
            (
                PathBuf::from("b.pdf"),
                vec![PageContent::Text("x\n\ny\n\nz".into())],
            ),
        ]));
        let manager = manager(MockEmbedder::new(4), reader);

        manager.process_document("a.pdf", 8).await.unwrap();
        assert_eq!(manager.len(), 2);

        manager.process_document("b.pdf", 8).await.unwrap();
        assert_eq!(manager.len(), 3);
        assert_eq!(manager.engine().chunk(0).as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn duplicate_chunk_texts_are_indexed_separately() {
        let reader = PathPages::single("doc.pdf", vec![PageContent::Text("dup\n\ndup".into())]);
        let manager = manager(MockEmbedder::new(4), reader);

        manager.process_document("doc.pdf", 8).await.unwrap();

        assert_eq!(manager.len(), 2);
        let results = manager.search_similar_chunks("dup", 2).await.unwrap();
        assert_eq!(results, vec!["dup".to_string(), "dup".to_string()]);
    }
}
