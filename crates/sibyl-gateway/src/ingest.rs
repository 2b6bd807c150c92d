// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document ingestion: chunking, embedding, and index updates.
//!
//! Ingests are serialized by an async mutex so concurrent uploads cannot
//! interleave corpus updates. Embedding happens before either index is
//! touched; a failed batch leaves both indexes unchanged.

use std::sync::Arc;

use sibyl_core::error::SibylError;
use sibyl_core::traits::EmbeddingProvider;
use sibyl_core::types::EmbeddingInput;
use sibyl_index::{LexicalIndex, VectorIndex, chunk_text, validate_chunk_params};
use tokio::sync::Mutex;
use tracing::info;

/// Summary of one ingest operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReceipt {
    /// Chunks produced from this upload.
    pub chunks_added: usize,
    /// Corpus size after the upload.
    pub total_chunks: usize,
}

/// Applies uploads to the lexical and vector indexes.
pub struct IngestService {
    lexical: Arc<LexicalIndex>,
    vector: Arc<VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    chunk_size: usize,
    chunk_overlap: usize,
    /// Accumulated chunk texts, in corpus order. The mutex serializes
    /// ingests end to end.
    corpus: Mutex<Vec<String>>,
}

impl std::fmt::Debug for IngestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestService")
            .field("chunk_size", &self.chunk_size)
            .field("chunk_overlap", &self.chunk_overlap)
            .finish_non_exhaustive()
    }
}

impl IngestService {
    /// Rejects a `chunk_size`/`chunk_overlap` pair the chunker cannot use,
    /// so a misconfigured server fails at startup rather than on the first
    /// upload.
    pub fn new(
        lexical: Arc<LexicalIndex>,
        vector: Arc<VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Result<Self, SibylError> {
        validate_chunk_params(chunk_size, chunk_overlap)?;
        Ok(Self {
            lexical,
            vector,
            embedder,
            chunk_size,
            chunk_overlap,
            corpus: Mutex::new(Vec::new()),
        })
    }

    /// Chunk, embed, and index one document.
    ///
    /// All-or-nothing: if embedding or the vector append fails, neither
    /// index observes any part of this upload.
    pub async fn ingest(&self, text: &str) -> Result<IngestReceipt, SibylError> {
        let chunks = chunk_text(text, self.chunk_size, self.chunk_overlap)?;

        let mut corpus = self.corpus.lock().await;

        if chunks.is_empty() {
            return Ok(IngestReceipt {
                chunks_added: 0,
                total_chunks: corpus.len(),
            });
        }

        let output = self
            .embedder
            .embed(EmbeddingInput {
                texts: chunks.clone(),
            })
            .await?;
        if output.embeddings.len() != chunks.len() {
            return Err(SibylError::Index(format!(
                "embedding batch size mismatch: {} chunks, {} vectors",
                chunks.len(),
                output.embeddings.len()
            )));
        }

        self.vector.add(output.embeddings)?;
        let chunks_added = chunks.len();
        corpus.extend(chunks);
        self.lexical.build(corpus.clone());

        info!(chunks_added, total = corpus.len(), "document ingested");

        Ok(IngestReceipt {
            chunks_added,
            total_chunks: corpus.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sibyl_core::types::EmbeddingOutput;

    struct ZeroEmbedder;

    #[async_trait]
    impl EmbeddingProvider for ZeroEmbedder {
        async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, SibylError> {
            Ok(EmbeddingOutput {
                embeddings: input.texts.iter().map(|_| vec![0.0, 0.0]).collect(),
                dimensions: 2,
            })
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FailingEmbedder {
        async fn embed(&self, _input: EmbeddingInput) -> Result<EmbeddingOutput, SibylError> {
            Err(SibylError::Provider {
                message: "embedding backend down".into(),
                source: None,
            })
        }
    }

    fn service(embedder: Arc<dyn EmbeddingProvider>) -> IngestService {
        IngestService::new(
            Arc::new(LexicalIndex::new()),
            Arc::new(VectorIndex::new()),
            embedder,
            10,
            2,
        )
        .unwrap()
    }

    #[test]
    fn overlap_not_smaller_than_size_is_rejected_at_construction() {
        let err = IngestService::new(
            Arc::new(LexicalIndex::new()),
            Arc::new(VectorIndex::new()),
            Arc::new(ZeroEmbedder),
            100,
            100,
        )
        .unwrap_err();
        assert!(matches!(err, SibylError::Config(_)));
    }

    #[tokio::test]
    async fn ingest_updates_both_indexes() {
        let svc = service(Arc::new(ZeroEmbedder));

        let receipt = svc.ingest("abcdefghij-second-chunk").await.unwrap();
        assert!(receipt.chunks_added >= 2);
        assert_eq!(receipt.total_chunks, receipt.chunks_added);

        assert_eq!(svc.lexical.snapshot().len(), receipt.total_chunks);
        assert_eq!(svc.vector.len(), receipt.total_chunks);
    }

    #[tokio::test]
    async fn ingest_accumulates_across_uploads() {
        let svc = service(Arc::new(ZeroEmbedder));

        let first = svc.ingest("short").await.unwrap();
        let second = svc.ingest("other").await.unwrap();

        assert_eq!(first.total_chunks, 1);
        assert_eq!(second.total_chunks, 2);
        assert_eq!(svc.lexical.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn empty_text_adds_nothing() {
        let svc = service(Arc::new(ZeroEmbedder));

        let receipt = svc.ingest("").await.unwrap();
        assert_eq!(receipt.chunks_added, 0);
        assert_eq!(receipt.total_chunks, 0);
        assert!(svc.vector.is_empty());
    }

    #[tokio::test]
    async fn embedding_failure_leaves_indexes_unchanged() {
        let svc = service(Arc::new(FailingEmbedder));

        let err = svc.ingest("some document").await.unwrap_err();
        assert!(matches!(err, SibylError::Provider { .. }));
        assert!(svc.vector.is_empty());
        assert!(svc.lexical.snapshot().is_empty());
    }
}
