// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid retriever fusing lexical and vector candidates.
//!
//! The two score scales (BM25 and Euclidean distance) are not comparable,
//! so fusion is a pure ordered union with dedup and truncation, not score
//! blending. A weighted or learned fusion can replace this behind the same
//! contract (ranked sequence of length <= k).

use std::sync::Arc;

use sibyl_core::error::SibylError;
use sibyl_core::traits::EmbeddingProvider;
use sibyl_core::types::{DocumentChunk, EmbeddingInput};
use tracing::debug;

use crate::lexical::LexicalIndex;
use crate::vector::VectorIndex;

/// Combines the lexical index and vector index into one ranked result set.
///
/// Depends on the caller keeping both indexes built from the same
/// accumulated chunk set in the same order; the retriever itself does not
/// enforce that invariant.
pub struct HybridRetriever {
    lexical: Arc<LexicalIndex>,
    vector: Arc<VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl HybridRetriever {
    pub fn new(
        lexical: Arc<LexicalIndex>,
        vector: Arc<VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            lexical,
            vector,
            embedder,
        }
    }

    /// Top-k chunks for the query, fused from both retrieval paths.
    ///
    /// 1. Embeds the query and takes the k nearest vector hits
    /// 2. Takes the top-k BM25 hits from the current lexical snapshot
    /// 3. Unions them, vector rank order first, deduplicating by chunk id
    /// 4. Truncates to k
    ///
    /// An empty corpus yields an empty result; k larger than the corpus
    /// returns whatever is available, not padded.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<DocumentChunk>, SibylError> {
        let snapshot = self.lexical.snapshot();
        if snapshot.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let output = self
            .embedder
            .embed(EmbeddingInput {
                texts: vec![query.to_string()],
            })
            .await?;
        let query_embedding = output
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| SibylError::Internal("embedding returned no results".to_string()))?;

        let vector_hits = self.vector.search(&query_embedding, k);
        let lexical_hits = snapshot.top_k(query, k);

        debug!(
            vector = vector_hits.len(),
            lexical = lexical_hits.len(),
            "fusing retrieval candidates"
        );

        let mut seen = vec![false; snapshot.len()];
        let mut fused = Vec::with_capacity(k);
        let candidate_ids = vector_hits
            .iter()
            .map(|(id, _)| *id)
            .chain(lexical_hits.iter().map(|(id, _)| *id));

        for id in candidate_ids {
            if fused.len() == k {
                break;
            }
            // Vector ids beyond the snapshot mean an ingest is mid-flight;
            // the held snapshot stays authoritative.
            let Some(text) = snapshot.text(id) else {
                continue;
            };
            if seen[id] {
                continue;
            }
            seen[id] = true;
            fused.push(DocumentChunk {
                id,
                text: text.to_string(),
            });
        }

        Ok(fused)
    }
}
