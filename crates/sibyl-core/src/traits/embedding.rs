// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding trait for dense vector generation.

use async_trait::async_trait;

use crate::error::SibylError;
use crate::types::{EmbeddingInput, EmbeddingOutput};

/// Generates dense vector embeddings for text.
///
/// Powers the semantic half of hybrid retrieval. The model choice is a
/// deployment concern; callers only rely on stable dimensionality.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + 'static {
    /// Generates embeddings for the given input, one vector per text.
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, SibylError>;
}
