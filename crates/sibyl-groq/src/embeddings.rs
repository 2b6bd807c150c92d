// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible embedding endpoints.
//!
//! Targets a locally hosted embedding server (e.g., text-embeddings-inference)
//! so no authentication header is sent.

use std::time::Duration;

use async_trait::async_trait;
use sibyl_core::error::SibylError;
use sibyl_core::traits::EmbeddingProvider;
use sibyl_core::types::{EmbeddingInput, EmbeddingOutput};
use tracing::debug;

use crate::client::format_api_error;
use crate::types::{EmbeddingRequest, EmbeddingResponse};

/// HTTP client for an OpenAI-compatible `/embeddings` endpoint.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl EmbeddingClient {
    /// Creates a new embedding client for the given API root.
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self, SibylError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SibylError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            base_url,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingClient {
    /// Embeds a batch of texts, preserving input order.
    ///
    /// All returned vectors must share one dimensionality; a ragged
    /// response is rejected rather than passed downstream.
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, SibylError> {
        if input.texts.is_empty() {
            return Ok(EmbeddingOutput {
                embeddings: Vec::new(),
                dimensions: 0,
            });
        }

        let request = EmbeddingRequest {
            model: self.model.clone(),
            input: input.texts,
        };
        let url = format!("{}/embeddings", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SibylError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "embedding response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SibylError::Provider {
                message: format_api_error(status, &body),
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| SibylError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let mut parsed: EmbeddingResponse =
            serde_json::from_str(&body).map_err(|e| SibylError::Provider {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            })?;

        if parsed.data.len() != request.input.len() {
            return Err(SibylError::Provider {
                message: format!(
                    "embedding count mismatch: sent {} texts, got {} vectors",
                    request.input.len(),
                    parsed.data.len()
                ),
                source: None,
            });
        }

        // Restore input order; servers may return data out of order.
        parsed.data.sort_by_key(|d| d.index);
        let dimensions = parsed.data[0].embedding.len();
        if parsed.data.iter().any(|d| d.embedding.len() != dimensions) {
            return Err(SibylError::Provider {
                message: "embedding response contained ragged vector lengths".into(),
                source: None,
            });
        }

        Ok(EmbeddingOutput {
            embeddings: parsed.data.into_iter().map(|d| d.embedding).collect(),
            dimensions,
        })
    }
}
