// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groq chat-completion and embedding adapters for the Sibyl agent.
//!
//! This crate implements [`CompletionProvider`] over the Groq
//! OpenAI-compatible chat API and [`EmbeddingProvider`] over an
//! OpenAI-compatible `/embeddings` endpoint.

pub mod client;
pub mod embeddings;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use sibyl_config::SibylConfig;
use sibyl_core::error::SibylError;
use sibyl_core::traits::CompletionProvider;
use sibyl_core::types::{CompletionRequest, CompletionResponse};
use tracing::info;

use crate::client::GroqClient;
use crate::embeddings::EmbeddingClient;
use crate::types::ChatMessage;

/// Groq completion provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `GROQ_API_KEY` env var -> error.
pub struct GroqProvider {
    client: GroqClient,
}

impl GroqProvider {
    /// Creates a new Groq provider from the given configuration.
    pub fn new(config: &SibylConfig) -> Result<Self, SibylError> {
        let api_key = resolve_api_key(&config.groq.api_key)?;
        let client = GroqClient::new(
            api_key,
            config.groq.base_url.clone(),
            config.groq.model.clone(),
            Duration::from_secs(config.groq.request_timeout_secs),
        )?;

        info!(model = config.groq.model, "Groq provider initialized");

        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: GroqClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, SibylError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(ChatMessage {
                role: "system".into(),
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user".into(),
            content: request.user,
        });

        let content = self.client.chat(messages).await?;
        Ok(CompletionResponse { content })
    }
}

/// Builds the embedding client from the retrieval configuration.
pub fn embedding_client(config: &SibylConfig) -> Result<EmbeddingClient, SibylError> {
    EmbeddingClient::new(
        config.retrieval.embedding_base_url.clone(),
        config.retrieval.embedding_model.clone(),
        Duration::from_secs(config.groq.request_timeout_secs),
    )
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, SibylError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("GROQ_API_KEY").map_err(|_| {
        SibylError::Config(
            "Groq API key not found. Set groq.api_key in config or GROQ_API_KEY environment variable.".into(),
        )
    })
}
