// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sibyl serve` command implementation.
//!
//! Wires the Groq completion provider, the embedding client, the hybrid
//! retrieval indexes, the session fact store, and the web search client
//! into the pipeline, then starts the HTTP gateway.

use std::sync::Arc;
use std::time::Duration;

use sibyl_config::SibylConfig;
use sibyl_core::error::SibylError;
use sibyl_core::traits::{CompletionProvider, EmbeddingProvider, WebSearchProvider};
use sibyl_gateway::{GatewayState, IngestService, ServerConfig, start_server};
use sibyl_groq::GroqProvider;
use sibyl_index::{HybridRetriever, LexicalIndex, VectorIndex};
use sibyl_memory::{FactExtractor, FactStore};
use sibyl_pipeline::Pipeline;
use sibyl_websearch::SearxClient;
use tracing::info;

/// Runs the `sibyl serve` command.
pub async fn run_serve(config: SibylConfig) -> Result<(), SibylError> {
    init_tracing(&config.agent.log_level);

    info!(name = config.agent.name, "starting sibyl serve");

    let provider: Arc<dyn CompletionProvider> = Arc::new(GroqProvider::new(&config)?);
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(sibyl_groq::embedding_client(&config)?);
    let web: Arc<dyn WebSearchProvider> = Arc::new(SearxClient::new(
        config.search.base_url.clone(),
        Duration::from_secs(config.groq.request_timeout_secs),
    )?);

    let facts = Arc::new(FactStore::new());
    let lexical = Arc::new(LexicalIndex::new());
    let vector = Arc::new(VectorIndex::new());
    let retriever = Arc::new(HybridRetriever::new(
        lexical.clone(),
        vector.clone(),
        embedder.clone(),
    ));

    let state = GatewayState {
        pipeline: Arc::new(Pipeline::new(
            provider.clone(),
            facts.clone(),
            retriever,
            web,
            config.retrieval.top_k,
            config.search.max_results,
        )),
        ingest: Arc::new(IngestService::new(
            lexical,
            vector,
            embedder,
            config.retrieval.chunk_size,
            config.retrieval.chunk_overlap,
        )?),
        extractor: Arc::new(FactExtractor::new(provider, facts.clone())),
        facts,
    };

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    start_server(&server_config, state).await
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sibyl={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
