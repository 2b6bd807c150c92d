// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sibyl_core::error::SibylError;
use sibyl_memory::{FactExtractor, FactStore};
use sibyl_pipeline::Pipeline;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::ingest::IngestService;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The query pipeline.
    pub pipeline: Arc<Pipeline>,
    /// Document ingestion service.
    pub ingest: Arc<IngestService>,
    /// Session fact and history store.
    pub facts: Arc<FactStore>,
    /// Background fact extractor, spawned per answered query.
    pub extractor: Arc<FactExtractor>,
}

/// Gateway server configuration (mirrors GatewayConfig from sibyl-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the gateway router over the given state.
///
/// Routes:
/// - POST /v1/ingest
/// - POST /v1/query
/// - GET /health
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/v1/ingest", post(handlers::post_ingest))
        .route("/v1/query", post(handlers::post_query))
        .route("/health", get(handlers::get_health))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), SibylError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SibylError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| SibylError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
