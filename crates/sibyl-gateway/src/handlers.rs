// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the Sibyl REST API.
//!
//! Handles POST /v1/ingest, POST /v1/query, GET /health.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sibyl_core::error::SibylError;
use sibyl_core::types::{Provenance, SessionId, TurnRole};
use tracing::error;

use crate::server::GatewayState;

/// Request body for POST /v1/ingest.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// Raw document text to chunk and index.
    pub text: String,
}

/// Response body for POST /v1/ingest.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// Chunks produced from this upload.
    pub chunks_added: usize,
    /// Corpus size after the upload.
    pub total_chunks: usize,
}

/// Request body for POST /v1/query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The user question.
    pub query: String,
    /// Optional session ID; omitted requests share the default session.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for POST /v1/query.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// Request/answer ID.
    pub id: String,
    /// Generated answer, if the model produced one.
    pub answer: Option<String>,
    /// Which information source the answer was grounded on.
    pub source: Provenance,
    /// Session the query was attributed to.
    pub session_id: String,
    /// ISO 8601 timestamp.
    pub created_at: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// POST /v1/ingest
///
/// Accepts a document, chunks and embeds it, and updates both indexes.
pub async fn post_ingest(
    State(state): State<GatewayState>,
    Json(body): Json<IngestRequest>,
) -> Response {
    match state.ingest.ingest(&body.text).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(IngestResponse {
                chunks_added: receipt.chunks_added,
                total_chunks: receipt.total_chunks,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /v1/query
///
/// Runs one query through the agent pipeline and returns the answer with
/// its provenance. Records the turn in session history and kicks off fact
/// extraction in the background; the response never waits on extraction.
pub async fn post_query(
    State(state): State<GatewayState>,
    Json(body): Json<QueryRequest>,
) -> Response {
    if body.query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "query must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let created_at = chrono::Utc::now().to_rfc3339();

    let session = body
        .session_id
        .filter(|s| !s.is_empty())
        .map(SessionId)
        .unwrap_or_else(SessionId::default_session);

    let outcome = match state.pipeline.run(&body.query, &session).await {
        Ok(outcome) => outcome,
        Err(e) => return error_response(e),
    };

    state.facts.add_turn(&session, TurnRole::User, body.query.clone());
    state.facts.add_turn(
        &session,
        TurnRole::Assistant,
        outcome.answer.clone().unwrap_or_default(),
    );

    // Fact extraction runs after the answer is produced and never blocks
    // or fails the response.
    let extractor = state.extractor.clone();
    let extract_session = session.clone();
    let query = body.query.clone();
    tokio::spawn(async move {
        extractor.extract_and_store(&extract_session, &query).await;
    });

    (
        StatusCode::OK,
        Json(QueryResponse {
            id: request_id,
            answer: outcome.answer,
            source: outcome.source,
            session_id: session.0,
            created_at,
        }),
    )
        .into_response()
}

/// GET /health
///
/// Returns health status of the gateway.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Maps a pipeline or ingest failure onto an HTTP status and error body.
fn error_response(err: SibylError) -> Response {
    error!(error = %err, "request failed");
    let status = match &err {
        SibylError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        SibylError::Provider { .. } | SibylError::Search { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_request_deserializes_without_session() {
        let json = r#"{"query": "what is rust?"}"#;
        let req: QueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.query, "what is rust?");
        assert!(req.session_id.is_none());
    }

    #[test]
    fn query_request_deserializes_with_session() {
        let json = r#"{"query": "hi", "session_id": "sess-123"}"#;
        let req: QueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.session_id.as_deref(), Some("sess-123"));
    }

    #[test]
    fn query_response_serializes_source_tag() {
        let resp = QueryResponse {
            id: "req-1".into(),
            answer: Some("Paris.".into()),
            source: Provenance::Documents,
            session_id: "default".into(),
            created_at: "2026-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"source\":\"documents\""));
        assert!(json.contains("\"answer\":\"Paris.\""));
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
    }

    #[test]
    fn error_response_serializes() {
        let resp = ErrorResponse {
            error: "something went wrong".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("something went wrong"));
    }

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let response = error_response(SibylError::Timeout {
            duration: std::time::Duration::from_secs(60),
        });
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn provider_error_maps_to_bad_gateway() {
        let response = error_response(SibylError::Provider {
            message: "upstream".into(),
            source: None,
        });
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
