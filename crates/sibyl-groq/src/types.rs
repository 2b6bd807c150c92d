// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the OpenAI-compatible chat-completion and embedding APIs.

use serde::{Deserialize, Serialize};

// --- Chat completion types ---

/// A single conversation message on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role ("system", "user", "assistant").
    pub role: String,
    /// Message text.
    pub content: String,
}

/// A chat-completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "openai/gpt-oss-120b").
    pub model: String,
    /// Conversation messages, system first when present.
    pub messages: Vec<ChatMessage>,
}

/// One completion candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// A chat-completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub model: String,
}

// --- Embedding types ---

/// An embedding request body.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest {
    /// Model identifier (e.g., "BAAI/bge-base-en-v1.5").
    pub model: String,
    /// Texts to embed, order-preserving.
    pub input: Vec<String>,
}

/// One embedded vector in the response.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingDatum {
    pub index: usize,
    pub embedding: Vec<f32>,
}

/// An embedding response body.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingDatum>,
}

// --- Error types ---

/// Structured error body returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail within [`ApiErrorResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type", default)]
    pub type_: String,
    pub message: String,
}
