// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the Sibyl workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// The session used when a query request carries no session id.
    pub fn default_session() -> Self {
        Self("default".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The single category chosen once per query that determines the retrieval path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Route {
    /// Answerable purely from stored session facts.
    Memory,
    /// Needs the uploaded-document index.
    Document,
    /// General knowledge, no external context.
    General,
    /// Needs current or live information from the web.
    Realtime,
}

/// Tag recorded on the final answer indicating which source contributed the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Memory,
    Documents,
    Web,
    Llm,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Memory => "memory",
            Provenance::Documents => "documents",
            Provenance::Web => "web",
            Provenance::Llm => "llm",
        }
    }
}

/// A bounded span of source document text, the unit of indexing and retrieval.
///
/// The id is the chunk's stable position in the accumulated corpus; both the
/// lexical and vector indexes reference chunks by this position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: usize,
    pub text: String,
}

/// Who produced a turn in the session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// One entry in a session's append-only turn history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

/// A request to the black-box completion service.
///
/// Every pipeline call is a single system + user message pair; the service
/// is treated purely as text-in/text-out.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Instruction for this call, if any.
    pub system: Option<String>,
    /// The user-facing prompt body.
    pub user: String,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            user: user.into(),
        }
    }
}

/// A response from the completion service.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text, taken verbatim.
    pub content: String,
}

/// Input for an embedding provider.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    pub texts: Vec<String>,
}

/// Output from an embedding provider.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    /// One dense vector per input text, in input order.
    pub embeddings: Vec<Vec<f32>>,
    /// Dimensionality of every returned vector.
    pub dimensions: usize,
}

/// A single live web search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResult {
    pub title: String,
    pub url: String,
    pub body: String,
}
