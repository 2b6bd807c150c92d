// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Sibyl answering service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Sibyl configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SibylConfig {
    /// Agent identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Groq completion-service settings.
    #[serde(default)]
    pub groq: GroqConfig,

    /// Retrieval and ingestion settings.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Live web-search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

/// Groq (OpenAI-compatible) completion-service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroqConfig {
    /// API key. Required at serve time; usually set via `SIBYL_GROQ_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier sent with every completion request.
    #[serde(default = "default_groq_model")]
    pub model: String,

    /// API base URL.
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,

    /// Per-call timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_groq_model(),
            base_url: default_groq_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Retrieval and ingestion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Maximum results returned by hybrid search.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Chunk size in characters for document splitting.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap in characters between consecutive chunks.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Embedding endpoint base URL (OpenAI-compatible `/embeddings`).
    #[serde(default = "default_embedding_base_url")]
    pub embedding_base_url: String,

    /// Embedding model identifier.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            embedding_base_url: default_embedding_base_url(),
            embedding_model: default_embedding_model(),
        }
    }
}

/// Live web-search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// SearxNG-compatible instance base URL.
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    /// Number of web results fetched for REALTIME queries.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            max_results: default_max_results(),
        }
    }
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_agent_name() -> String {
    "sibyl".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_groq_model() -> String {
    "openai/gpt-oss-120b".to_string()
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_top_k() -> usize {
    5
}

fn default_chunk_size() -> usize {
    800
}

fn default_chunk_overlap() -> usize {
    100
}

fn default_embedding_base_url() -> String {
    "http://127.0.0.1:8081/v1".to_string()
}

fn default_embedding_model() -> String {
    "BAAI/bge-base-en-v1.5".to_string()
}

fn default_search_base_url() -> String {
    "http://127.0.0.1:8888".to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = SibylConfig::default();
        assert_eq!(config.agent.name, "sibyl");
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.retrieval.chunk_size, 800);
        assert_eq!(config.retrieval.chunk_overlap, 100);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.gateway.port, 8000);
        assert!(config.groq.api_key.is_none());
    }

    #[test]
    fn overlap_smaller_than_chunk_size() {
        let config = RetrievalConfig::default();
        assert!(config.chunk_overlap < config.chunk_size);
    }
}
