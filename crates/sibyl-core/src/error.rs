// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Sibyl answering service.

use thiserror::Error;

/// The primary error type used across all Sibyl collaborator traits and core operations.
#[derive(Debug, Error)]
pub enum SibylError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Completion-service errors (API failure, malformed response, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Web-search collaborator errors (connection failure, bad payload).
    #[error("search error: {message}")]
    Search {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Retrieval index errors (dimension mismatch, inconsistent corpus).
    #[error("index error: {0}")]
    Index(String),

    /// HTTP boundary errors (bind failure, request plumbing).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
