// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion-service trait for hosted LLM integrations.

use async_trait::async_trait;

use crate::error::SibylError;
use crate::types::{CompletionRequest, CompletionResponse};

/// Black-box text-completion service.
///
/// Every pipeline stage that needs model output issues exactly one call
/// through this trait per decision.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, SibylError>;
}
