// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live web-search collaborator trait.

use async_trait::async_trait;

use crate::error::SibylError;
use crate::types::WebSearchResult;

/// Live web search used by the REALTIME retrieval path.
#[async_trait]
pub trait WebSearchProvider: Send + Sync + 'static {
    /// Returns up to `max_results` hits for the query, most relevant first.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<WebSearchResult>, SibylError>;
}
