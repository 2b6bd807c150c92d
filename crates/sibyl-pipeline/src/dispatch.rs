// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrieval dispatch: fetches context according to the chosen route.
//!
//! A pure function of route and query. No retries here; a failure in the
//! web collaborator or retriever propagates as a stage failure.

use std::sync::Arc;

use sibyl_core::error::SibylError;
use sibyl_core::traits::WebSearchProvider;
use sibyl_core::types::{Provenance, Route, WebSearchResult};
use sibyl_index::HybridRetriever;
use tracing::debug;

use crate::state::RequestState;

/// Fetches context from the hybrid retriever, the web collaborator, or
/// nothing, depending on the route.
pub struct RetrievalDispatch {
    retriever: Arc<HybridRetriever>,
    web: Arc<dyn WebSearchProvider>,
    /// Result count for document retrieval.
    top_k: usize,
    /// Result count for web retrieval.
    web_results: usize,
}

impl RetrievalDispatch {
    pub fn new(
        retriever: Arc<HybridRetriever>,
        web: Arc<dyn WebSearchProvider>,
        top_k: usize,
        web_results: usize,
    ) -> Self {
        Self {
            retriever,
            web,
            top_k,
            web_results,
        }
    }

    /// Fill in context and provenance for the request's route.
    pub async fn fetch(&self, state: &mut RequestState) -> Result<(), SibylError> {
        let route = state
            .route()
            .ok_or_else(|| SibylError::Internal("route not set before retrieval".to_string()))?;

        match route {
            Route::Memory => {
                // Context was already captured from the fact store during
                // routing; nothing to fetch.
                state.provenance = Some(Provenance::Memory);
            }
            Route::Document => {
                let chunks = self.retriever.search(&state.query, self.top_k).await?;
                debug!(chunks = chunks.len(), "document retrieval");
                let joined = chunks
                    .iter()
                    .map(|c| c.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n");
                state.context = Some(joined);
                state.provenance = Some(Provenance::Documents);
            }
            Route::Realtime => {
                let results = self.web.search(&state.query, self.web_results).await?;
                debug!(results = results.len(), "web retrieval");
                state.context = Some(format_web_results(&results));
                state.provenance = Some(Provenance::Web);
            }
            Route::General => {
                state.context = None;
                state.provenance = Some(Provenance::Llm);
            }
        }
        Ok(())
    }
}

/// Render web hits into one text block: title and body per result,
/// separated by blank lines.
pub fn format_web_results(results: &[WebSearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("Title: {}\nContent: {}", r.title, r.body))
        .collect::<Vec<_>>()
        .join("\n\n")
}
