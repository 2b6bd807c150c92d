// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web search adapter backed by a SearxNG instance's JSON API.
//!
//! Implements [`WebSearchProvider`] over `GET {base}/search?q=...&format=json`.
//! Failures surface as [`SibylError::Search`]; the pipeline decides what an
//! unreachable search backend means for the request.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use sibyl_core::error::SibylError;
use sibyl_core::traits::WebSearchProvider;
use sibyl_core::types::WebSearchResult;
use tracing::debug;

/// One hit in the SearxNG response body.
#[derive(Debug, Deserialize)]
struct SearxHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// SearxNG JSON response body.
#[derive(Debug, Deserialize)]
struct SearxResponse {
    #[serde(default)]
    results: Vec<SearxHit>,
}

/// Search client for a SearxNG instance.
#[derive(Debug, Clone)]
pub struct SearxClient {
    client: reqwest::Client,
    base_url: String,
}

impl SearxClient {
    /// Creates a new search client for the given instance root.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, SibylError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SibylError::Search {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, base_url })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }
}

#[async_trait]
impl WebSearchProvider for SearxClient {
    /// Runs one search and returns at most `max_results` hits in rank order.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<WebSearchResult>, SibylError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(|e| SibylError::Search {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SibylError::Search {
                message: format!("search backend returned {status}: {body}"),
                source: None,
            });
        }

        let body: SearxResponse = response.json().await.map_err(|e| SibylError::Search {
            message: format!("failed to parse search response: {e}"),
            source: Some(Box::new(e)),
        })?;

        debug!(hits = body.results.len(), "web search completed");

        Ok(body
            .results
            .into_iter()
            .take(max_results)
            .map(|hit| WebSearchResult {
                title: hit.title,
                url: hit.url,
                body: hit.content,
            })
            .collect())
    }
}
