// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible chat-completion endpoints.
//!
//! Provides [`GroqClient`] which handles request construction, bearer
//! authentication, and transient error retry.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use sibyl_core::error::SibylError;
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse};

/// HTTP client for the Groq chat-completions API.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    model: String,
    max_retries: u32,
    base_url: String,
}

impl GroqClient {
    /// Creates a new chat-completions client.
    ///
    /// # Arguments
    /// * `api_key` - bearer token for authentication
    /// * `base_url` - API root (e.g., "https://api.groq.com/openai/v1")
    /// * `model` - model identifier used for all requests
    /// * `timeout` - per-request timeout
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, SibylError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                SibylError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SibylError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            max_retries: 1,
            base_url,
        })
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a chat-completion request and returns the first candidate's text.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, SibylError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
        };
        let url = format!("{}/chat/completions", self.base_url);

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| SibylError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| SibylError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let parsed: ChatResponse =
                    serde_json::from_str(&body).map_err(|e| SibylError::Provider {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .ok_or_else(|| SibylError::Provider {
                        message: "API response contained no choices".into(),
                        source: None,
                    });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(SibylError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            return Err(SibylError::Provider {
                message: format_api_error(status, &body),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| SibylError::Provider {
            message: "completion request failed after retries".into(),
            source: None,
        }))
    }
}

/// Formats an error response body, preferring the structured API error shape.
pub(crate) fn format_api_error(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(body) {
        format!(
            "API error ({}): {}",
            api_err.error.type_, api_err.error.message
        )
    } else {
        format!("API returned {status}: {body}")
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
pub(crate) fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
