// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-based extraction of personal facts from user queries.
//!
//! Runs once per turn, after the main answer path. Extraction is fail-open:
//! a malformed model reply or a provider error is logged and skipped, never
//! surfaced to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use sibyl_core::error::SibylError;
use sibyl_core::traits::CompletionProvider;
use sibyl_core::types::{CompletionRequest, SessionId};
use tracing::{debug, warn};

use crate::store::FactStore;

/// System prompt for fact extraction.
const EXTRACTION_PROMPT: &str = r#"Extract personal facts about the user from the message.
If there are no personal facts, return an empty JSON object.

Return only valid JSON: a flat object mapping fact names to string values.

Example:
Input: My name is Asha and I live in Pune.
Output:
{
  "name": "Asha",
  "location": "Pune"
}"#;

/// Extracts and stores user-disclosed facts, one completion call per turn.
pub struct FactExtractor {
    provider: Arc<dyn CompletionProvider>,
    store: Arc<FactStore>,
}

impl FactExtractor {
    pub fn new(provider: Arc<dyn CompletionProvider>, store: Arc<FactStore>) -> Self {
        Self { provider, store }
    }

    /// Scan a query for personal facts and merge any found into the store.
    ///
    /// Never fails: provider errors and unparseable replies leave the store
    /// untouched so the main answer path is unaffected.
    pub async fn extract_and_store(&self, session: &SessionId, query: &str) {
        match self.try_extract(query).await {
            Ok(Some(facts)) if !facts.is_empty() => {
                debug!(
                    session = session.as_str(),
                    count = facts.len(),
                    "storing extracted facts"
                );
                self.store.store(session, facts);
            }
            Ok(_) => {
                debug!(session = session.as_str(), "no facts extracted");
            }
            Err(e) => {
                warn!(session = session.as_str(), error = %e, "fact extraction failed, skipping");
            }
        }
    }

    async fn try_extract(&self, query: &str) -> Result<Option<HashMap<String, String>>, SibylError> {
        let response = self
            .provider
            .complete(CompletionRequest::new(EXTRACTION_PROMPT, query))
            .await?;
        Ok(parse_facts_response(&response.content))
    }
}

/// Parse the extraction reply into a flat string-to-string mapping.
///
/// Handles markdown code-block wrapping and surrounding prose by locating
/// the outermost `{...}` span. Returns `None` when the reply is not a JSON
/// object or when any value is not a string (the mapping must be flat).
pub fn parse_facts_response(response: &str) -> Option<HashMap<String, String>> {
    let trimmed = response.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')? + 1;
    if end <= start {
        return None;
    }

    let value: serde_json::Value = match serde_json::from_str(&trimmed[start..end]) {
        Ok(v) => v,
        Err(e) => {
            warn!("failed to parse extraction response: {e}");
            debug!("raw response: {response}");
            return None;
        }
    };

    let object = value.as_object()?;
    let mut facts = HashMap::with_capacity(object.len());
    for (key, val) in object {
        match val.as_str() {
            Some(s) => {
                facts.insert(key.clone(), s.to_string());
            }
            None => {
                warn!(key = key.as_str(), "extraction value is not a string, discarding reply");
                return None;
            }
        }
    }
    Some(facts)
}
