// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing stage: one decision per request.
//!
//! First a memory check (only when the session has stored facts), then a
//! three-way classification. Raw model replies go through strict parsers
//! that map to the closed route enumeration with an explicit default, so an
//! unrecognized reply never propagates as a route.

use std::sync::Arc;

use sibyl_core::error::SibylError;
use sibyl_core::traits::CompletionProvider;
use sibyl_core::types::{CompletionRequest, Route};
use sibyl_memory::{FactStore, render_facts};
use tracing::info;

use crate::state::RequestState;

/// Binary decision prompt for the memory check.
const MEMORY_CHECK_PROMPT: &str = r#"You are a decision agent.

Given the stored user facts and a question,
determine if the question can be answered using ONLY the stored facts.

Respond with one word:
YES
or
NO"#;

/// Three-way classification prompt.
const CLASSIFIER_PROMPT: &str = r#"You are a routing classifier.

Classify the user question into one of these categories:

1. DOCUMENT -> Question related to uploaded documents.
2. GENERAL -> General knowledge question.
3. REALTIME -> Question requiring current or live information.

Respond with only one word:
DOCUMENT
GENERAL
REALTIME"#;

/// Decides, once per request, which retrieval path the query takes.
pub struct RoutingStage {
    provider: Arc<dyn CompletionProvider>,
    facts: Arc<FactStore>,
}

impl RoutingStage {
    pub fn new(provider: Arc<dyn CompletionProvider>, facts: Arc<FactStore>) -> Self {
        Self { provider, facts }
    }

    /// Set the request's route.
    ///
    /// If the session has stored facts, asks the completion service whether
    /// they alone can answer the query; an affirmative reply routes to
    /// MEMORY with the rendered fact mapping as context and skips
    /// classification. Otherwise the query is classified into
    /// DOCUMENT / GENERAL / REALTIME.
    pub async fn decide(&self, state: &mut RequestState) -> Result<(), SibylError> {
        let stored = self.facts.get_all(&state.session);

        if !stored.is_empty() {
            let rendered = render_facts(&stored);
            let reply = self
                .provider
                .complete(CompletionRequest::new(
                    MEMORY_CHECK_PROMPT,
                    format!("Facts:\n{rendered}\n\nQuestion: {}", state.query),
                ))
                .await?;

            if is_affirmative(&reply.content) {
                info!(session = state.session.as_str(), route = %Route::Memory, "routing decision");
                state.set_route(Route::Memory);
                state.context = Some(rendered);
                return Ok(());
            }
        }

        let reply = self
            .provider
            .complete(CompletionRequest::new(CLASSIFIER_PROMPT, state.query.clone()))
            .await?;
        let route = parse_route(&reply.content);
        info!(session = state.session.as_str(), route = %route, "routing decision");
        state.set_route(route);
        Ok(())
    }
}

/// Whether a memory-check reply is affirmative.
///
/// Normalized by upper-casing; any reply containing `YES` counts. An
/// unparseable reply counts as "no" and falls through to classification.
pub fn is_affirmative(reply: &str) -> bool {
    reply.trim().to_uppercase().contains("YES")
}

/// Map a raw classifier reply onto the closed route set.
///
/// The trimmed, upper-cased reply is matched against the three expected
/// tokens; a reply containing exactly one of them (models pad with prose)
/// also counts. Anything else defaults to GENERAL rather than propagating
/// an unrecognized string as a route.
pub fn parse_route(reply: &str) -> Route {
    let normalized = reply.trim().to_uppercase();

    match normalized.as_str() {
        "DOCUMENT" => return Route::Document,
        "GENERAL" => return Route::General,
        "REALTIME" => return Route::Realtime,
        _ => {}
    }

    let candidates = [
        (Route::Document, "DOCUMENT"),
        (Route::General, "GENERAL"),
        (Route::Realtime, "REALTIME"),
    ];
    let mut found = None;
    for (route, token) in candidates {
        if normalized.contains(token) {
            if found.is_some() {
                // Ambiguous reply naming several routes.
                return Route::General;
            }
            found = Some(route);
        }
    }
    found.unwrap_or(Route::General)
}
