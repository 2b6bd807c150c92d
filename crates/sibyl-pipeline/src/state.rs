// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request mutable state threaded through the pipeline.

use sibyl_core::types::{Provenance, Route, SessionId};

/// State for exactly one query, created at request entry and discarded once
/// the response is returned. Never persisted.
///
/// The route, once set, is not changed by later stages; only context,
/// answer, and provenance are filled in downstream.
#[derive(Debug)]
pub struct RequestState {
    pub query: String,
    pub session: SessionId,
    route: Option<Route>,
    /// Retrieved context block, if the route produced one.
    pub context: Option<String>,
    /// Which source contributed the context.
    pub provenance: Option<Provenance>,
    /// Generated answer, verbatim from the completion service.
    pub answer: Option<String>,
}

impl RequestState {
    pub fn new(query: impl Into<String>, session: SessionId) -> Self {
        Self {
            query: query.into(),
            session,
            route: None,
            context: None,
            provenance: None,
            answer: None,
        }
    }

    /// Record the routing decision. A second call is ignored: the route is
    /// computed once per request and is immutable afterwards.
    pub fn set_route(&mut self, route: Route) {
        debug_assert!(self.route.is_none(), "route must be set at most once");
        if self.route.is_none() {
            self.route = Some(route);
        }
    }

    pub fn route(&self) -> Option<Route> {
        self.route
    }
}

/// Final packaged response for one pipeline run.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub answer: Option<String>,
    pub source: Provenance,
}
