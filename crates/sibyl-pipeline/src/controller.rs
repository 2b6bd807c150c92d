// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-topology pipeline controller.
//!
//! One directed path per request, no cycles, no retries:
//! `analysis -> retrieval -> rerank -> generation -> citation -> end`.
//! Routing only affects what the retrieval stage does internally, never
//! which node runs next. The rerank node is an identity pass-through
//! reserved for a future re-scoring step.

use std::sync::Arc;

use sibyl_core::error::SibylError;
use sibyl_core::traits::{CompletionProvider, WebSearchProvider};
use sibyl_core::types::{Provenance, SessionId};
use sibyl_index::HybridRetriever;
use sibyl_memory::FactStore;
use tracing::debug;

use crate::dispatch::RetrievalDispatch;
use crate::routing::RoutingStage;
use crate::state::{QueryOutcome, RequestState};
use crate::synthesis::SynthesisStage;

/// Named pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Analysis,
    Retrieval,
    Rerank,
    Generation,
    Citation,
    End,
}

impl Stage {
    /// The fixed transition table. Every stage has exactly one successor.
    pub fn next(self) -> Stage {
        match self {
            Stage::Analysis => Stage::Retrieval,
            Stage::Retrieval => Stage::Rerank,
            Stage::Rerank => Stage::Generation,
            Stage::Generation => Stage::Citation,
            Stage::Citation => Stage::End,
            Stage::End => Stage::End,
        }
    }
}

/// Sequences the stages for one request, single-pass.
pub struct Pipeline {
    routing: RoutingStage,
    dispatch: RetrievalDispatch,
    synthesis: SynthesisStage,
}

impl Pipeline {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        facts: Arc<FactStore>,
        retriever: Arc<HybridRetriever>,
        web: Arc<dyn WebSearchProvider>,
        top_k: usize,
        web_results: usize,
    ) -> Self {
        Self {
            routing: RoutingStage::new(provider.clone(), facts),
            dispatch: RetrievalDispatch::new(retriever, web, top_k, web_results),
            synthesis: SynthesisStage::new(provider),
        }
    }

    /// Run the pipeline to completion for one query.
    ///
    /// Stages execute strictly sequentially; any stage failure aborts the
    /// run and surfaces to the caller.
    pub async fn run(
        &self,
        query: &str,
        session: &SessionId,
    ) -> Result<QueryOutcome, SibylError> {
        let mut state = RequestState::new(query, session.clone());
        let mut stage = Stage::Analysis;

        let outcome = loop {
            debug!(?stage, session = session.as_str(), "pipeline stage");
            match stage {
                Stage::Analysis => self.routing.decide(&mut state).await?,
                Stage::Retrieval => self.dispatch.fetch(&mut state).await?,
                Stage::Rerank => rerank(&mut state),
                Stage::Generation => self.synthesis.generate(&mut state).await?,
                Stage::Citation => break package(&state),
                Stage::End => unreachable!("citation terminates the run"),
            }
            stage = stage.next();
        };

        Ok(outcome)
    }
}

/// Identity pass-through, the designed extension point for a future
/// re-scoring step (e.g. cross-encoder reranking). Must preserve context
/// verbatim today.
fn rerank(_state: &mut RequestState) {}

/// Citation stage: package the final response with its provenance tag.
fn package(state: &RequestState) -> QueryOutcome {
    QueryOutcome {
        answer: state.answer.clone(),
        source: state.provenance.unwrap_or(Provenance::Llm),
    }
}
