// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Sibyl agent pipeline.
//!
//! A fixed-topology, single-pass state machine that routes each query to
//! one of four information sources, fetches context, and delegates answer
//! synthesis to the completion service. Fact extraction runs per turn
//! outside this pipeline (see `sibyl-memory`).

pub mod controller;
pub mod dispatch;
pub mod routing;
pub mod state;
pub mod synthesis;

pub use controller::{Pipeline, Stage};
pub use dispatch::{RetrievalDispatch, format_web_results};
pub use routing::{RoutingStage, is_affirmative, parse_route};
pub use state::{QueryOutcome, RequestState};
pub use synthesis::SynthesisStage;
