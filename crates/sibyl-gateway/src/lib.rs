// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP boundary for the Sibyl agent.
//!
//! Exposes document ingestion and question answering over a small REST
//! surface, plus an unauthenticated health probe. All agent behavior lives
//! in `sibyl-pipeline`; this crate only translates between HTTP and the
//! pipeline's types.

pub mod handlers;
pub mod ingest;
pub mod server;

pub use ingest::{IngestReceipt, IngestService};
pub use server::{GatewayState, ServerConfig, build_router, start_server};
