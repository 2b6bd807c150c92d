// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session memory for Sibyl: a process-lifetime fact store plus the
//! per-turn fact extraction stage that feeds it.

pub mod extractor;
pub mod store;

pub use extractor::{FactExtractor, parse_facts_response};
pub use store::{FactStore, render_facts};
