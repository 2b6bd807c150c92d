// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The pipeline depends on three external collaborators only through these
//! traits, so alternative backends can be substituted without touching
//! pipeline logic. All traits use `#[async_trait]` for dynamic dispatch.

pub mod completion;
pub mod embedding;
pub mod search;

pub use completion::CompletionProvider;
pub use embedding::EmbeddingProvider;
pub use search::WebSearchProvider;
