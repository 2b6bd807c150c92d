// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sibyl answering service.
//!
//! This crate provides the collaborator trait definitions, error type, and
//! domain types used throughout the Sibyl workspace. External collaborators
//! (completion service, embedding model, web search) are reached only
//! through the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SibylError;
pub use types::{Provenance, Route, SessionId};

pub use traits::{CompletionProvider, EmbeddingProvider, WebSearchProvider};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_variants() {
        // Verify all 7 error variants exist and can be constructed.
        let _config = SibylError::Config("test".into());
        let _provider = SibylError::Provider {
            message: "test".into(),
            source: None,
        };
        let _search = SibylError::Search {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _index = SibylError::Index("test".into());
        let _channel = SibylError::Channel {
            message: "test".into(),
            source: None,
        };
        let _timeout = SibylError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = SibylError::Internal("test".into());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // If any collaborator trait is missing, this test won't compile.
        fn _assert_completion<T: CompletionProvider>() {}
        fn _assert_embedding<T: EmbeddingProvider>() {}
        fn _assert_search<T: WebSearchProvider>() {}
    }
}
