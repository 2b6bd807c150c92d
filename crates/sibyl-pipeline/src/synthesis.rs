// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synthesis stage: grounded answer generation.
//!
//! Builds one fixed instruction template keyed by provenance and issues
//! exactly one completion call with that instruction plus the context and
//! query. The output is taken verbatim as the answer. No refinement.

use std::sync::Arc;

use sibyl_core::error::SibylError;
use sibyl_core::traits::CompletionProvider;
use sibyl_core::types::{CompletionRequest, Provenance};

use crate::state::RequestState;

const DOCUMENT_PROMPT: &str = r#"Answer ONLY using the provided document context.
If the answer is not found, say the information is not in the document."#;

const WEB_PROMPT: &str = "Answer using the provided web search results.";

const GENERAL_PROMPT: &str = "Answer as a knowledgeable assistant.";

/// Delegates answer generation to the external completion service.
pub struct SynthesisStage {
    provider: Arc<dyn CompletionProvider>,
}

impl SynthesisStage {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Generate the answer for the request and record it verbatim.
    pub async fn generate(&self, state: &mut RequestState) -> Result<(), SibylError> {
        let provenance = state.provenance.ok_or_else(|| {
            SibylError::Internal("provenance not set before generation".to_string())
        })?;
        let request = build_request(provenance, state.context.as_deref(), &state.query);
        let response = self.provider.complete(request).await?;
        state.answer = Some(response.content);
        Ok(())
    }
}

/// Build the single completion request for a provenance/context/query triple.
///
/// GENERAL-knowledge answers get the bare query with no context block;
/// memory answers reuse the general template with the stored facts inlined.
pub fn build_request(
    provenance: Provenance,
    context: Option<&str>,
    query: &str,
) -> CompletionRequest {
    match provenance {
        Provenance::Documents => CompletionRequest::new(
            DOCUMENT_PROMPT,
            format!("Context:\n{}\n\nQuestion:\n{query}", context.unwrap_or("")),
        ),
        Provenance::Web => CompletionRequest::new(
            WEB_PROMPT,
            format!("Web Results:\n{}\n\nQuestion:\n{query}", context.unwrap_or("")),
        ),
        Provenance::Memory => CompletionRequest::new(
            GENERAL_PROMPT,
            format!(
                "Known facts about the user:\n{}\n\nQuestion:\n{query}",
                context.unwrap_or("")
            ),
        ),
        Provenance::Llm => CompletionRequest::new(GENERAL_PROMPT, query.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sibyl_core::types::{CompletionResponse, Route, SessionId};
    use std::sync::Mutex;

    struct RecordingProvider {
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordingProvider {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for RecordingProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, SibylError> {
            self.requests.lock().unwrap().push(request);
            Ok(CompletionResponse {
                content: "generated answer".to_string(),
            })
        }
    }

    #[test]
    fn document_request_embeds_context() {
        let request = build_request(Provenance::Documents, Some("chunk text"), "the question");
        assert_eq!(request.system.as_deref(), Some(DOCUMENT_PROMPT));
        assert!(request.user.contains("Context:\nchunk text"));
        assert!(request.user.contains("Question:\nthe question"));
    }

    #[test]
    fn web_request_embeds_results() {
        let request = build_request(Provenance::Web, Some("Title: x\nContent: y"), "q");
        assert_eq!(request.system.as_deref(), Some(WEB_PROMPT));
        assert!(request.user.starts_with("Web Results:\n"));
    }

    #[test]
    fn general_request_is_bare_query() {
        let request = build_request(Provenance::Llm, None, "What is the capital of France?");
        assert_eq!(request.system.as_deref(), Some(GENERAL_PROMPT));
        assert_eq!(request.user, "What is the capital of France?");
    }

    #[test]
    fn memory_request_inlines_facts() {
        let request = build_request(Provenance::Memory, Some("name: Asha"), "what is my name?");
        assert!(request.user.contains("Known facts about the user:\nname: Asha"));
    }

    #[tokio::test]
    async fn answer_is_taken_verbatim() {
        let provider = Arc::new(RecordingProvider::new());
        let stage = SynthesisStage::new(provider.clone());

        let mut state = RequestState::new("q", SessionId("s".into()));
        state.set_route(Route::General);
        state.provenance = Some(Provenance::Llm);

        stage.generate(&mut state).await.unwrap();
        assert_eq!(state.answer.as_deref(), Some("generated answer"));
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_provenance_is_an_internal_error() {
        let stage = SynthesisStage::new(Arc::new(RecordingProvider::new()));
        let mut state = RequestState::new("q", SessionId("s".into()));

        let err = stage.generate(&mut state).await.unwrap_err();
        assert!(matches!(err, SibylError::Internal(_)));
    }
}
