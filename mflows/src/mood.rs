//! Mood-history summary flow for the dashboard insights panel.

use std::sync::Arc;

use serde::Deserialize;

use crate::{FlowError, PromptSpec, StructuredModelClient};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoodSummary {
    pub summary: String,
}

const MOOD_SUMMARY_TEMPLATE: &str = "\
You are a mental health assistant that analyzes mood history and summarizes \
it to provide insights to the user.

Mood History: {{mood_history}}

Provide a summary of the mood history, highlighting any patterns, trends, or \
significant events that may be impacting the user's mental well-being.
Make sure to be warm, calm, safe, respectful, and hopeful.
";

const MOOD_SUMMARY_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "summary": { "type": "string" }
  },
  "required": ["summary"]
}"#;

pub(crate) fn mood_summary_spec() -> PromptSpec {
    PromptSpec::new("summarize_mood_history", MOOD_SUMMARY_TEMPLATE)
        .with_response_schema(MOOD_SUMMARY_SCHEMA)
}

#[derive(Clone)]
pub struct MoodHistorySummarizer {
    client: Arc<StructuredModelClient>,
    spec: PromptSpec,
}

impl MoodHistorySummarizer {
    pub fn new(client: Arc<StructuredModelClient>) -> Self {
        Self {
            client,
            spec: mood_summary_spec(),
        }
    }

    pub async fn summarize(&self, mood_history: &str) -> Result<MoodSummary, FlowError> {
        if mood_history.trim().is_empty() {
            return Err(FlowError::invalid_input("mood history must not be empty"));
        }

        self.client
            .invoke(&self.spec, &[("mood_history", mood_history)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use mprovider::{
        Message, ModelProvider, ModelRequest, ModelResponse, OutputItem, ProviderError,
        ProviderFuture, ProviderId, Role, StopReason, TokenUsage,
    };

    use super::*;
    use crate::FlowErrorKind;

    struct CannedProvider {
        body: &'static str,
        requests: Mutex<Vec<ModelRequest>>,
    }

    impl ModelProvider for CannedProvider {
        fn id(&self) -> ProviderId {
            ProviderId::Gemini
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                self.requests
                    .lock()
                    .expect("requests lock")
                    .push(request.clone());

                Ok(ModelResponse {
                    provider: ProviderId::Gemini,
                    model: request.model,
                    output: vec![OutputItem::Message(Message::new(Role::Assistant, self.body))],
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage::default(),
                })
            })
        }
    }

    #[tokio::test]
    async fn summarize_returns_typed_summary() {
        let provider = Arc::new(CannedProvider {
            body: "{\"summary\":\"Mostly calm week with a stressful Tuesday.\"}",
            requests: Mutex::new(Vec::new()),
        });
        let client = Arc::new(StructuredModelClient::new(
            provider.clone(),
            "gemini-2.0-flash",
        ));
        let summarizer = MoodHistorySummarizer::new(client);

        let summary = summarizer
            .summarize("Mon: calm, Tue: stressed, Wed: calm")
            .await
            .expect("summarize should work");
        assert!(summary.summary.contains("Tuesday"));

        let requests = provider.requests.lock().expect("requests lock");
        assert!(requests[0].messages[0].content.contains("Tue: stressed"));
    }

    #[tokio::test]
    async fn empty_history_is_rejected_before_the_model_call() {
        let provider = Arc::new(CannedProvider {
            body: "{\"summary\":\"unused\"}",
            requests: Mutex::new(Vec::new()),
        });
        let client = Arc::new(StructuredModelClient::new(
            provider.clone(),
            "gemini-2.0-flash",
        ));
        let summarizer = MoodHistorySummarizer::new(client);

        let error = summarizer
            .summarize("   ")
            .await
            .expect_err("summarize should fail");
        assert_eq!(error.kind, FlowErrorKind::InvalidInput);
        assert!(provider.requests.lock().expect("requests lock").is_empty());
    }
}
