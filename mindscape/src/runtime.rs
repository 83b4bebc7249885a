//! Runtime wiring helpers for the support chat stack.

use std::sync::Arc;

use crate::{
    ChatController, EmergencyDetector, GeminiProvider, ModelEmergencyDetector, ModelProvider,
    ModelSupportResponder, MoodHistorySummarizer, ProviderError, SecureCredentialManager,
    StructuredModelClient, SupportResponder, TracingObservabilityHooks, UserProfile,
};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Fully wired flow stack. One shared [`EmergencyDetector`] instance backs
/// both the pre-reply classification and the responder's tool, so the two
/// call sites can never disagree about the detection source.
#[derive(Clone)]
pub struct SupportRuntime {
    pub client: Arc<StructuredModelClient>,
    pub detector: Arc<dyn EmergencyDetector>,
    pub responder: Arc<ModelSupportResponder>,
    pub summarizer: MoodHistorySummarizer,
}

impl SupportRuntime {
    /// Builds the per-session controller for an authenticated user.
    pub fn chat_controller(&self, user: UserProfile) -> ChatController {
        ChatController::new(
            user,
            Arc::clone(&self.detector),
            Arc::clone(&self.responder) as Arc<dyn SupportResponder>,
        )
    }

    /// Same, with turn-level tracing wired in.
    pub fn traced_chat_controller(&self, user: UserProfile) -> ChatController {
        self.chat_controller(user)
            .with_hooks(Arc::new(TracingObservabilityHooks))
    }
}

pub fn gemini_provider(api_key: impl Into<String>) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let credentials = SecureCredentialManager::new();
    credentials.set_gemini_api_key(api_key)?;

    let transport = Arc::new(GeminiProvider::default_http_transport(reqwest::Client::new()));
    Ok(Arc::new(GeminiProvider::new(
        Arc::new(credentials),
        transport,
    )))
}

pub fn build_support_runtime(
    api_key: impl Into<String>,
) -> Result<SupportRuntime, ProviderError> {
    Ok(build_support_runtime_with(
        gemini_provider(api_key)?,
        DEFAULT_MODEL,
    ))
}

pub fn build_support_runtime_from_env() -> Result<SupportRuntime, ProviderError> {
    let api_key = std::env::var(GEMINI_API_KEY_ENV).map_err(|_| {
        ProviderError::authentication(format!("{GEMINI_API_KEY_ENV} is not set"))
    })?;

    build_support_runtime(api_key)
}

pub fn build_support_runtime_with(
    provider: Arc<dyn ModelProvider>,
    model: impl Into<String>,
) -> SupportRuntime {
    assemble(Arc::new(StructuredModelClient::new(provider, model)))
}

/// Wires tracing hooks through the provider client and the responder's tool
/// runtime in addition to the default stack.
pub fn build_traced_support_runtime_with(
    provider: Arc<dyn ModelProvider>,
    model: impl Into<String>,
) -> SupportRuntime {
    let client = Arc::new(
        StructuredModelClient::new(provider, model).with_hooks(Arc::new(TracingObservabilityHooks)),
    );

    let mut runtime = assemble(client);
    runtime.responder = Arc::new(
        ModelSupportResponder::new(
            Arc::clone(&runtime.client),
            Arc::clone(&runtime.detector),
        )
        .with_tool_hooks(Arc::new(TracingObservabilityHooks)),
    );

    runtime
}

fn assemble(client: Arc<StructuredModelClient>) -> SupportRuntime {
    let detector: Arc<dyn EmergencyDetector> =
        Arc::new(ModelEmergencyDetector::new(Arc::clone(&client)));
    let responder = Arc::new(ModelSupportResponder::new(
        Arc::clone(&client),
        Arc::clone(&detector),
    ));
    let summarizer = MoodHistorySummarizer::new(Arc::clone(&client));

    SupportRuntime {
        client,
        detector,
        responder,
        summarizer,
    }
}
