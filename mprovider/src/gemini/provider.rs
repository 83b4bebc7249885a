//! Gemini provider over the generative-language transport.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId, Role,
    SecureCredentialManager,
};

use super::transport::{GeminiHttpTransport, GeminiTransport};
use super::types::{GeminiContent, GeminiPart, GeminiRequest, GeminiRole};

#[derive(Clone)]
pub struct GeminiProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn GeminiTransport>,
    fallback_model: String,
}

impl GeminiProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn GeminiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
            fallback_model: "gemini-2.0-flash".to_string(),
        }
    }

    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = model.into();
        self
    }

    pub fn default_http_transport(client: Client) -> GeminiHttpTransport {
        GeminiHttpTransport::new(client)
    }

    pub(crate) fn build_gemini_request(&self, request: ModelRequest) -> GeminiRequest {
        let mut system_lines = Vec::new();
        let mut contents = Vec::new();

        for message in request.messages {
            match message.role {
                Role::System => system_lines.push(message.content),
                Role::User | Role::Tool => {
                    contents.push(GeminiContent::text(GeminiRole::User, message.content));
                }
                Role::Assistant => {
                    contents.push(GeminiContent::text(GeminiRole::Model, message.content));
                }
            }
        }

        // Replay each completed tool exchange: the model's call first, then
        // the function response the runtime produced for it.
        for tool_result in request.tool_results {
            contents.push(GeminiContent {
                role: GeminiRole::Model,
                parts: vec![GeminiPart::FunctionCall {
                    name: tool_result.tool_name.clone(),
                    args_json: tool_result.arguments,
                }],
            });
            contents.push(GeminiContent {
                role: GeminiRole::Function,
                parts: vec![GeminiPart::FunctionResponse {
                    name: tool_result.tool_name,
                    response_json: tool_result.output,
                }],
            });
        }

        let system_instruction = if system_lines.is_empty() {
            None
        } else {
            Some(system_lines.join("\n\n"))
        };

        GeminiRequest {
            model: request.model,
            system_instruction,
            contents,
            tools: request.tools,
            safety_settings: request.safety_settings,
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
            response_schema: request.response_schema,
        }
    }
}

impl ModelProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn complete<'a>(
        &'a self,
        mut request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            if request.model.trim().is_empty() {
                request.model = self.fallback_model.clone();
            }

            request.validate()?;
            let api_key = resolve_gemini_api_key(&self.credentials)?;
            let gemini_request = self.build_gemini_request(request);
            let response = self.transport.generate(gemini_request, api_key).await?;

            Ok(response.into_model_response())
        })
    }
}

impl SecureCredentialManager {
    pub fn set_gemini_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if !api_key.starts_with("AIza") {
            return Err(ProviderError::authentication(
                "Gemini API key must start with 'AIza'",
            ));
        }

        self.set_api_key(ProviderId::Gemini, api_key)
    }
}

fn resolve_gemini_api_key(
    credentials: &SecureCredentialManager,
) -> Result<String, ProviderError> {
    credentials
        .with_api_key(ProviderId::Gemini, |value| value.to_string())?
        .ok_or_else(|| ProviderError::authentication("no Gemini credentials configured"))
}
