//! Generative-language HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProviderError;

use super::types::{
    GeminiContent, GeminiFinishReason, GeminiPart, GeminiRequest, GeminiResponse, GeminiUsage,
};

pub(crate) fn build_api_request(request: GeminiRequest) -> Result<ApiRequest, ProviderError> {
    if request.contents.is_empty() {
        return Err(ProviderError::invalid_request(
            "request requires at least one content entry",
        ));
    }

    let contents = request
        .contents
        .into_iter()
        .map(ApiContent::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let system_instruction = request.system_instruction.map(|text| ApiContent {
        role: None,
        parts: vec![ApiPart::text(text)],
    });

    let tools = if request.tools.is_empty() {
        None
    } else {
        let declarations = request
            .tools
            .into_iter()
            .map(|tool| {
                let parameters = serde_json::from_str::<Value>(&tool.input_schema).map_err(|_| {
                    ProviderError::invalid_request("tool input schema must be valid JSON")
                })?;

                Ok(ApiFunctionDeclaration {
                    name: tool.name,
                    description: tool.description,
                    parameters,
                })
            })
            .collect::<Result<Vec<_>, ProviderError>>()?;

        Some(vec![ApiTool {
            function_declarations: declarations,
        }])
    };

    let safety_settings = if request.safety_settings.is_empty() {
        None
    } else {
        Some(
            request
                .safety_settings
                .into_iter()
                .map(|setting| ApiSafetySetting {
                    category: setting.category.as_str().to_string(),
                    threshold: setting.threshold.as_str().to_string(),
                })
                .collect(),
        )
    };

    let response_schema = request
        .response_schema
        .map(|schema| {
            serde_json::from_str::<Value>(&schema).map_err(|_| {
                ProviderError::invalid_request("response schema must be valid JSON")
            })
        })
        .transpose()?;

    let generation_config = if request.temperature.is_none()
        && request.max_output_tokens.is_none()
        && response_schema.is_none()
    {
        None
    } else {
        Some(ApiGenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
            response_mime_type: response_schema
                .as_ref()
                .map(|_| "application/json".to_string()),
            response_schema,
        })
    };

    Ok(ApiRequest {
        system_instruction,
        contents,
        tools,
        safety_settings,
        generation_config,
    })
}

pub(crate) fn parse_finish_reason(value: Option<&str>) -> GeminiFinishReason {
    match value {
        Some("STOP") => GeminiFinishReason::Stop,
        Some("MAX_TOKENS") => GeminiFinishReason::MaxTokens,
        Some("SAFETY") | Some("PROHIBITED_CONTENT") => GeminiFinishReason::Safety,
        _ => GeminiFinishReason::Other,
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<ApiContent>,
    pub contents: Vec<ApiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ApiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<ApiSafetySetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<ApiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ApiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<ApiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<ApiFunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<ApiFunctionResponse>,
}

impl ApiPart {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            function_call: None,
            function_response: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ApiFunctionCall {
    pub name: String,
    pub args: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ApiFunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiTool {
    pub function_declarations: Vec<ApiFunctionDeclaration>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiFunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiSafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

impl TryFrom<GeminiContent> for ApiContent {
    type Error = ProviderError;

    fn try_from(value: GeminiContent) -> Result<Self, Self::Error> {
        let role = value.role;
        let parts = value
            .parts
            .into_iter()
            .map(|part| match part {
                GeminiPart::Text(text) => {
                    if text.trim().is_empty() {
                        return Err(ProviderError::invalid_request(
                            "content text part must not be empty",
                        ));
                    }

                    Ok(ApiPart::text(text))
                }
                GeminiPart::FunctionCall { name, args_json } => {
                    let args = parse_json_or_wrap(&args_json);
                    Ok(ApiPart {
                        text: None,
                        function_call: Some(ApiFunctionCall { name, args }),
                        function_response: None,
                    })
                }
                GeminiPart::FunctionResponse {
                    name,
                    response_json,
                } => {
                    let response = parse_json_or_wrap(&response_json);
                    Ok(ApiPart {
                        text: None,
                        function_call: None,
                        function_response: Some(ApiFunctionResponse { name, response }),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            role: Some(role.as_str().to_string()),
            parts,
        })
    }
}

/// The wire format requires JSON objects for call args and responses; bare
/// strings and other scalars get wrapped under an "output" key.
fn parse_json_or_wrap(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => value,
        Ok(value) => serde_json::json!({ "output": value }),
        Err(_) => serde_json::json!({ "output": raw }),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiResponse {
    pub candidates: Option<Vec<ApiCandidate>>,
    pub usage_metadata: Option<ApiUsageMetadata>,
    pub prompt_feedback: Option<ApiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiCandidate {
    pub content: Option<ApiContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiUsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
    pub total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiPromptFeedback {
    pub block_reason: Option<String>,
}

impl ApiResponse {
    pub(crate) fn into_gemini_response(
        self,
        model: String,
    ) -> Result<GeminiResponse, ProviderError> {
        let candidate = self
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| {
                let reason = self
                    .prompt_feedback
                    .and_then(|feedback| feedback.block_reason)
                    .unwrap_or_else(|| "unknown".to_string());

                ProviderError::malformed_response(format!(
                    "response did not include candidates (block reason: {reason})"
                ))
            })?;

        let parts = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| {
                        if let Some(text) = part.text {
                            return Some(GeminiPart::Text(text));
                        }

                        if let Some(call) = part.function_call {
                            return Some(GeminiPart::FunctionCall {
                                name: call.name,
                                args_json: call.args.to_string(),
                            });
                        }

                        None
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let usage = self.usage_metadata.unwrap_or(ApiUsageMetadata {
            prompt_token_count: None,
            candidates_token_count: None,
            total_token_count: None,
        });

        Ok(GeminiResponse {
            model,
            parts,
            finish_reason: parse_finish_reason(candidate.finish_reason.as_deref()),
            usage: GeminiUsage {
                prompt_tokens: usage.prompt_token_count.unwrap_or(0),
                candidate_tokens: usage.candidates_token_count.unwrap_or(0),
                total_tokens: usage.total_token_count.unwrap_or(0),
            },
        })
    }
}
