//! Focused unit tests for Gemini adapter internals.

#![cfg(test)]

use std::sync::Arc;

use crate::{
    Message, ModelRequest, ProviderError, ProviderFuture, Role, SafetySetting,
    SecureCredentialManager, StopReason, ToolDefinition, ToolResult,
};

use super::provider::GeminiProvider;
use super::serde_api::{build_api_request, parse_finish_reason};
use super::transport::GeminiTransport;
use super::types::{
    GeminiFinishReason, GeminiPart, GeminiRequest, GeminiResponse, GeminiRole, GeminiUsage,
};

#[derive(Debug)]
struct NoopTransport;

impl GeminiTransport for NoopTransport {
    fn generate<'a>(
        &'a self,
        _request: GeminiRequest,
        _api_key: String,
    ) -> ProviderFuture<'a, Result<GeminiResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }
}

fn provider_with_noop_transport() -> GeminiProvider {
    GeminiProvider::new(
        Arc::new(SecureCredentialManager::new()),
        Arc::new(NoopTransport),
    )
}

#[test]
fn build_gemini_request_splits_system_messages_into_instruction() {
    let provider = provider_with_noop_transport();
    let request = ModelRequest::new(
        "gemini-2.0-flash",
        vec![
            Message::new(Role::System, "You are an empathetic assistant."),
            Message::new(Role::User, "hello"),
            Message::new(Role::Assistant, "hi there"),
        ],
    );

    let built = provider.build_gemini_request(request);
    assert_eq!(
        built.system_instruction.as_deref(),
        Some("You are an empathetic assistant.")
    );
    assert_eq!(built.contents.len(), 2);
    assert_eq!(built.contents[0].role, GeminiRole::User);
    assert_eq!(built.contents[1].role, GeminiRole::Model);
}

#[test]
fn build_gemini_request_replays_tool_exchanges() {
    let provider = provider_with_noop_transport();
    let request = ModelRequest::new("gemini-2.0-flash", vec![Message::new(Role::User, "hi")])
        .with_tool_results(vec![ToolResult {
            tool_call_id: "call_0".to_string(),
            tool_name: "detect_emergency".to_string(),
            arguments: "{\"message\":\"hi\"}".to_string(),
            output: "false".to_string(),
        }]);

    let built = provider.build_gemini_request(request);
    assert_eq!(built.contents.len(), 3);
    assert_eq!(built.contents[1].role, GeminiRole::Model);
    assert!(matches!(
        built.contents[1].parts[0],
        GeminiPart::FunctionCall { .. }
    ));
    assert_eq!(built.contents[2].role, GeminiRole::Function);
    assert!(matches!(
        built.contents[2].parts[0],
        GeminiPart::FunctionResponse { .. }
    ));
}

#[test]
fn build_api_request_serializes_safety_and_response_schema() {
    let request = GeminiRequest {
        model: "gemini-2.0-flash".to_string(),
        system_instruction: Some("Respond with empathy.".to_string()),
        contents: vec![super::types::GeminiContent::text(GeminiRole::User, "hi")],
        tools: vec![ToolDefinition {
            name: "detect_emergency".to_string(),
            description: "Detects emergencies".to_string(),
            input_schema: "{\"type\":\"object\"}".to_string(),
        }],
        safety_settings: vec![SafetySetting::allow_dangerous_content()],
        temperature: Some(0.6),
        max_output_tokens: Some(512),
        response_schema: Some("{\"type\":\"object\"}".to_string()),
    };

    let api_request = build_api_request(request).expect("request should build");
    let value = serde_json::to_value(&api_request).expect("request should serialize");

    assert_eq!(
        value["safetySettings"][0]["category"],
        "HARM_CATEGORY_DANGEROUS_CONTENT"
    );
    assert_eq!(value["safetySettings"][0]["threshold"], "BLOCK_NONE");
    assert_eq!(
        value["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(value["generationConfig"]["responseSchema"]["type"], "object");
    assert_eq!(
        value["tools"][0]["functionDeclarations"][0]["name"],
        "detect_emergency"
    );
    assert_eq!(
        value["systemInstruction"]["parts"][0]["text"],
        "Respond with empathy."
    );
}

#[test]
fn build_api_request_rejects_invalid_tool_schema() {
    let request = GeminiRequest {
        model: "gemini-2.0-flash".to_string(),
        system_instruction: None,
        contents: vec![super::types::GeminiContent::text(GeminiRole::User, "hi")],
        tools: vec![ToolDefinition {
            name: "broken".to_string(),
            description: "Bad schema".to_string(),
            input_schema: "not json".to_string(),
        }],
        safety_settings: Vec::new(),
        temperature: None,
        max_output_tokens: None,
        response_schema: None,
    };

    let error = build_api_request(request).expect_err("invalid schema must fail");
    assert_eq!(error.kind, crate::ProviderErrorKind::InvalidRequest);
}

#[test]
fn parse_finish_reason_maps_expected_values() {
    assert_eq!(parse_finish_reason(Some("STOP")), GeminiFinishReason::Stop);
    assert_eq!(
        parse_finish_reason(Some("MAX_TOKENS")),
        GeminiFinishReason::MaxTokens
    );
    assert_eq!(
        parse_finish_reason(Some("SAFETY")),
        GeminiFinishReason::Safety
    );
    assert_eq!(
        parse_finish_reason(Some("unexpected")),
        GeminiFinishReason::Other
    );
    assert_eq!(parse_finish_reason(None), GeminiFinishReason::Other);
}

#[test]
fn response_with_function_call_maps_to_tool_use() {
    let response = GeminiResponse {
        model: "gemini-2.0-flash".to_string(),
        parts: vec![GeminiPart::FunctionCall {
            name: "detect_emergency".to_string(),
            args_json: "{\"message\":\"I feel panic\"}".to_string(),
        }],
        finish_reason: GeminiFinishReason::Stop,
        usage: GeminiUsage {
            prompt_tokens: 10,
            candidate_tokens: 3,
            total_tokens: 13,
        },
    };

    let mapped = response.into_model_response();
    assert_eq!(mapped.stop_reason, StopReason::ToolUse);

    let calls = mapped.tool_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "detect_emergency");
    assert_eq!(calls[0].id, "call_0");
}

#[test]
fn empty_candidates_surface_block_reason() {
    let body = "{\"candidates\":[],\"promptFeedback\":{\"blockReason\":\"SAFETY\"}}";
    let parsed: super::serde_api::ApiResponse =
        serde_json::from_str(body).expect("body should parse");

    let error = parsed
        .into_gemini_response("gemini-2.0-flash".to_string())
        .expect_err("empty candidates must fail");
    assert_eq!(error.kind, crate::ProviderErrorKind::MalformedResponse);
    assert!(error.message.contains("SAFETY"));
}

#[test]
fn gemini_api_key_prefix_is_enforced() {
    let manager = SecureCredentialManager::new();
    let error = manager
        .set_gemini_api_key("sk-wrong-ecosystem")
        .expect_err("wrong prefix must fail");
    assert_eq!(error.kind, crate::ProviderErrorKind::Authentication);

    manager
        .set_gemini_api_key("AIzaValidLookingKey")
        .expect("prefixed key should store");
    assert!(manager
        .has_credentials(crate::ProviderId::Gemini)
        .expect("lock works"));
}
