//! Adapter-level request/response model for the generative-language API.

use crate::{
    Message, ModelResponse, OutputItem, ProviderId, Role, SafetySetting, StopReason, TokenUsage,
    ToolCall, ToolDefinition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiRole {
    User,
    Model,
    Function,
}

impl GeminiRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
            Self::Function => "function",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeminiPart {
    Text(String),
    FunctionCall { name: String, args_json: String },
    FunctionResponse { name: String, response_json: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiContent {
    pub role: GeminiRole,
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    pub fn text(role: GeminiRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![GeminiPart::Text(text.into())],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub contents: Vec<GeminiContent>,
    pub tools: Vec<ToolDefinition>,
    pub safety_settings: Vec<SafetySetting>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub response_schema: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiFinishReason {
    Stop,
    MaxTokens,
    Safety,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiUsage {
    pub prompt_tokens: u32,
    pub candidate_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiResponse {
    pub model: String,
    pub parts: Vec<GeminiPart>,
    pub finish_reason: GeminiFinishReason,
    pub usage: GeminiUsage,
}

impl GeminiResponse {
    pub fn into_model_response(self) -> ModelResponse {
        let mut output = Vec::new();
        let mut saw_function_call = false;

        for (index, part) in self.parts.into_iter().enumerate() {
            match part {
                GeminiPart::Text(text) => {
                    output.push(OutputItem::Message(Message::new(Role::Assistant, text)));
                }
                GeminiPart::FunctionCall { name, args_json } => {
                    saw_function_call = true;
                    // The wire format carries no call id; synthesize a
                    // positional one so tool results can reference it.
                    output.push(OutputItem::ToolCall(ToolCall {
                        id: format!("call_{index}"),
                        name,
                        arguments: args_json,
                    }));
                }
                GeminiPart::FunctionResponse { .. } => {}
            }
        }

        let stop_reason = if saw_function_call {
            StopReason::ToolUse
        } else {
            match self.finish_reason {
                GeminiFinishReason::Stop => StopReason::EndTurn,
                GeminiFinishReason::MaxTokens => StopReason::MaxTokens,
                GeminiFinishReason::Safety => StopReason::Safety,
                GeminiFinishReason::Other => StopReason::Other,
            }
        };

        ModelResponse {
            provider: ProviderId::Gemini,
            model: self.model,
            output,
            stop_reason,
            usage: TokenUsage {
                input_tokens: self.usage.prompt_tokens,
                output_tokens: self.usage.candidate_tokens,
                total_tokens: self.usage.total_tokens,
            },
        }
    }
}
