//! Unified facade over the Mindscape workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the core mindscape crates and provides convenience utilities
//! and macros for common setup and session-building flows.

mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use mchat;
pub use mcommon;
pub use mflows;
pub use mobserve;
pub use mprovider;
pub use mtooling;
pub use mview;

pub use mchat::{
    AuthState, CONNECTIVITY_FAILURE_TEXT, ChatAccess, ChatController, ChatError, ChatErrorKind,
    ChatMessage, ChatTurnHooks, MessageId, NoopChatTurnHooks, REASSURANCE_TEXT, Sender,
    Transcript, TranscriptSnapshot, TranscriptStream, TurnId, TurnOutcome, TurnStage,
    UserProfile, greeting_text, resolve_access,
};
pub use mcommon::{BoxFuture, MetadataMap, SessionId, TraceId, UserId};
pub use mflows::{
    AASRA_HELPLINE, ChatReply, EmergencyClassification, EmergencyDetector, FlowError,
    FlowErrorKind, KeywordEmergencyDetector, ModelEmergencyDetector, ModelSupportResponder,
    MoodHistorySummarizer, MoodSummary, PromptSpec, StructuredModelClient, SupportResponder,
    TELE_MENTAL_HEALTH_HELPLINE, emergency_helplines,
};
pub use mobserve::{MetricsObservabilityHooks, TracingObservabilityHooks};
pub use mprovider::{
    BlockThreshold, HarmCategory, Message, ModelProvider, ModelRequest, ModelResponse,
    NoopOperationHooks, OutputItem, ProviderError, ProviderErrorKind, ProviderFuture, ProviderId,
    ProviderOperationHooks, Role, SafetySetting, SecretString, SecureCredentialManager,
    StopReason, TokenUsage, ToolCall, ToolDefinition, ToolResult, observe_call,
};
pub use mprovider::gemini::{GeminiHttpTransport, GeminiProvider, GeminiTransport};
pub use mtooling::{
    DefaultToolRuntime, FunctionTool, NoopToolRuntimeHooks, Tool, ToolError, ToolErrorKind,
    ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolRegistry, ToolRuntime,
    ToolRuntimeHooks, parse_json_object, parse_json_value, required_string,
};
pub use mview::{
    Alignment, HelplineBanner, MessageBody, RenderedMessage, TranscriptView, render, to_lines,
};

pub use runtime::{
    DEFAULT_MODEL, GEMINI_API_KEY_ENV, SupportRuntime, build_support_runtime,
    build_support_runtime_from_env, build_support_runtime_with,
    build_traced_support_runtime_with, gemini_provider,
};
pub use util::{authenticated, snapshot_lines, user_profile};
