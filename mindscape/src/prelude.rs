//! Common imports for most Mindscape applications.

pub use crate::{
    authenticated, build_support_runtime, build_support_runtime_from_env,
    build_support_runtime_with, build_traced_support_runtime_with, gemini_provider,
    snapshot_lines, user_profile,
};
pub use crate::{ms_auth, ms_user};
pub use crate::{
    AuthState, BoxFuture, ChatAccess, ChatController, ChatError, ChatErrorKind, ChatMessage,
    ChatReply, ChatTurnHooks, EmergencyClassification, EmergencyDetector, FlowError,
    FlowErrorKind, KeywordEmergencyDetector, MessageId, ModelEmergencyDetector, ModelProvider,
    ModelRequest, ModelSupportResponder, MoodHistorySummarizer, MoodSummary, PromptSpec,
    ProviderError, ProviderId, Sender, SessionId, StructuredModelClient, SupportResponder,
    SupportRuntime, Transcript, TranscriptSnapshot, TurnId, UserId, UserProfile, resolve_access,
};
