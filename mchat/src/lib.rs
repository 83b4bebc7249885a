//! Chat session orchestration: transcript ownership, crisis-gated dispatch,
//! and snapshot subscriptions.

mod auth;
mod controller;
mod error;
mod hooks;
mod transcript;
mod types;

pub mod prelude {
    pub use crate::{
        AuthState, ChatAccess, ChatController, ChatError, ChatErrorKind, ChatMessage,
        ChatTurnHooks, MessageId, NoopChatTurnHooks, Sender, Transcript, TranscriptSnapshot,
        TranscriptStream, TurnId, TurnOutcome, TurnStage, UserProfile, resolve_access,
    };
    pub use crate::types::{CONNECTIVITY_FAILURE_TEXT, REASSURANCE_TEXT, greeting_text};
}

pub use auth::{AuthState, ChatAccess, UserProfile, resolve_access};
pub use controller::{ChatController, TranscriptStream};
pub use error::{ChatError, ChatErrorKind};
pub use hooks::{ChatTurnHooks, NoopChatTurnHooks, TurnOutcome, TurnStage};
pub use transcript::Transcript;
pub use types::{
    CONNECTIVITY_FAILURE_TEXT, ChatMessage, MessageId, REASSURANCE_TEXT, Sender,
    TranscriptSnapshot, TurnId, greeting_text,
};
