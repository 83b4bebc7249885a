//! Transcript message types and fixed assistant texts.

use std::fmt::{Display, Formatter};

/// Fixed reply appended when the classifier flags a crisis; the helpline
/// banner itself is rendered by the presentation layer from the session flag.
pub const REASSURANCE_TEXT: &str =
    "It sounds like you're going through a difficult time. Please know that help is available.";

/// Fixed reply for any upstream failure. No error detail ever reaches the
/// transcript.
pub const CONNECTIVITY_FAILURE_TEXT: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";

pub fn greeting_text(name: &str) -> String {
    format!("Hi {name}, I'm your empathetic AI assistant. How can I help you today?")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub u64);

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "m{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(pub u64);

impl Display for TurnId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub is_typing: bool,
}

impl ChatMessage {
    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            is_typing: false,
        }
    }

    pub fn assistant(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Assistant,
            is_typing: false,
        }
    }

    pub fn typing_placeholder(id: MessageId) -> Self {
        Self {
            id,
            text: String::new(),
            sender: Sender::Assistant,
            is_typing: true,
        }
    }
}

/// Immutable view of the session state handed to subscribers and renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSnapshot {
    pub messages: Vec<ChatMessage>,
    pub emergency_flag: bool,
}

impl TranscriptSnapshot {
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn typing_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.is_typing)
            .count()
    }
}
