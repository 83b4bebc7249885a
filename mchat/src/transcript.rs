//! Append-only transcript with a single turn-tagged typing placeholder.

use crate::{ChatMessage, MessageId, TranscriptSnapshot, TurnId};

/// The transcript is append-only: the one permitted removal is the typing
/// placeholder, and only by the turn that inserted it.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    emergency_flag: bool,
    next_message_id: u64,
    placeholder: Option<(TurnId, MessageId)>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded_with_greeting(greeting: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.append_assistant(greeting);
        transcript
    }

    pub fn append_user(&mut self, text: impl Into<String>) -> MessageId {
        let id = self.allocate_id();
        self.messages.push(ChatMessage::user(id, text));
        id
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) -> MessageId {
        let id = self.allocate_id();
        self.messages.push(ChatMessage::assistant(id, text));
        id
    }

    /// Inserts the turn's typing placeholder. Turns are serialized by the
    /// controller, so a second live placeholder cannot occur.
    pub fn insert_placeholder(&mut self, turn: TurnId) -> MessageId {
        debug_assert!(self.placeholder.is_none(), "placeholder already present");
        let id = self.allocate_id();
        self.messages.push(ChatMessage::typing_placeholder(id));
        self.placeholder = Some((turn, id));
        id
    }

    /// Removes the placeholder, but only if it belongs to `turn`.
    pub fn remove_placeholder(&mut self, turn: TurnId) -> bool {
        match self.placeholder {
            Some((owner, id)) if owner == turn => {
                self.messages.retain(|message| message.id != id);
                self.placeholder = None;
                true
            }
            _ => false,
        }
    }

    pub fn set_emergency_flag(&mut self, emergency_flag: bool) {
        self.emergency_flag = emergency_flag;
    }

    pub fn emergency_flag(&self) -> bool {
        self.emergency_flag
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn snapshot(&self) -> TranscriptSnapshot {
        TranscriptSnapshot {
            messages: self.messages.clone(),
            emergency_flag: self.emergency_flag,
        }
    }

    fn allocate_id(&mut self) -> MessageId {
        self.next_message_id += 1;
        MessageId(self.next_message_id)
    }
}
