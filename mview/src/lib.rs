//! Pure presentation of the chat transcript.
//!
//! Rendering is a function of `{messages, emergency_flag}` and nothing else:
//! no clocks, no side effects, no state. The helpline banner appears exactly
//! when the current turn's emergency flag is raised and disappears once a
//! later calm turn overwrites it.
//!
//! ```rust
//! use mchat::{ChatMessage, MessageId, TranscriptSnapshot};
//! use mview::render;
//!
//! let snapshot = TranscriptSnapshot {
//!     messages: vec![ChatMessage::assistant(MessageId(1), "Hi!")],
//!     emergency_flag: false,
//! };
//!
//! let view = render(&snapshot);
//! assert!(view.banner.is_none());
//! assert_eq!(view.entries.len(), 1);
//! ```

use mchat::{Sender, TranscriptSnapshot};
use mflows::emergency_helplines;

pub const DISCLAIMER_TEXT: &str = "I am an AI assistant and not a healthcare professional. \
For emergencies, please contact a real-world helpline.";

pub const BANNER_TITLE: &str = "Immediate Help is Available";

pub const BANNER_LEAD: &str =
    "It sounds like you are in distress. Please reach out to one of these 24/7 helplines.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelplineBanner {
    pub title: &'static str,
    pub lead: &'static str,
    pub helplines: Vec<String>,
}

impl HelplineBanner {
    fn current() -> Self {
        Self {
            title: BANNER_TITLE,
            lead: BANNER_LEAD,
            helplines: emergency_helplines(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Assistant messages sit at the start edge.
    Start,
    /// User messages sit at the end edge.
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    TypingIndicator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub alignment: Alignment,
    pub body: MessageBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptView {
    pub disclaimer: &'static str,
    pub banner: Option<HelplineBanner>,
    pub entries: Vec<RenderedMessage>,
}

pub fn render(snapshot: &TranscriptSnapshot) -> TranscriptView {
    let banner = snapshot.emergency_flag.then(HelplineBanner::current);

    let entries = snapshot
        .messages
        .iter()
        .map(|message| RenderedMessage {
            alignment: match message.sender {
                Sender::User => Alignment::End,
                Sender::Assistant => Alignment::Start,
            },
            body: if message.is_typing {
                MessageBody::TypingIndicator
            } else {
                MessageBody::Text(message.text.clone())
            },
        })
        .collect();

    TranscriptView {
        disclaimer: DISCLAIMER_TEXT,
        banner,
        entries,
    }
}

/// Plain-text rendering for terminal output and snapshot assertions.
pub fn to_lines(view: &TranscriptView) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(banner) = &view.banner {
        lines.push(format!("!! {}", banner.title));
        lines.push(banner.lead.to_string());
        for helpline in &banner.helplines {
            lines.push(format!("  tel: {helpline}"));
        }
    }

    lines.push(format!("note: {}", view.disclaimer));

    for entry in &view.entries {
        let prefix = match entry.alignment {
            Alignment::Start => "assistant",
            Alignment::End => "you",
        };

        match &entry.body {
            MessageBody::Text(text) => lines.push(format!("{prefix}> {text}")),
            MessageBody::TypingIndicator => lines.push(format!("{prefix} is typing...")),
        }
    }

    lines
}
