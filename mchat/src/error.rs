//! Session-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    /// Input rejected before it reaches the transcript; never user-visible
    /// as a message.
    Validation,
    /// Upstream model call failed or returned a malformed result.
    Upstream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Validation, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Upstream, message)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<mflows::FlowError> for ChatError {
    fn from(value: mflows::FlowError) -> Self {
        ChatError::upstream(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_errors_convert_to_upstream() {
        let flow_error = mflows::FlowError::upstream("model call failed");
        let chat_error = ChatError::from(flow_error);
        assert_eq!(chat_error.kind, ChatErrorKind::Upstream);
    }
}
