//! Flow-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowErrorKind {
    InvalidInput,
    Upstream,
    MalformedOutput,
    Tooling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowError {
    pub kind: FlowErrorKind,
    pub message: String,
}

impl FlowError {
    pub fn new(kind: FlowErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::InvalidInput, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::Upstream, message)
    }

    pub fn malformed_output(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::MalformedOutput, message)
    }

    pub fn tooling(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::Tooling, message)
    }
}

impl Display for FlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for FlowError {}

impl From<mprovider::ProviderError> for FlowError {
    fn from(value: mprovider::ProviderError) -> Self {
        FlowError::upstream(value.to_string())
    }
}

impl From<mtooling::ToolError> for FlowError {
    fn from(value: mtooling::ToolError) -> Self {
        FlowError::tooling(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_convert_to_upstream() {
        let provider_error = mprovider::ProviderError::timeout("slow upstream");
        let flow_error = FlowError::from(provider_error);

        assert_eq!(flow_error.kind, FlowErrorKind::Upstream);
        assert!(flow_error.message.contains("slow upstream"));
    }

    #[test]
    fn tool_errors_convert_to_tooling() {
        let tool_error = mtooling::ToolError::execution("tool exploded");
        let flow_error = FlowError::from(tool_error);

        assert_eq!(flow_error.kind, FlowErrorKind::Tooling);
    }
}
