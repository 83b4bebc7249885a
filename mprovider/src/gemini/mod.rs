//! Gemini adapter for the hosted generative-language API.

mod provider;
mod serde_api;
mod transport;
mod types;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub use provider::GeminiProvider;
pub use transport::{GeminiHttpTransport, GeminiTransport};
pub use types::{
    GeminiContent, GeminiFinishReason, GeminiPart, GeminiRequest, GeminiResponse, GeminiRole,
    GeminiUsage,
};

#[cfg(test)]
mod tests;
