//! Chat-completion wire types and the completion outcome.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer returned when no credential is configured.
pub const MISSING_TOKEN_ANSWER: &str = "Missing API token";
/// Answer returned for every other completion failure.
pub const GENERATION_FAILED_ANSWER: &str = "LLM generation failed";

/// Chat message sent to the completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Outgoing request body.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: usize,
}

/// The subset of the response body that is read.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

impl CompletionResponse {
    /// Trimmed content of the first choice.
    pub fn first_answer(&self) -> Option<String> {
        self.choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
    }
}

/// Why a completion produced no answer.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("no API token configured")]
    CredentialMissing,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("API error {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("malformed response: {0}")]
    BadResponse(String),
}

impl CompletionError {
    /// Legacy answer string for this failure.
    pub fn sentinel(&self) -> &'static str {
        match self {
            Self::CredentialMissing => MISSING_TOKEN_ANSWER,
            _ => GENERATION_FAILED_ANSWER,
        }
    }
}
