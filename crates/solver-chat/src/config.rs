//! Completion endpoint configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_COMPLETION_URL: &str =
    "https://aiproxy.sanand.workers.dev/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: usize = 600;

/// Settings for the completion gateway, fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Bearer token. `None` is valid and produces the missing-token answer.
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            endpoint: DEFAULT_COMPLETION_URL.into(),
            model: DEFAULT_MODEL.into(),
            temperature: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl CompletionConfig {
    /// Read `AIPROXY_TOKEN`, `COMPLETION_URL` and `COMPLETION_MODEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_token: non_blank("AIPROXY_TOKEN"),
            endpoint: non_blank("COMPLETION_URL").unwrap_or(defaults.endpoint),
            model: non_blank("COMPLETION_MODEL").unwrap_or(defaults.model),
            ..defaults
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }
}
