//! Prompt assembly and the remote chat-completion gateway.
//!
//! One non-streaming request per question; failures come back as a typed
//! [`CompletionError`] that still maps onto the legacy sentinel answers.

pub mod config;
pub mod gateway;
pub mod prompt;
pub mod types;

pub use config::CompletionConfig;
pub use gateway::CompletionGateway;
pub use prompt::build_prompt;
pub use types::*;
