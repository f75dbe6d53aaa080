//! Shared application state.

use solver_chat::{CompletionConfig, CompletionGateway};
use solver_core::SolverConfig;

/// Read-only state shared by all handlers. Nothing here changes per request.
pub struct AppState {
    pub config: SolverConfig,
    pub gateway: CompletionGateway,
}

impl AppState {
    pub fn new(config: SolverConfig, completion: CompletionConfig) -> Self {
        Self::with_gateway(config, CompletionGateway::new(completion))
    }

    pub fn with_gateway(config: SolverConfig, gateway: CompletionGateway) -> Self {
        Self { config, gateway }
    }
}
