//! TDS Solver: answers assignment questions with an LLM, optionally over an uploaded file.

use std::sync::Arc;

use solver_chat::CompletionConfig;
use solver_core::SolverConfig;
use solver_server::{build_router, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                println!("TDS Solver: question answering over uploaded files");
                println!();
                println!("Usage: tds-solver");
                println!();
                println!("Environment:");
                println!("  AIPROXY_TOKEN       Bearer token for the completion endpoint");
                println!("  COMPLETION_URL      Chat-completions URL (default: AI Proxy)");
                println!("  COMPLETION_MODEL    Model name (default: gpt-4o-mini)");
                println!("  PORT                Listen port (default: 5000)");
                println!("  MAX_UPLOAD_MB       Request body limit in MiB (default: 25)");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}. Use 'tds-solver help' for usage.", arg);
                std::process::exit(1);
            }
        }
    }

    let config = SolverConfig::from_env();
    let completion = CompletionConfig::from_env();
    if !completion.has_token() {
        warn!("AIPROXY_TOKEN not set; every answer will be \"Missing API token\"");
    }

    let port = config.port;
    let state = Arc::new(AppState::new(config, completion));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("TDS Solver listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
