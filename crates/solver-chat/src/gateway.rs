//! Single-shot chat completion against an OpenAI-compatible endpoint.

use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::config::CompletionConfig;
use crate::types::{ChatMessage, CompletionError, CompletionRequest, CompletionResponse};

/// Sends rendered prompts to the completion endpoint. No retries.
#[derive(Debug, Clone)]
pub struct CompletionGateway {
    client: Client,
    config: CompletionConfig,
}

impl CompletionGateway {
    pub fn new(config: CompletionConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: CompletionConfig) -> Self {
        Self { client, config }
    }

    /// Answer text, or the sentinel string for whatever went wrong.
    pub async fn answer(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            Ok(answer) => answer,
            Err(e) => e.sentinel().to_string(),
        }
    }

    /// Request a completion and return the trimmed first choice.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let Some(api_key) = self.config.api_token.as_deref() else {
            error!("AIPROXY_TOKEN not configured");
            return Err(CompletionError::CredentialMissing);
        };

        let body = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        info!("Sending completion request to {}", self.config.endpoint);
        debug!("Prompt length {} chars, model {}", prompt.len(), self.config.model);

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Completion request failed: {}", e);
                CompletionError::Transport(e.to_string())
            })?;

        let status = response.status();
        info!("Completion status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Completion API error {}: {}", status, body);
            return Err(CompletionError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|e| {
            error!("Failed to read completion body: {}", e);
            CompletionError::Transport(e.to_string())
        })?;
        debug!("Completion response: {}", text);

        let parsed: CompletionResponse = serde_json::from_str(&text).map_err(|e| {
            warn!("Unexpected completion body: {}", e);
            CompletionError::BadResponse(e.to_string())
        })?;

        parsed
            .first_answer()
            .ok_or_else(|| CompletionError::BadResponse("response has no choices".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};

    #[derive(Clone)]
    struct Stub {
        status: StatusCode,
        reply: serde_json::Value,
        seen: Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>,
    }

    async fn handle(
        State(stub): State<Stub>,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        stub.seen.lock().unwrap().push((auth, body));
        (stub.status, Json(stub.reply.clone()))
    }

    /// Local completion endpoint that records every request it receives.
    async fn spawn_stub(
        status: StatusCode,
        reply: serde_json::Value,
    ) -> (String, Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let stub = Stub {
            status,
            reply,
            seen: seen.clone(),
        };
        let app = Router::new()
            .route("/v1/chat/completions", post(handle))
            .with_state(stub);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/v1/chat/completions", addr), seen)
    }

    fn gateway(config: CompletionConfig) -> CompletionGateway {
        let client = Client::builder().no_proxy().build().unwrap();
        CompletionGateway::with_client(client, config)
    }

    fn reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })
    }

    #[tokio::test]
    async fn test_missing_token_makes_no_request() {
        let (url, seen) = spawn_stub(StatusCode::OK, reply("4")).await;
        let gateway = gateway(CompletionConfig::default().with_endpoint(url));

        let result = gateway.complete("What is 2+2?").await;
        assert!(matches!(result, Err(CompletionError::CredentialMissing)));
        assert_eq!(gateway.answer("What is 2+2?").await, "Missing API token");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_success_sends_expected_body() {
        let (url, seen) = spawn_stub(StatusCode::OK, reply("  4 \n")).await;
        let config = CompletionConfig::default()
            .with_endpoint(url)
            .with_token("test-token");
        let gateway = gateway(config);

        assert_eq!(gateway.answer("What is 2+2?").await, "4");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (auth, body) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer test-token"));
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["max_tokens"], 600);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "What is 2+2?");
    }

    #[tokio::test]
    async fn test_bad_status() {
        let (url, seen) = spawn_stub(
            StatusCode::UNAUTHORIZED,
            serde_json::json!({"error": "invalid token"}),
        )
        .await;
        let gateway = gateway(CompletionConfig::default().with_endpoint(url).with_token("t"));

        match gateway.complete("q").await {
            Err(CompletionError::BadStatus { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid token"));
            }
            other => panic!("expected BadStatus, got {:?}", other),
        }
        assert_eq!(gateway.answer("q").await, "LLM generation failed");
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (url, _seen) = spawn_stub(StatusCode::OK, serde_json::json!({"result": "4"})).await;
        let gateway = gateway(CompletionConfig::default().with_endpoint(url).with_token("t"));

        assert!(matches!(
            gateway.complete("q").await,
            Err(CompletionError::BadResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_choices() {
        let (url, _seen) = spawn_stub(StatusCode::OK, serde_json::json!({"choices": []})).await;
        let gateway = gateway(CompletionConfig::default().with_endpoint(url).with_token("t"));

        assert!(matches!(
            gateway.complete("q").await,
            Err(CompletionError::BadResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = CompletionConfig::default()
            .with_endpoint(format!("http://{}/v1/chat/completions", addr))
            .with_token("t");
        let gateway = gateway(config);

        assert!(matches!(
            gateway.complete("q").await,
            Err(CompletionError::Transport(_))
        ));
        assert_eq!(gateway.answer("q").await, "LLM generation failed");
    }
}
