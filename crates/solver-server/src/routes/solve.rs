//! POST /api/: answer a question, optionally grounded in an uploaded file.

use std::sync::Arc;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use solver_chat::build_prompt;
use solver_ingest::UploadedFile;
use tracing::{error, info, info_span, Instrument};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/", post(solve))
        .route("/api", post(solve))
}

/// Fields read from the multipart form.
#[derive(Debug, Default)]
struct SolveForm {
    question: String,
    file: Option<UploadedFile>,
}

async fn solve(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    let request_id = uuid::Uuid::new_v4();
    let span = info_span!("solve", %request_id);

    async move {
        let form = match multipart {
            Ok(multipart) => read_form(multipart).await,
            Err(rejection) => Err((rejection.status(), rejection.body_text())),
        };
        let form = match form {
            Ok(form) => form,
            Err((status, e)) => {
                error!("Invalid form submission: {}", e);
                return (
                    status,
                    Json(serde_json::json!({ "error": format!("Invalid request: {}", e) })),
                );
            }
        };

        info!("Received question: {}", form.question);

        let upload = form.file;
        let ingested =
            tokio::task::spawn_blocking(move || solver_ingest::ingest(upload.as_ref())).await;

        let file_data = match ingested {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                error!("Error processing file: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": format!("Error processing file: {}", e) })),
                );
            }
            Err(e) => {
                error!("Ingestion task failed: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal error while processing file" })),
                );
            }
        };

        let prompt = build_prompt(&form.question, &file_data);
        let answer = state.gateway.answer(&prompt).await;

        (StatusCode::OK, Json(serde_json::json!({ "answer": answer })))
    }
    .instrument(span)
    .await
}

/// Collect `question` and `file`; other fields are ignored.
async fn read_form(mut multipart: Multipart) -> Result<SolveForm, (StatusCode, String)> {
    let mut form = SolveForm::default();

    while let Some(field) = multipart.next_field().await.map_err(describe)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("question") => {
                form.question = field.text().await.map_err(describe)?;
            }
            Some("file") => {
                // Browsers send an empty filename when nothing was chosen.
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(describe)?;
                if !filename.is_empty() {
                    form.file = Some(UploadedFile::new(filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Keeps the status axum assigns, e.g. 413 when the body limit is hit.
fn describe(e: MultipartError) -> (StatusCode, String) {
    (e.status(), e.body_text())
}
