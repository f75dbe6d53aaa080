//! Static landing, documentation and form pages.

use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/docs", get(docs))
        .route("/ui", get(ui))
}

/// GET /
async fn home() -> &'static str {
    "Welcome to the TDS Solver API! Use the /api/ endpoint to interact with the service."
}

/// GET /docs
async fn docs() -> Html<&'static str> {
    Html(DOCS_HTML)
}

/// GET /ui, a question form posting to /api/.
async fn ui() -> Html<&'static str> {
    Html(UI_HTML)
}

const DOCS_HTML: &str = r#"<h1>TDS Solver API Documentation</h1>
<p>Use the <code>/api/</code> endpoint to send questions and files.</p>
<p>Example:</p>
<ul>
    <li>POST to <code>/api/</code> with a "question" field and an optional "file" field
    (ZIP, CSV, JSON, Excel, TXT or Markdown) as <code>multipart/form-data</code>.</li>
    <li>Success returns <code>{"answer": "..."}</code>; a file that cannot be read returns
    HTTP 400 with <code>{"error": "..."}</code>.</li>
</ul>
"#;

const UI_HTML: &str = r#"<html>
<head>
    <title>TDS Solver UI</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        label, input, textarea, button { display: block; margin-top: 10px; }
        textarea { width: 100%; height: 100px; }
    </style>
</head>
<body>
    <h1>TDS Solver - Interactive UI</h1>
    <form id="solverForm" enctype="multipart/form-data">
        <label for="question">Enter Question:</label>
        <textarea name="question" id="question" required></textarea>

        <label for="file">Upload File (optional):</label>
        <input type="file" name="file" id="file">

        <button type="submit">Submit</button>
    </form>
    <h3>Answer:</h3>
    <div id="result"></div>

    <script>
        document.getElementById("solverForm").onsubmit = async function (e) {
            e.preventDefault();
            const form = document.getElementById("solverForm");
            const formData = new FormData(form);
            const resultBox = document.getElementById("result");
            resultBox.innerText = "Computing...";
            const response = await fetch("/api/", {
                method: "POST",
                body: formData
            });
            const result = await response.json();
            resultBox.innerText = result.answer || result.error;
            form.reset();
        };
    </script>
</body>
</html>
"#;
