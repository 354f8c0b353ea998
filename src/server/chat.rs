use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use roibot_core::assistant::{AnswerPath, Mode, ERROR_MESSAGE};

const MODE_HEADER: &str = "x-roi-mode";
const PATH_HEADER: &str = "x-roi-path";

#[derive(Debug, Default, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    prompt: Option<Value>,
    #[serde(default)]
    mode: Option<Value>,
}

/// Prompt text for any JSON value: falsy scalars are empty, other scalars
/// use their plain rendering, arrays and objects their JSON text
pub(super) fn prompt_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// `POST /api/chat`
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ChatRequest = if body.is_empty() {
        ChatRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "invalid chat request body");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "invalid JSON body" })),
                )
                    .into_response();
            }
        }
    };

    let requested = Mode::from_request(request.mode.as_ref().and_then(Value::as_str));
    let prompt = prompt_text(request.prompt.as_ref());
    let assistant = Arc::clone(&state.assistant);
    let mode = assistant.effective_mode(requested);

    let result = tokio::task::spawn_blocking(move || assistant.respond(&prompt, requested)).await;

    match result {
        Ok(Ok(reply)) => {
            tracing::info!(path = reply.path.as_str(), mode = reply.mode.as_str(), problem = ?reply.problem, "chat_reply");
            reply_response(StatusCode::OK, reply.text, reply.mode, reply.path)
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "assistant error");
            reply_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ERROR_MESSAGE.to_string(),
                mode,
                AnswerPath::Error,
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "assistant task failed");
            reply_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ERROR_MESSAGE.to_string(),
                mode,
                AnswerPath::Error,
            )
        }
    }
}

fn reply_response(status: StatusCode, text: String, mode: Mode, path: AnswerPath) -> Response {
    (
        status,
        [(MODE_HEADER, mode.as_str()), (PATH_HEADER, path.as_str())],
        Json(json!({ "text": text })),
    )
        .into_response()
}
