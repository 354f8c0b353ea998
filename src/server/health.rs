use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use super::AppState;

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let allow_external = state.assistant.allows_external();
    let counts = state.assistant.kb().counts();

    (
        [(
            "x-roi-allow-external",
            if allow_external { "true" } else { "false" },
        )],
        Json(json!({
            "ok": true,
            "allowExternal": allow_external,
            "kb": counts,
        })),
    )
}
