use super::*;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use roibot_core::answer::NO_MATCH_MESSAGE;
use roibot_core::assistant::{FallbackProvider, FALLBACK_UNCONFIGURED_MESSAGE};
use roibot_core::catalog::KnowledgeBase;
use roibot_core::config::DEFAULT_ALLOWED_ORIGINS;
use roibot_core::error::{Result, RoiError};

struct FailingProvider;

impl FallbackProvider for FailingProvider {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Err(RoiError::Fallback("HTTP 503".into()))
    }
}

struct EchoProvider;

impl FallbackProvider for EchoProvider {
    fn generate(&self, prompt: &str) -> Result<String> {
        Ok(format!("echo: {}", prompt.lines().next().unwrap_or_default()))
    }
}

fn origins() -> Vec<String> {
    DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()
}

fn app_with(assistant: Assistant) -> Router {
    build_router(Arc::new(assistant), &origins())
}

fn kb_only_app() -> Router {
    app_with(Assistant::new(Arc::new(KnowledgeBase::seed())))
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn header<'a>(response: &'a axum::response::Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn test_health_reports_counts_and_policy() {
    let response = kb_only_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-roi-allow-external"), Some("false"));

    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["allowExternal"], false);
    assert_eq!(json["kb"]["problems"], 12);
    assert_eq!(json["kb"]["levers"], 21);
    assert_eq!(json["kb"]["stories"], 2);
    assert_eq!(json["kb"]["synonyms"], 123);
}

#[tokio::test]
async fn test_chat_kb_answer() {
    let response = kb_only_app()
        .oneshot(chat_request(
            r#"{"prompt":"I have a low adoption problem—what can I do","mode":"kb"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-roi-mode"), Some("kb"));
    assert_eq!(header(&response, "x-roi-path"), Some("kb"));

    let json = body_json(response).await;
    let text = json["text"].as_str().unwrap();
    assert!(text.starts_with("I detected the problem: **Low adoption**."));
}

#[tokio::test]
async fn test_chat_hybrid_forced_to_kb_without_external() {
    let response = kb_only_app()
        .oneshot(chat_request(r#"{"prompt":"asdkjasd nonsense query","mode":"hybrid"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-roi-mode"), Some("kb"));
    assert_eq!(header(&response, "x-roi-path"), Some("kb-nohit"));
    assert_eq!(body_json(response).await["text"], NO_MATCH_MESSAGE);
}

#[tokio::test]
async fn test_chat_empty_body_defaults() {
    let response = kb_only_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-roi-path"), Some("kb-nohit"));
}

#[tokio::test]
async fn test_chat_unconfigured_fallback() {
    let app = app_with(Assistant::new(Arc::new(KnowledgeBase::seed())).allow_external(true));

    let response = app
        .oneshot(chat_request(r#"{"prompt":"asdkjasd nonsense query"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-roi-mode"), Some("hybrid"));
    assert_eq!(header(&response, "x-roi-path"), Some("fallback-ai"));
    assert_eq!(body_json(response).await["text"], FALLBACK_UNCONFIGURED_MESSAGE);
}

#[tokio::test]
async fn test_chat_fallback_text() {
    let app = app_with(
        Assistant::new(Arc::new(KnowledgeBase::seed()))
            .allow_external(true)
            .with_fallback(Box::new(EchoProvider)),
    );

    let response = app
        .oneshot(chat_request(r#"{"prompt":"asdkjasd nonsense query","mode":"HYBRID"}"#))
        .await
        .unwrap();

    assert_eq!(header(&response, "x-roi-path"), Some("fallback-ai"));
    assert_eq!(
        body_json(response).await["text"],
        "echo: User question: asdkjasd nonsense query"
    );
}

#[tokio::test]
async fn test_chat_fallback_error_is_500() {
    let app = app_with(
        Assistant::new(Arc::new(KnowledgeBase::seed()))
            .allow_external(true)
            .with_fallback(Box::new(FailingProvider)),
    );

    let response = app
        .oneshot(chat_request(r#"{"prompt":"asdkjasd nonsense query"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header(&response, "x-roi-path"), Some("error"));
    assert_eq!(header(&response, "x-roi-mode"), Some("hybrid"));
    assert_eq!(body_json(response).await["text"], "Assistant error. Check logs.");
}

#[tokio::test]
async fn test_chat_malformed_json_is_400() {
    let response = kb_only_app()
        .oneshot(chat_request("{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_rejects_get() {
    let response = kb_only_app()
        .oneshot(
            Request::builder()
                .uri("/api/chat")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let prompt = "a".repeat(MAX_BODY_BYTES + 1);
    let body = format!(r#"{{"prompt":"{prompt}"}}"#);

    let response = kb_only_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .header("content-length", body.len().to_string())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_cors_allowed_origin_echoed() {
    let response = kb_only_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("origin", "https://app.pendo.io")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        header(&response, "access-control-allow-origin"),
        Some("https://app.pendo.io")
    );
}

#[tokio::test]
async fn test_cors_unknown_origin_not_echoed() {
    let response = kb_only_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("origin", "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn test_cors_preflight() {
    let response = kb_only_app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/chat")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "access-control-allow-origin"),
        Some("http://localhost:3000")
    );
    let methods = header(&response, "access-control-allow-methods").unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn test_chat_numeric_prompt_is_answered() {
    let response = kb_only_app()
        .oneshot(chat_request(r#"{"prompt":5}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-roi-path"), Some("kb-nohit"));
    assert_eq!(body_json(response).await["text"], NO_MATCH_MESSAGE);
}

#[tokio::test]
async fn test_chat_non_string_mode_is_hybrid() {
    let app = app_with(Assistant::new(Arc::new(KnowledgeBase::seed())).allow_external(true));

    let response = app
        .oneshot(chat_request(r#"{"prompt":"asdkjasd nonsense query","mode":7}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-roi-mode"), Some("hybrid"));
}

#[test]
fn test_prompt_text_from_json_values() {
    use serde_json::json;

    assert_eq!(chat::prompt_text(None), "");
    assert_eq!(chat::prompt_text(Some(&json!(null))), "");
    assert_eq!(chat::prompt_text(Some(&json!(false))), "");
    assert_eq!(chat::prompt_text(Some(&json!(0))), "");
    assert_eq!(chat::prompt_text(Some(&json!(true))), "true");
    assert_eq!(chat::prompt_text(Some(&json!(5))), "5");
    assert_eq!(chat::prompt_text(Some(&json!(2.5))), "2.5");
    assert_eq!(chat::prompt_text(Some(&json!("low adoption"))), "low adoption");
}
