use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use repo_gateway::{
    api::{create_router, AppState},
    backend::InMemoryBackend,
    Settings,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(backend: InMemoryBackend) -> Router {
    create_router(AppState::new(backend), &Settings::default())
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, "Bearer t");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_create_list_delete_cycle() {
    let backend = InMemoryBackend::new();
    let app = app_with(backend.clone());

    let (status, body) = call(&app, "POST", "/repositories", Some(json!({"name": "alpha"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"name": "alpha"}));

    let (status, _) = call(&app, "POST", "/repositories", Some(json!({"name": "beta"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, "GET", "/repositories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"name": "alpha", "private": false},
            {"name": "beta", "private": false}
        ])
    );

    let (status, body) = call(&app, "DELETE", "/repositories/me/alpha", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    assert_eq!(backend.len().await, 1);
}

#[tokio::test]
async fn test_duplicate_create_fails() {
    let app = app_with(InMemoryBackend::with_repositories(["alpha"]));

    let (status, body) = call(&app, "POST", "/repositories", Some(json!({"name": "alpha"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to create repository: status code 422");
}

#[tokio::test]
async fn test_invalid_create_leaves_store_untouched() {
    let backend = InMemoryBackend::new();
    let app = app_with(backend.clone());

    let (status, _) = call(&app, "POST", "/repositories", Some(json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(backend.is_empty().await);
}

#[tokio::test]
async fn test_delete_unknown_repository() {
    let app = app_with(InMemoryBackend::new());

    let (status, body) = call(&app, "DELETE", "/repositories/me/ghost", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to delete repository: status code 404");
}

#[tokio::test]
async fn test_pull_request_count_is_zero() {
    let app = app_with(InMemoryBackend::with_repositories(["alpha"]));

    let (status, body) = call(&app, "GET", "/repositories/me/alpha/pulls", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"open_pull_requests": 0}));
}
