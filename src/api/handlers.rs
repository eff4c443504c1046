use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::{mapper, models::*},
    backend::{Credential, RepositoryBackend, RepositoryKey},
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn RepositoryBackend>,
}

impl AppState {
    pub fn new(backend: impl RepositoryBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

/// POST /repositories - Create a repository for the authenticated user
///
/// The body is validated before the credential is looked at, so a bad body is
/// always a 400 (or 413 past the size limit) even without a token.
pub async fn create_repository(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<RepositoryCreateRequest>)> {
    let request = RepositoryCreateRequest::from_json(&body?)?;
    let credential = Credential::from_headers(&headers)?;

    debug!("Create repository request: {}", request.name);

    state
        .backend
        .create_repository(&credential, &request.name)
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /repositories - List repositories of the authenticated user
pub async fn list_repositories(
    State(state): State<AppState>,
    credential: Credential,
) -> Result<Json<Vec<RepositorySummary>>> {
    debug!("List repositories request");

    let raw = state.backend.list_repositories(&credential).await?;

    Ok(Json(mapper::summarize_repositories(&raw)))
}

/// DELETE /repositories/:owner/:repo - Delete a repository
///
/// Exactly one response is written: 204 on success, the error otherwise.
pub async fn delete_repository(
    State(state): State<AppState>,
    key: RepositoryKey,
    credential: Credential,
) -> Result<StatusCode> {
    debug!("Delete repository request: {}", key);

    state.backend.delete_repository(&credential, &key).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /repositories/:owner/:repo/pulls - Count open pull requests
pub async fn count_open_pull_requests(
    State(state): State<AppState>,
    key: RepositoryKey,
    credential: Credential,
) -> Result<Json<PullRequestCount>> {
    debug!("Open pull requests request: {}", key);

    let raw = state
        .backend
        .list_open_pull_requests(&credential, &key)
        .await?;

    Ok(Json(mapper::count_open_pull_requests(&raw)))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
