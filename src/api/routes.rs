use axum::http::{header, HeaderValue};
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api::handlers::{self, AppState};
use crate::config::Settings;

/// Create the router with all endpoints
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    let repository_routes = Router::new()
        .route(
            "/repositories",
            get(handlers::list_repositories).post(handlers::create_repository),
        )
        .route("/repositories/:owner/:repo", delete(handlers::delete_repository))
        .route(
            "/repositories/:owner/:repo/pulls",
            get(handlers::count_open_pull_requests),
        )
        .with_state(state);

    let health_routes = Router::new().route("/health", get(handlers::health_check));

    Router::new()
        .merge(repository_routes)
        .merge(health_routes)
        .layer(
            // Request body size limit - enforced by the body extractor so the
            // rejection goes through `Error` and keeps the JSON shape
            DefaultBodyLimit::max(settings.server.max_request_body_size),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(TraceLayer::new_for_http())
}
