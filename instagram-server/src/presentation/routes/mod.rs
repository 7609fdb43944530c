use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod users;

/// API routes with state applied; static files and docs are mounted by the server.
pub(crate) fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api/auth", auth::router())
        .nest("/api/users", users::router(state.clone()))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
