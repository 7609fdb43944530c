use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::Response,
};
use tower::ServiceBuilder;
use tower::timeout::error::Elapsed;
use tracing::warn;

use crate::infrastructure::settings::Settings;
use crate::presentation::app_error::error_response;

pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(DefaultBodyLimit::max(settings.http_request_body_limit_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(Duration::from_secs(settings.http_request_timeout_secs))
                .concurrency_limit(settings.http_concurrency_limit),
        )
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        warn!("request timed out");
        return error_response(StatusCode::REQUEST_TIMEOUT, "TIMEOUT", "request timed out");
    }
    warn!(error = %err, "middleware failure");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "internal error",
    )
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use serde_json::Value;
    use tower::timeout::error::Elapsed;

    use super::handle_middleware_error;

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        serde_json::from_slice(&bytes).expect("body must be json")
    }

    #[tokio::test]
    async fn timeout_renders_json_error_body() {
        let response = handle_middleware_error(Box::new(Elapsed::new())).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(json_body(response).await["code"], "TIMEOUT");
    }

    #[tokio::test]
    async fn other_middleware_failures_are_internal_errors() {
        let response = handle_middleware_error("overloaded".into()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"], "internal error");
    }
}
