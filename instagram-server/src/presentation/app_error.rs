use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("invalid json body: {0}")]
    Json(#[from] JsonRejection),

    #[error("invalid query string: {0}")]
    Query(#[from] QueryRejection),

    #[error("invalid path parameter: {0}")]
    Path(#[from] PathRejection),

    #[error("invalid multipart request: {0}")]
    MultipartRequest(#[from] MultipartRejection),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

/// Renders the `{ "error", "code" }` body shared by handlers and middleware.
pub(crate) fn error_response(
    status: StatusCode,
    code: &'static str,
    error: impl Into<String>,
) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.into(),
            code,
        }),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, msg) = match self {
            AppError::Domain(err) => {
                let status = match &err {
                    DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
                    DomainError::UserNotFound => StatusCode::NOT_FOUND,
                    DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
                    DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    DomainError::Unexpected(detail) => {
                        error!(error = %detail, "unexpected domain error");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let msg = match &err {
                    DomainError::Unexpected(_) => "internal error".to_string(),
                    _ => err.to_string(),
                };
                (status, err.code(), msg)
            }
            AppError::Validation(err) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", err.to_string())
            }
            AppError::Json(err) => (err.status(), "VALIDATION_FAILED", err.body_text()),
            AppError::Query(err) => (err.status(), "VALIDATION_FAILED", err.body_text()),
            AppError::Path(err) => (err.status(), "VALIDATION_FAILED", err.body_text()),
            AppError::Multipart(err) => (err.status(), "BAD_REQUEST", err.body_text()),
            AppError::MultipartRequest(err) => (err.status(), "BAD_REQUEST", err.body_text()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".to_string(),
            ),
        };

        error_response(status, code, msg)
    }
}
