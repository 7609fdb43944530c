use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("user not found")]
    UserNotFound,

    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

impl DomainError {
    /// Stable, client-facing error code.
    pub(crate) fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_FAILED",
            DomainError::UserNotFound => "USER_NOT_FOUND",
            DomainError::AlreadyExists(_) => "ALREADY_EXISTS",
            DomainError::InvalidCredentials => "INVALID_CREDENTIALS",
            DomainError::Unexpected(_) => "INTERNAL_ERROR",
        }
    }
}
