//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            // Persistence failures stay opaque to callers.
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error",
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
            detail: None,
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<cinedex_core::auth::AuthError> for AppError {
    fn from(e: cinedex_core::auth::AuthError) -> Self {
        use cinedex_core::auth::AuthError;
        match e {
            AuthError::InvalidCredentials => AppError::Unauthorized("Invalid credentials".into()),
            // Token failures collapse to one user-facing category.
            AuthError::TokenExpired | AuthError::TokenInvalid => {
                AppError::Unauthorized("Invalid or expired token".into())
            }
            AuthError::TokenError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<cinedex_core::movies::MovieError> for AppError {
    fn from(e: cinedex_core::movies::MovieError) -> Self {
        use cinedex_core::movies::MovieError;
        match e {
            MovieError::Validation(msg) => AppError::Validation(msg),
            MovieError::NotFound => AppError::NotFound("Movie not found".into()),
            MovieError::DuplicateTitle => {
                AppError::Conflict("A movie with this title already exists".into())
            }
            MovieError::Db(e) => AppError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedex_core::auth::AuthError;
    use cinedex_core::movies::MovieError;

    #[test]
    fn token_failures_collapse_to_unauthorized() {
        for err in [AuthError::TokenExpired, AuthError::TokenInvalid] {
            match AppError::from(err) {
                AppError::Unauthorized(msg) => assert_eq!(msg, "Invalid or expired token"),
                other => panic!("unexpected mapping: {other:?}"),
            }
        }
    }

    #[test]
    fn duplicate_title_maps_to_conflict() {
        assert!(matches!(
            AppError::from(MovieError::DuplicateTitle),
            AppError::Conflict(_)
        ));
    }

    #[test]
    fn internal_error_body_is_redacted() {
        let resp = AppError::Internal("connection reset by peer".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
