//! Error type for the marketplace service
//!
//! `ApiError` is the semantic outcome shared by guards, repositories, and
//! handlers. The HTTP status mapping lives only in the `IntoResponse` impl:
//! Forbidden -> 403, Conflict -> 400, NotFound -> 404, Validation -> 422.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::guards::GuardError;

/// Semantic outcomes surfaced by the service core
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// The actor lacks the rights for this action, regardless of state
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The actor is valid but the action violates current workflow state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input, rejected before reaching the core
    #[error("Validation error: {0}")]
    Validation(String),

    /// Infrastructure failure in the database layer
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),

    /// Any other internal failure
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<GuardError> for ApiError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Forbidden(reason) => ApiError::Forbidden(reason.to_string()),
            GuardError::Conflict(reason) => ApiError::Conflict(reason.to_string()),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            // A unique-constraint violation almost certainly means a lost
            // race on (cleaning, user) or (cleaning, cleaner).
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                ApiError::Conflict("Resource already exists".to_string())
            }
            _ => ApiError::Database(common::error::DatabaseError::Query(err)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_map_to_the_documented_status_codes() {
        let cases = [
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                ApiError::Forbidden("nope".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::Conflict("taken".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::NotFound("gone".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Validation("bad".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn guard_denials_convert_to_semantic_outcomes() {
        let forbidden: ApiError = GuardError::Forbidden("not yours").into();
        assert!(matches!(forbidden, ApiError::Forbidden(_)));

        let conflict: ApiError = GuardError::Conflict("wrong state").into();
        assert!(matches!(conflict, ApiError::Conflict(_)));
    }

    #[test]
    fn row_not_found_becomes_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, ApiError::NotFound(_)));
    }
}
