use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::draws::Unresolvable;
use crate::recommendation::constraints::ValidationError;
use crate::recommendation::recommender::RecommenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Unresolvable(#[from] Unresolvable),

    #[error(
        "Statistics need at least {minimum} draws, but a window of {requested} was requested"
    )]
    WindowTooSmall { requested: u32, minimum: u32 },

    #[error(
        "Statistics need at least {minimum} draws, but only {retrieved} were available \
        in the requested window; try a different window size"
    )]
    InsufficientHistory { retrieved: usize, minimum: usize },

    #[error("Recommendation error: {0}")]
    Collaborator(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<RecommenderError> for AppError {
    fn from(e: RecommenderError) -> Self {
        AppError::Collaborator(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unresolvable(e) => {
                tracing::error!("Latest draw unresolvable: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "LATEST_DRAW_UNRESOLVABLE",
                    e.to_string(),
                )
            }
            AppError::WindowTooSmall { .. } | AppError::InsufficientHistory { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INSUFFICIENT_HISTORY",
                self.to_string(),
            ),
            AppError::Collaborator(msg) => {
                tracing::error!("Recommendation collaborator error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "RECOMMENDATION_ERROR",
                    "The recommendation service failed; please try again".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
