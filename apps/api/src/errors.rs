use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::validator::SchemaMismatch;
use crate::llm_client::ProviderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file provided")]
    MissingFile,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Upstream(#[from] ProviderError),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(#[from] SchemaMismatch),

    #[error("Upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
}

impl AppError {
    /// Stable machine-readable code sent alongside the user-facing message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingFile => "MISSING_FILE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Upstream(_) => "UPSTREAM_FAILURE",
            AppError::SchemaMismatch(_) => "SCHEMA_MISMATCH",
            AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingFile => (StatusCode::BAD_REQUEST, "No file provided".to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream(e) => {
                tracing::error!("Provider error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The exam analysis failed".to_string(),
                )
            }
            AppError::SchemaMismatch(e) => {
                tracing::error!("Structured output rejected: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "The exam analysis could not be parsed".to_string(),
                )
            }
            AppError::PayloadTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("The uploaded file exceeds the {limit}-byte limit"),
            ),
        };

        let body = Json(json!({
            "error": message,
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}
