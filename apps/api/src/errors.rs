use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::pipeline::generation::GenerationError;
use crate::pipeline::PipelineError;

/// Message for every authentication failure, so a bad token and an unknown
/// user are indistinguishable.
const UNAUTHORIZED_MESSAGE: &str = "Invalid credentials";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, error_body("NOT_FOUND", msg)),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, error_body("VALIDATION_ERROR", msg))
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                error_body("UNAUTHORIZED", UNAUTHORIZED_MESSAGE),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("DATABASE_ERROR", "A database error occurred"),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("STORAGE_ERROR", "A storage error occurred"),
                )
            }
            AppError::Pipeline(e) => pipeline_response(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_body("INTERNAL_ERROR", "An internal server error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn error_body(code: &str, message: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// Maps a pipeline failure onto a status class. The orchestrator has already
/// logged it. Generation replies are never echoed back.
fn pipeline_response(e: &PipelineError) -> (StatusCode, Value) {
    let (status, code, message) = match e {
        PipelineError::Unauthenticated => {
            return (
                StatusCode::UNAUTHORIZED,
                error_body("UNAUTHORIZED", UNAUTHORIZED_MESSAGE),
            );
        }
        PipelineError::Precondition(p) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", p.to_string()),
        PipelineError::Parsing(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "RESULT_UNAVAILABLE",
            "The result could not be produced: the AI service reply was not usable".to_string(),
        ),
        PipelineError::Validation(v) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "RESULT_UNAVAILABLE",
            format!("The result could not be produced: {v}"),
        ),
        PipelineError::Extraction(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "EXTRACTION_ERROR",
            "The resume could not be processed".to_string(),
        ),
        PipelineError::Generation(GenerationError::MissingCredential) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "GENERATION_UNAVAILABLE",
            "The AI service is not configured".to_string(),
        ),
        PipelineError::Generation(_) => (
            StatusCode::BAD_GATEWAY,
            "GENERATION_ERROR",
            "An AI processing error occurred".to_string(),
        ),
    };

    let body = json!({
        "error": {
            "code": code,
            "message": message,
            "stage": e.stage(),
            "kind": e.kind()
        }
    });
    (status, body)
}
