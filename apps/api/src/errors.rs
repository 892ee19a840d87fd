use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cv::ingest::DocumentError;
use crate::cv::normalize::NormalizeError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Model-stage failures never appear here: the pipeline absorbs them.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Content(#[from] NormalizeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Usage limit reached")]
    UsageLimitReached,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Document(e) => {
                let (status, code) = match e {
                    DocumentError::UnsupportedMediaType(_) => {
                        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_MEDIA_TYPE")
                    }
                    DocumentError::PayloadTooLarge { .. } => {
                        (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE")
                    }
                    DocumentError::ExtractionFailed(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED")
                    }
                };
                (status, code, e.to_string())
            }
            AppError::Content(e) => (StatusCode::BAD_REQUEST, "CONTENT_TOO_SHORT", e.to_string()),
            AppError::Render(e) => match e {
                RenderError::RenderingInputMissing => (
                    StatusCode::BAD_REQUEST,
                    "RENDERING_INPUT_MISSING",
                    e.to_string(),
                ),
                RenderError::Template(_) => {
                    tracing::error!("Render error: {e}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "RENDERING_FAILED",
                        "Could not render the resume. Please try again.".to_string(),
                    )
                }
            },
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::UsageLimitReached => (
                StatusCode::FORBIDDEN,
                "USAGE_LIMIT_REACHED",
                "Usage limit reached for this account".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Something went wrong. Please try again.".to_string(),
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
