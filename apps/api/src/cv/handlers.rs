//! Axum route handlers for the CV API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cv::ingest::{ingest_document, DocumentError, MAX_DOCUMENT_BYTES};
use crate::cv::models::{JobTargeting, PipelineResult};
use crate::errors::AppError;
use crate::render::{render_document, RenderRequest};
use crate::state::AppState;
use crate::usage::Caller;

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub normalized_text: String,
    pub page_count: usize,
    pub original_file_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    /// Missing text is treated as empty and fails the length policy.
    #[serde(default, alias = "cvContent")]
    pub cv_text: String,
    #[serde(flatten)]
    pub targeting: JobTargeting,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub result: PipelineResult,
    pub html_content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/upload
///
/// Accepts one PDF in the `resume` multipart field and returns its normalized text.
pub async fn handle_upload(mut multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let media_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let payload = field.bytes().await.map_err(multipart_error)?;

        let document = ingest_document(payload, &media_type).await?;
        info!(
            "Upload '{}' extracted: {} pages",
            original_file_name, document.page_count
        );

        return Ok(Json(UploadResponse {
            success: true,
            normalized_text: document.normalized_text,
            page_count: document.page_count,
            original_file_name,
        }));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

/// POST /api/v1/cv/improve
///
/// Runs the CV pipeline. Succeeds for any text that passes the length policy;
/// `mode` tells whether the model or the heuristic fallback produced the data.
pub async fn handle_improve(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    if !state.usage_gate.allows(&caller).await? {
        return Err(AppError::UsageLimitReached);
    }

    info!(
        "Improving CV ({} chars) with {} for caller {:?}",
        request.cv_text.len(),
        state.config.llm_model,
        caller.user_id
    );

    let result = state
        .pipeline
        .run(&request.cv_text, &request.targeting)
        .await?;
    let html_content = state.renderer.render(&result.structured_data)?;

    Ok(Json(ImproveResponse {
        success: true,
        message: "CV improved successfully".to_string(),
        result,
        html_content,
    }))
}

/// POST /api/v1/cv/download
///
/// Returns the rendered resume as an attachment. Pre-rendered `htmlContent`
/// wins over `structuredData`.
pub async fn handle_download(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let document = render_document(state.renderer.as_ref(), request)?;
    let file_name = format!(
        "improved-resume-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        document.file_extension
    );

    Ok((
        [
            (header::CONTENT_TYPE, document.media_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        document.body,
    )
        .into_response())
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        DocumentError::PayloadTooLarge {
            limit: MAX_DOCUMENT_BYTES,
        }
        .into()
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}
