pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::cv::handlers;
use crate::cv::ingest::MAX_DOCUMENT_BYTES;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the document ceiling.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/cv/upload",
            post(handlers::handle_upload)
                .layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route("/api/v1/cv/improve", post(handlers::handle_improve))
        .route("/api/v1/cv/download", post(handlers::handle_download))
        .with_state(state)
}
