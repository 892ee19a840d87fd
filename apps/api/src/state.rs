use std::sync::Arc;

use crate::config::Config;
use crate::cv::pipeline::CvPipeline;
use crate::render::ResumeRenderer;
use crate::usage::UsageGate;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing here is mutable; concurrent requests share no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: CvPipeline,
    /// Default: HtmlRenderer.
    pub renderer: Arc<dyn ResumeRenderer>,
    /// Quota check supplied by the surrounding platform. Default: Unmetered.
    pub usage_gate: Arc<dyn UsageGate>,
}
