//! CV pipeline orchestration.
//!
//! Flow: normalize → build prompt → call model → parse → synthesize.
//! Any failure on the model path (gateway error, timeout, malformed output)
//! switches to the heuristic fallback, so a run only fails when the input
//! itself is too short.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::cv::analysis::{cover_letter_paragraph, improvements_narrative, quality_analysis};
use crate::cv::fallback::extract_fallback;
use crate::cv::models::{JobTargeting, PipelineMode, PipelineResult};
use crate::cv::normalize::{normalize, NormalizeError};
use crate::cv::parser::{parse_model_output, ParseError};
use crate::cv::prompts::build_cv_prompt;
use crate::llm_client::{LlmError, ModelGateway};
use crate::models::ResumeStructure;

/// Shown instead of a blank name on fallback results.
pub const PLACEHOLDER_NAME: &str = "Professional";

/// Why the model path was abandoned. Logged, never returned to callers.
#[derive(Debug, Error)]
enum ModelPathError {
    #[error(transparent)]
    Gateway(#[from] LlmError),

    #[error("model call exceeded {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Runs one CV through the pipeline. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct CvPipeline {
    gateway: Arc<dyn ModelGateway>,
    model_timeout: Duration,
}

impl CvPipeline {
    pub fn new(gateway: Arc<dyn ModelGateway>, model_timeout: Duration) -> Self {
        Self {
            gateway,
            model_timeout,
        }
    }

    /// Only [`NormalizeError::ContentTooShort`] can escape; every model-stage
    /// failure resolves to a heuristic-fallback result.
    pub async fn run(
        &self,
        cv_text: &str,
        targeting: &JobTargeting,
    ) -> Result<PipelineResult, NormalizeError> {
        let text = normalize(cv_text)?;

        let (mode, structured_data) = match self.model_path(&text, targeting).await {
            Ok(structure) => (PipelineMode::ModelDerived, structure),
            Err(e) => {
                warn!("Model path failed, using heuristic fallback: {e}");
                (PipelineMode::HeuristicFallback, fallback_structure(&text))
            }
        };

        info!(
            "CV pipeline finished: mode={:?}, experience={}, targeted={}",
            mode,
            structured_data.experience.len(),
            !targeting.is_untargeted()
        );

        Ok(PipelineResult {
            mode,
            structured_data,
            quality_analysis: quality_analysis(mode),
            improvements_narrative: improvements_narrative(mode),
            cover_letter_paragraph: cover_letter_paragraph(mode, targeting),
            pipeline_description: mode.description().to_string(),
        })
    }

    /// Single attempt; the timeout abandons the in-flight call.
    async fn model_path(
        &self,
        text: &str,
        targeting: &JobTargeting,
    ) -> Result<ResumeStructure, ModelPathError> {
        let prompt = build_cv_prompt(text, targeting);

        let completion = tokio::time::timeout(self.model_timeout, self.gateway.submit(&prompt))
            .await
            .map_err(|_| ModelPathError::Timeout(self.model_timeout))??;

        Ok(parse_model_output(&completion)?)
    }
}

fn fallback_structure(text: &str) -> ResumeStructure {
    let mut structure = extract_fallback(text);
    if structure.header.name.is_empty() {
        structure.header.name = PLACEHOLDER_NAME.to_string();
    }
    structure
}
