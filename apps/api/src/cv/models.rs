use serde::{Deserialize, Serialize};

use crate::models::ResumeStructure;

/// Optional job-targeting fields. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTargeting {
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl JobTargeting {
    pub fn job_description(&self) -> Option<&str> {
        non_blank(&self.job_description)
    }

    pub fn company_name(&self) -> Option<&str> {
        non_blank(&self.company_name)
    }

    pub fn position(&self) -> Option<&str> {
        non_blank(&self.position)
    }

    pub fn is_untargeted(&self) -> bool {
        self.job_description().is_none() && self.company_name().is_none() && self.position().is_none()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Which producer supplied the structured data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineMode {
    ModelDerived,
    HeuristicFallback,
}

impl PipelineMode {
    /// Human-readable stage sequence for this mode.
    pub fn description(self) -> &'static str {
        match self {
            PipelineMode::ModelDerived => {
                "Text → Normalize → Model JSON → Parse → Resume Structure → HTML"
            }
            PipelineMode::HeuristicFallback => {
                "Text → Normalize → Heuristic Fallback → Resume Structure → HTML"
            }
        }
    }
}

/// Descriptive labels attached to a result. Fixed per mode, not scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAnalysis {
    /// 0 – 100
    pub score: u8,
    pub structure_detection: String,
    pub content_enhancement: String,
    pub ats_optimization: String,
}

/// Output of one pipeline run. Built fresh per request, never retained.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub mode: PipelineMode,
    pub structured_data: ResumeStructure,
    pub quality_analysis: QualityAnalysis,
    pub improvements_narrative: Vec<String>,
    pub cover_letter_paragraph: String,
    pub pipeline_description: String,
}
