//! Synthesized artifacts attached to every pipeline result.
//!
//! All three are fixed per mode and targeting context: no scoring logic and
//! no extra model calls.

use crate::cv::models::{JobTargeting, PipelineMode, QualityAnalysis};

pub const MODEL_DERIVED_SCORE: u8 = 94;
pub const FALLBACK_SCORE: u8 = 80;

pub fn quality_analysis(mode: PipelineMode) -> QualityAnalysis {
    match mode {
        PipelineMode::ModelDerived => QualityAnalysis {
            score: MODEL_DERIVED_SCORE,
            structure_detection: "Generative model".to_string(),
            content_enhancement: "Excellent".to_string(),
            ats_optimization: "Strong".to_string(),
        },
        PipelineMode::HeuristicFallback => QualityAnalysis {
            score: FALLBACK_SCORE,
            structure_detection: "Basic".to_string(),
            content_enhancement: "Basic".to_string(),
            ats_optimization: "Basic".to_string(),
        },
    }
}

pub fn improvements_narrative(mode: PipelineMode) -> Vec<String> {
    let items: &[&str] = match mode {
        PipelineMode::ModelDerived => &[
            "AI-powered parsing with a generative model",
            "Enhanced content with action verbs",
            "Structured data extraction",
            "ATS-optimized formatting",
        ],
        PipelineMode::HeuristicFallback => &["Basic parsing and structure"],
    };
    items.iter().map(|s| s.to_string()).collect()
}

pub fn cover_letter_paragraph(mode: PipelineMode, targeting: &JobTargeting) -> String {
    match mode {
        PipelineMode::ModelDerived => format!(
            "I am excited to apply for {} at {}. My background in technology and demonstrated \
             skills make me a strong candidate for this role.",
            targeting.position().unwrap_or("this position"),
            targeting.company_name().unwrap_or("your organization"),
        ),
        PipelineMode::HeuristicFallback => format!(
            "I am interested in the {} at {}.",
            targeting.position().unwrap_or("position"),
            targeting.company_name().unwrap_or("your company"),
        ),
    }
}
