//! Resume rendering: Resume Structure → self-contained downloadable document.

pub mod html;

use serde::Deserialize;
use thiserror::Error;

use crate::models::ResumeStructure;

pub use html::HtmlRenderer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Structured data or HTML content is required")]
    RenderingInputMissing,

    #[error("Template rendering failed: {0}")]
    Template(String),
}

/// A renderer maps a Resume Structure to one document format.
/// Implementations are pure: same structure, same bytes.
pub trait ResumeRenderer: Send + Sync {
    fn media_type(&self) -> &'static str;
    fn file_extension(&self) -> &'static str;
    fn render(&self, resume: &ResumeStructure) -> Result<String, RenderError>;
}

/// What the caller sends to get a downloadable document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[serde(default)]
    pub structured_data: Option<ResumeStructure>,
    /// Pre-rendered markup; wins over `structured_data` when non-blank.
    #[serde(default)]
    pub html_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub body: String,
    pub media_type: &'static str,
    pub file_extension: &'static str,
}

/// Resolves a render request into a document body.
pub fn render_document(
    renderer: &dyn ResumeRenderer,
    request: RenderRequest,
) -> Result<RenderedDocument, RenderError> {
    let body = match (request.html_content, request.structured_data) {
        (Some(markup), _) if !markup.trim().is_empty() => markup,
        (_, Some(structure)) => renderer.render(&structure)?,
        _ => return Err(RenderError::RenderingInputMissing),
    };

    Ok(RenderedDocument {
        body,
        media_type: renderer.media_type(),
        file_extension: renderer.file_extension(),
    })
}
