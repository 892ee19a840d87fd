//! Document ingestion: PDF bytes in, normalized text and page count out.
//!
//! `pdf-extract` can panic on malformed input instead of returning an error,
//! so decoding runs behind `catch_unwind` on a blocking thread.

use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::cv::normalize::normalize;
use crate::errors::AppError;

/// The only media type accepted for uploads.
pub const ACCEPTED_MEDIA_TYPE: &str = "application/pdf";
/// Upload ceiling, checked before any decoding happens.
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Only PDF files are allowed (received '{0}')")]
    UnsupportedMediaType(String),

    #[error("File too large. Maximum size is {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Could not extract text from the document: {0}")]
    ExtractionFailed(String),
}

/// Text straight out of the decoder, before normalization.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub text: String,
    pub page_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub normalized_text: String,
    pub page_count: usize,
}

/// Validates media type and size. Parameters such as `; charset=binary`
/// are ignored when comparing the media type.
pub fn check_payload(payload: &[u8], media_type: &str) -> Result<(), DocumentError> {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if essence != ACCEPTED_MEDIA_TYPE {
        return Err(DocumentError::UnsupportedMediaType(media_type.to_string()));
    }
    if payload.len() > MAX_DOCUMENT_BYTES {
        warn!("Rejected {} byte upload before decoding", payload.len());
        return Err(DocumentError::PayloadTooLarge {
            limit: MAX_DOCUMENT_BYTES,
        });
    }
    Ok(())
}

/// Decodes PDF bytes into text, one page at a time.
pub fn extract_pdf(payload: &[u8]) -> Result<RawDocument, DocumentError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(payload)
    }));

    let pages = match result {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => return Err(DocumentError::ExtractionFailed(e.to_string())),
        Err(_) => {
            return Err(DocumentError::ExtractionFailed(
                "decoder panicked on a malformed document".to_string(),
            ))
        }
    };

    if pages.is_empty() {
        return Err(DocumentError::ExtractionFailed(
            "document has no pages".to_string(),
        ));
    }

    Ok(RawDocument {
        page_count: pages.len(),
        text: pages.join("\n\n"),
    })
}

/// Full ingestion boundary: checks, decodes, then normalizes and applies the
/// minimum-length policy.
pub async fn ingest_document(payload: Bytes, media_type: &str) -> Result<ExtractedDocument, AppError> {
    check_payload(&payload, media_type)?;

    let size = payload.len();
    let raw = tokio::task::spawn_blocking(move || extract_pdf(&payload))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .inspect_err(|e| warn!("PDF extraction failed for {size} byte payload: {e}"))?;

    let normalized_text = normalize(&raw.text)?;
    info!(
        "PDF extracted: {} pages, {} characters",
        raw.page_count,
        normalized_text.chars().count()
    );

    Ok(ExtractedDocument {
        normalized_text,
        page_count: raw.page_count,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cv::normalize::NormalizeError;

    /// Assembles a one-page PDF that draws `text` in Helvetica.
    pub(crate) fn minimal_pdf(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
             /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_start = pdf.len();
        pdf.extend_from_slice(
            format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes(),
        );
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_start
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_rejects_non_pdf_media_type() {
        assert_eq!(
            check_payload(b"hello", "text/plain"),
            Err(DocumentError::UnsupportedMediaType("text/plain".to_string()))
        );
    }

    #[test]
    fn test_media_type_parameters_are_ignored() {
        assert!(check_payload(b"%PDF", "Application/PDF; charset=binary").is_ok());
    }

    #[test]
    fn test_rejects_oversized_payload_before_decoding() {
        let payload = vec![0u8; MAX_DOCUMENT_BYTES + 1];
        assert_eq!(
            check_payload(&payload, ACCEPTED_MEDIA_TYPE),
            Err(DocumentError::PayloadTooLarge {
                limit: MAX_DOCUMENT_BYTES
            })
        );
    }

    #[test]
    fn test_payload_at_ceiling_is_accepted() {
        let payload = vec![0u8; MAX_DOCUMENT_BYTES];
        assert!(check_payload(&payload, ACCEPTED_MEDIA_TYPE).is_ok());
    }

    #[test]
    fn test_corrupt_bytes_fail_extraction() {
        let result = extract_pdf(b"%PDF-1.4\nthis is not really a pdf");
        assert!(matches!(result, Err(DocumentError::ExtractionFailed(_))));
    }

    #[test]
    fn test_extracts_text_and_page_count() {
        let pdf = minimal_pdf("Jane Allen Doe");
        let raw = extract_pdf(&pdf).unwrap();
        assert_eq!(raw.page_count, 1);
        assert!(raw.text.contains("Jane"));
    }

    #[tokio::test]
    async fn test_ingest_applies_length_policy() {
        let pdf = Bytes::from(minimal_pdf("Jane Allen Doe"));
        let err = ingest_document(pdf, ACCEPTED_MEDIA_TYPE).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Content(NormalizeError::ContentTooShort { .. })
        ));
    }

    #[tokio::test]
    async fn test_ingest_normalizes_long_document() {
        let line = "Jane Allen Doe, Senior Software Engineer, jane.doe@example.com";
        let pdf = Bytes::from(minimal_pdf(line));
        let doc = ingest_document(pdf, ACCEPTED_MEDIA_TYPE).await.unwrap();
        assert_eq!(doc.page_count, 1);
        assert!(doc.normalized_text.contains("jane.doe@example.com"));
        assert!(!doc.normalized_text.contains("  "));
    }

    #[tokio::test]
    async fn test_ingest_rejects_wrong_type_without_decoding() {
        let err = ingest_document(Bytes::from_static(b"hi"), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Document(DocumentError::UnsupportedMediaType(_))
        ));
    }
}
