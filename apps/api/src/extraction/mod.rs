//! Text Extraction: turns an uploaded PDF or PPTX into the plain text every other module reads.
//!
//! Extraction never fails a request on its own: the handler reports an unreadable document as
//! empty text plus a warning so the user can paste the text instead.

pub mod handlers;
pub mod pptx;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Below this many trimmed characters a deck is treated as mostly images.
pub const MIN_TEXT_CHARS: usize = 50;
pub const PREVIEW_CHARS: usize = 800;
/// A single PPTX part may inflate to at most this multiple of the upload limit.
pub const MAX_PART_EXPANSION: u64 = 10;

pub const LIMITED_TEXT_WARNING: &str = "Very little text was extracted. The deck may be mostly \
     images; paste the slide text manually for a better analysis.";
pub const UNREADABLE_WARNING: &str = "The document could not be read. Check that the file is a \
     valid PDF or PPTX, or paste the slide text manually.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckFormat {
    Pdf,
    Pptx,
}

impl DeckFormat {
    /// Content type wins when it is specific; otherwise the file extension decides.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());
        match mime.as_deref() {
            Some(PDF_CONTENT_TYPE) => return Some(DeckFormat::Pdf),
            Some(PPTX_CONTENT_TYPE) => return Some(DeckFormat::Pptx),
            _ => {}
        }

        let extension = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(DeckFormat::Pdf),
            "pptx" => Some(DeckFormat::Pptx),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("PPTX extraction failed: {0}")]
    Pptx(String),

    #[error("PPTX part '{part}' is larger than {limit} bytes once decompressed")]
    PartTooLarge { part: String, limit: u64 },

    #[error("Extraction task aborted: {0}")]
    Aborted(String),
}

/// Decompressed size cap for one PPTX part, derived from the upload limit.
pub fn max_part_bytes(max_upload_bytes: usize) -> u64 {
    (max_upload_bytes as u64).saturating_mul(MAX_PART_EXPANSION)
}

/// Runs the format's parser on a blocking thread. A panic inside a parser becomes
/// `ExtractionError::Aborted`.
pub async fn extract_text(
    data: Bytes,
    format: DeckFormat,
    max_upload_bytes: usize,
) -> Result<String, ExtractionError> {
    let part_limit = max_part_bytes(max_upload_bytes);
    tokio::task::spawn_blocking(move || match format {
        DeckFormat::Pdf => extract_pdf(&data),
        DeckFormat::Pptx => pptx::extract_text(&data, part_limit),
    })
    .await
    .map_err(|e| ExtractionError::Aborted(e.to_string()))?
}

fn extract_pdf(data: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckStats {
    pub characters: usize,
    pub words: usize,
    pub preview: String,
}

pub fn deck_stats(text: &str) -> DeckStats {
    let characters = text.chars().count();
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if characters > PREVIEW_CHARS {
        preview.push_str("...");
    }

    DeckStats {
        characters,
        words: text.split_whitespace().count(),
        preview,
    }
}

pub fn is_limited(text: &str) -> bool {
    text.trim().chars().count() < MIN_TEXT_CHARS
}
