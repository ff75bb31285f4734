//! Resume text extraction.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("resume upload is empty")]
    Empty,

    #[error("resume could not be read: {0}")]
    Unreadable(String),
}

impl ExtractionError {
    pub fn code(&self) -> &'static str {
        match self {
            ExtractionError::Empty => "empty",
            ExtractionError::Unreadable(_) => "unreadable",
        }
    }
}

/// Converts raw document bytes into plain text.
///
/// Implementations are blocking; the orchestrator runs them off the async
/// executor.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// PDF extractor backed by `pdf-extract`. Pages are emitted in document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(ExtractionError::Unreadable(
                "upload is not a PDF document".to_string(),
            ));
        }

        // pdf-extract panics on some malformed documents instead of erroring.
        let text = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| ExtractionError::Unreadable("PDF decoder aborted".to_string()))?
            .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

        debug!("Extracted {} characters from {} byte PDF", text.len(), bytes.len());
        Ok(text)
    }
}
