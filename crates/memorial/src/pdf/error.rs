//! PDF adapter errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PdfError>;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Page {0} not found")]
    PageNotFound(usize),

    #[error("Text extraction failed: {0}")]
    TextExtractionFailed(String),

    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    #[error("pdfium library unavailable: {0}")]
    MissingLibrary(String),
}
