//! Page source contract and the pdfium-backed implementation.
//!
//! PDF parsing and rasterization stay outside the pipeline proper: the
//! pipeline sees only [`PageSource`]. The `pdf` feature supplies
//! [`source::PdfiumSource`], an adapter over pdfium, as the default
//! implementation.

#[cfg(feature = "pdf")]
pub mod error;
#[cfg(feature = "pdf")]
pub mod source;

use async_trait::async_trait;

use crate::error::Result;

/// A paged document that can hand out text and rendered rasters.
///
/// All suspension points of the pipeline go through this trait: page text
/// extraction and page rendering are awaited one page at a time, so a source
/// never needs to hold more than one rendered page alive.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Machine-readable text of a page, items joined with newlines.
    async fn page_text(&self, page: usize) -> Result<String>;

    /// Render a page to PNG bytes at the given DPI.
    async fn render_page(&self, page: usize, dpi: i32) -> Result<Vec<u8>>;
}
