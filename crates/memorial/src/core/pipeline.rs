//! The document processing loop and the per-text entry point.
//!
//! Pages are processed strictly in sequence: each page's text acquisition
//! (and any OCR behind it) is awaited before the next page starts. That
//! trades throughput for predictable log ordering and bounded memory — at
//! most one rendered page is alive at any moment. Nothing here is shared
//! across documents; one [`DocumentParser`] call produces one
//! [`DocumentResult`].

use std::sync::Arc;

use crate::acquisition::acquire_page_text;
use crate::core::config::ParseConfig;
use crate::error::Result;
use crate::extractors::BaselineParser;
use crate::geometry::{Reconstruction, reconstruct_ring};
use crate::ocr::OcrBridge;
use crate::pdf::PageSource;
use crate::types::{DocumentResult, PageProvenance, RawPageText, Vertex};

/// Parse a vertex ring out of one body of text.
///
/// This is the core-exposed contract: callable per page or per concatenated
/// document text, side-effect-free apart from diagnostic logging. A result
/// with fewer than [`crate::types::MIN_RING_VERTICES`] vertices means the
/// text did not contain a usable ring.
pub fn parse_vertices(text: &str, projection_hint: Option<&str>) -> Vec<Vertex> {
    reconstruct_ring(text, None, projection_hint).vertices
}

/// [`parse_vertices`] with an externally supplied baseline parser slotted in
/// ahead of the built-in strategies.
pub fn parse_vertices_with(
    text: &str,
    projection_hint: Option<&str>,
    baseline: Option<&dyn BaselineParser>,
) -> Vec<Vertex> {
    reconstruct_ring(text, baseline, projection_hint).vertices
}

/// Orchestrates acquisition and reconstruction over a whole document.
pub struct DocumentParser {
    config: ParseConfig,
    ocr: Option<Arc<dyn OcrBridge>>,
    baseline: Option<Arc<dyn BaselineParser>>,
}

impl DocumentParser {
    pub fn new(config: ParseConfig) -> Self {
        Self {
            config,
            ocr: None,
            baseline: None,
        }
    }

    /// Attach an OCR bridge consulted when native text is insufficient.
    pub fn with_ocr(mut self, bridge: Arc<dyn OcrBridge>) -> Self {
        self.ocr = Some(bridge);
        self
    }

    /// Attach a baseline parser tried ahead of the built-in extractors.
    pub fn with_baseline(mut self, baseline: Arc<dyn BaselineParser>) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Process every page of a document, sequentially, and reconstruct the
    /// single best ring.
    ///
    /// Page by page (the default), the first page whose text yields a valid
    /// ring wins and later candidate rings are ignored. With
    /// `concat_pages`, all acquired text is joined and parsed once.
    pub async fn parse_document(&self, source: &dyn PageSource) -> Result<DocumentResult> {
        let mut acquired: Vec<RawPageText> = Vec::with_capacity(source.page_count());
        let mut pages: Vec<PageProvenance> = Vec::with_capacity(source.page_count());

        for page in 0..source.page_count() {
            let raw = acquire_page_text(source, page, self.ocr.as_deref(), &self.config).await?;
            pages.push(PageProvenance {
                page: raw.page,
                method: raw.method,
            });
            acquired.push(raw);
        }

        let hint = self.config.projection.as_deref();
        let baseline = self.baseline.as_deref();

        let reconstruction = if self.config.concat_pages {
            let joined = acquired
                .iter()
                .map(|raw| raw.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");
            reconstruct_ring(&joined, baseline, hint)
        } else {
            self.best_page_ring(&acquired, baseline, hint)
        };

        Ok(DocumentResult {
            vertices: reconstruction.vertices,
            projection: reconstruction.projection,
            pages,
        })
    }

    fn best_page_ring(
        &self,
        acquired: &[RawPageText],
        baseline: Option<&dyn BaselineParser>,
        hint: Option<&str>,
    ) -> Reconstruction {
        let mut best = Reconstruction {
            vertices: Vec::new(),
            projection: None,
        };

        for raw in acquired {
            let candidate = reconstruct_ring(&raw.text, baseline, hint);
            if candidate.has_valid_ring() {
                tracing::debug!(
                    page = raw.page,
                    vertices = candidate.vertices.len(),
                    "ring reconstructed"
                );
                return candidate;
            }
            if candidate.vertices.len() > best.vertices.len() {
                best = candidate;
            }
        }
        best
    }
}
