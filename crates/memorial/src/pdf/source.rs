//! pdfium-render adapter for [`PageSource`].
//!
//! Documents are loaded from bytes per call. pdfium keeps page resources
//! alive only for the duration of one call, which matches the pipeline's
//! one-page-at-a-time processing model.

use async_trait::async_trait;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use pdfium_render::prelude::*;
use std::io::Cursor;

use super::PageSource;
use super::error::PdfError;

const PDF_POINTS_PER_INCH: f32 = 72.0;
const MIN_DPI: i32 = 72;
const MAX_DPI: i32 = 600;

/// A PDF document backed by pdfium.
pub struct PdfiumSource {
    pdfium: Pdfium,
    bytes: Vec<u8>,
    page_count: usize,
}

impl PdfiumSource {
    /// Bind pdfium and load the document, verifying it parses.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, PdfError> {
        let binding = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| PdfError::MissingLibrary(e.to_string()))?;
        let pdfium = Pdfium::new(binding);

        let page_count = {
            let document = pdfium
                .load_pdf_from_byte_slice(&bytes, None)
                .map_err(|e| PdfError::InvalidPdf(e.to_string()))?;
            document.pages().len() as usize
        };

        Ok(Self {
            pdfium,
            bytes,
            page_count,
        })
    }

    fn load(&self) -> Result<PdfDocument<'_>, PdfError> {
        self.pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .map_err(|e| PdfError::InvalidPdf(e.to_string()))
    }
}

#[async_trait]
impl PageSource for PdfiumSource {
    fn page_count(&self) -> usize {
        self.page_count
    }

    async fn page_text(&self, page: usize) -> crate::Result<String> {
        let document = self.load()?;
        let pdf_page = document
            .pages()
            .get(page as u16)
            .map_err(|_| PdfError::PageNotFound(page))?;

        let text = pdf_page
            .text()
            .map_err(|e| PdfError::TextExtractionFailed(e.to_string()))?;
        Ok(text.all())
    }

    async fn render_page(&self, page: usize, dpi: i32) -> crate::Result<Vec<u8>> {
        let document = self.load()?;
        let pdf_page = document
            .pages()
            .get(page as u16)
            .map_err(|_| PdfError::PageNotFound(page))?;

        let scale = dpi.clamp(MIN_DPI, MAX_DPI) as f32 / PDF_POINTS_PER_INCH;
        let width = ((pdf_page.width().value * scale) as i32).max(1);
        let height = ((pdf_page.height().value * scale) as i32).max(1);

        let config = PdfRenderConfig::new()
            .set_target_width(width)
            .set_target_height(height)
            .rotate_if_landscape(PdfPageRenderRotation::None, false);

        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|e| PdfError::RenderingFailed(e.to_string()))?;
        let rgb = bitmap.as_image().into_rgb8();
        let (image_width, image_height) = rgb.dimensions();

        let mut png = Cursor::new(Vec::new());
        PngEncoder::new(&mut png)
            .write_image(&rgb, image_width, image_height, image::ColorType::Rgb8.into())
            .map_err(|e| PdfError::RenderingFailed(e.to_string()))?;

        Ok(png.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bytes_rejected() {
        let result = PdfiumSource::from_bytes(b"not a pdf".to_vec());
        if let Err(err) = result {
            assert!(matches!(err, PdfError::InvalidPdf(_) | PdfError::MissingLibrary(_)));
        }
    }

    #[test]
    fn test_empty_bytes_rejected() {
        let result = PdfiumSource::from_bytes(Vec::new());
        assert!(result.is_err());
    }
}
