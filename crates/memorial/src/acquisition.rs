//! Per-page text acquisition.
//!
//! Chooses between the page's machine-readable text and OCR output. Native
//! text wins when it passes the sufficiency test; otherwise OCR is tried and
//! re-tested; when neither passes, the longer candidate is kept and tagged as
//! a fallback so downstream consumers know the text never looked like
//! coordinate material.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::config::ParseConfig;
use crate::error::Result;
use crate::ocr::OcrBridge;
use crate::pdf::PageSource;
use crate::types::{RawPageText, TextMethod};

// Coordinate-shaped tokens: an E/X-like label followed by a number, and an
// N/Y-like label followed by a number. Digit-count minimums are enforced in
// code because separators inflate the raw token length.
static EASTING_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b[ex]\s*[.:=]?\s*([0-9][0-9.,]*)").unwrap());
static NORTHING_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b[ny]\s*[.:=]?\s*([0-9][0-9.,]*)").unwrap());

const MIN_EASTING_DIGITS: usize = 4;
const MIN_NORTHING_DIGITS: usize = 5;

fn has_token_with_digits(regex: &Regex, text: &str, min_digits: usize) -> bool {
    regex.captures_iter(text).any(|cap| {
        cap.get(1)
            .map(|m| m.as_str().chars().filter(char::is_ascii_digit).count() >= min_digits)
            .unwrap_or(false)
    })
}

/// Whether the text carries both an easting-shaped and a northing-shaped
/// labeled token.
pub fn has_coordinate_shape(text: &str) -> bool {
    has_token_with_digits(&EASTING_SHAPE, text, MIN_EASTING_DIGITS)
        && has_token_with_digits(&NORTHING_SHAPE, text, MIN_NORTHING_DIGITS)
}

/// The sufficiency predicate applied to every candidate text.
pub fn is_sufficient(text: &str, min_len: usize) -> bool {
    text.trim().len() > min_len && has_coordinate_shape(text)
}

async fn native_candidate(source: &dyn PageSource, page: usize) -> String {
    match source.page_text(page).await {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(page, "native text extraction failed: {err}");
            String::new()
        }
    }
}

async fn ocr_candidate(
    source: &dyn PageSource,
    page: usize,
    bridge: &dyn OcrBridge,
    config: &ParseConfig,
) -> String {
    // Page-addressed bridges skip rendering entirely.
    match bridge.recognize_page(page).await {
        Ok(Some(text)) => return text,
        Ok(None) => {}
        Err(err) => {
            tracing::debug!(page, bridge = bridge.name(), "page-addressed OCR failed: {err}");
            return String::new();
        }
    }

    let png = match source.render_page(page, config.render_dpi).await {
        Ok(png) => png,
        Err(err) => {
            tracing::debug!(page, "page render failed: {err}");
            return String::new();
        }
    };

    let ocr_config = config.ocr.clone().unwrap_or_default();
    match bridge.recognize_png(&BASE64.encode(&png), &ocr_config).await {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(page, bridge = bridge.name(), "OCR failed: {err}");
            String::new()
        }
    }
}

/// Acquire the text for one page, choosing the acquisition method.
///
/// The decision log line is informational only; control flow depends solely
/// on the sufficiency predicate and candidate lengths.
pub async fn acquire_page_text(
    source: &dyn PageSource,
    page: usize,
    ocr: Option<&dyn OcrBridge>,
    config: &ParseConfig,
) -> Result<RawPageText> {
    let native = native_candidate(source, page).await;

    if !config.force_ocr && is_sufficient(&native, config.min_text_len) {
        tracing::info!(page, method = TextMethod::Selectable.as_str(), "page text acquired");
        return Ok(RawPageText::new(page, native, TextMethod::Selectable));
    }

    let ocr_text = match ocr {
        Some(bridge) => ocr_candidate(source, page, bridge, config).await,
        None => String::new(),
    };

    if is_sufficient(&ocr_text, config.min_text_len) {
        tracing::info!(page, method = TextMethod::Ocr.as_str(), "page text acquired");
        return Ok(RawPageText::new(page, ocr_text, TextMethod::Ocr));
    }

    // Neither candidate passed; keep whichever is longer.
    let (text, method) = if ocr_text.len() > native.len() {
        (ocr_text, TextMethod::OcrFallback)
    } else {
        (native, TextMethod::SelectableFallback)
    };
    tracing::info!(page, method = method.as_str(), "page text acquired");
    Ok(RawPageText::new(page, text, method))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FakeSource {
        texts: HashMap<usize, String>,
        render_fails: bool,
    }

    impl FakeSource {
        fn with_text(page: usize, text: &str) -> Self {
            let mut texts = HashMap::new();
            texts.insert(page, text.to_string());
            Self {
                texts,
                render_fails: false,
            }
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        fn page_count(&self) -> usize {
            self.texts.len()
        }

        async fn page_text(&self, page: usize) -> Result<String> {
            Ok(self.texts.get(&page).cloned().unwrap_or_default())
        }

        async fn render_page(&self, _page: usize, _dpi: i32) -> Result<Vec<u8>> {
            if self.render_fails {
                Err(crate::MemorialError::parsing("render failed"))
            } else {
                Ok(vec![0u8; 16])
            }
        }
    }

    struct FixedOcr(String);

    #[async_trait]
    impl OcrBridge for FixedOcr {
        async fn recognize_png(&self, _png_base64: &str, _config: &crate::OcrConfig) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    const GOOD_TEXT: &str = "Vértice V001 de coordenadas E=693718,072 m e N=7186725,466 m";

    #[test]
    fn test_sufficiency_requires_length_and_shape() {
        assert!(is_sufficient(GOOD_TEXT, 30));
        assert!(!is_sufficient("E=693718 N=7186725", 30)); // too short
        assert!(!is_sufficient(
            "texto comprido o bastante mas sem coordenadas no corpo",
            30
        ));
    }

    #[test]
    fn test_shape_needs_both_tokens() {
        assert!(has_coordinate_shape("E=693718,072 N=7186725,466"));
        assert!(has_coordinate_shape("X: 4321,0 Y: 54321,0"));
        assert!(!has_coordinate_shape("E=693718,072 sem northing"));
        assert!(!has_coordinate_shape("N=7186725,466 sem easting"));
        // Easting-like token with too few digits.
        assert!(!has_coordinate_shape("E=123 N=7186725,466"));
    }

    #[tokio::test]
    async fn test_native_text_selected_when_sufficient() {
        let source = FakeSource::with_text(0, GOOD_TEXT);
        let config = ParseConfig::default();
        let raw = acquire_page_text(&source, 0, None, &config).await.unwrap();
        assert_eq!(raw.method, TextMethod::Selectable);
        assert_eq!(raw.text, GOOD_TEXT);
    }

    #[tokio::test]
    async fn test_ocr_selected_when_native_insufficient() {
        let source = FakeSource::with_text(0, "página escaneada");
        let bridge = FixedOcr(GOOD_TEXT.to_string());
        let config = ParseConfig::default();
        let raw = acquire_page_text(&source, 0, Some(&bridge), &config).await.unwrap();
        assert_eq!(raw.method, TextMethod::Ocr);
        assert_eq!(raw.text, GOOD_TEXT);
    }

    #[tokio::test]
    async fn test_longer_candidate_wins_fallback() {
        let source = FakeSource::with_text(0, "curto");
        let bridge = FixedOcr("texto ocr mais longo porém sem coordenadas".to_string());
        let config = ParseConfig::default();
        let raw = acquire_page_text(&source, 0, Some(&bridge), &config).await.unwrap();
        assert_eq!(raw.method, TextMethod::OcrFallback);

        let source = FakeSource::with_text(0, "texto nativo mais longo porém sem coordenadas");
        let bridge = FixedOcr("curto".to_string());
        let raw = acquire_page_text(&source, 0, Some(&bridge), &config).await.unwrap();
        assert_eq!(raw.method, TextMethod::SelectableFallback);
    }

    #[tokio::test]
    async fn test_no_bridge_falls_back_to_native() {
        let source = FakeSource::with_text(0, "página sem texto útil");
        let config = ParseConfig::default();
        let raw = acquire_page_text(&source, 0, None, &config).await.unwrap();
        assert_eq!(raw.method, TextMethod::SelectableFallback);
        assert_eq!(raw.text, "página sem texto útil");
    }

    #[tokio::test]
    async fn test_render_failure_degrades_to_fallback() {
        let mut source = FakeSource::with_text(0, "texto nativo insuficiente");
        source.render_fails = true;
        let bridge = FixedOcr(GOOD_TEXT.to_string());
        let config = ParseConfig::default();
        let raw = acquire_page_text(&source, 0, Some(&bridge), &config).await.unwrap();
        assert_eq!(raw.method, TextMethod::SelectableFallback);
    }

    #[tokio::test]
    async fn test_force_ocr_skips_native_preference() {
        let source = FakeSource::with_text(0, GOOD_TEXT);
        let bridge = FixedOcr(format!("{GOOD_TEXT} (ocr)"));
        let config = ParseConfig {
            force_ocr: true,
            ..ParseConfig::default()
        };
        let raw = acquire_page_text(&source, 0, Some(&bridge), &config).await.unwrap();
        assert_eq!(raw.method, TextMethod::Ocr);
    }

    struct PageAddressedOcr;

    #[async_trait]
    impl OcrBridge for PageAddressedOcr {
        async fn recognize_png(&self, _png_base64: &str, _config: &crate::OcrConfig) -> Result<String> {
            panic!("render path must not run when the page path answers");
        }

        async fn recognize_page(&self, _page: usize) -> Result<Option<String>> {
            Ok(Some(GOOD_TEXT.to_string()))
        }
    }

    #[tokio::test]
    async fn test_page_addressed_bridge_skips_rendering() {
        let mut source = FakeSource::with_text(0, "insuficiente");
        source.render_fails = true; // would fail if the render path ran
        let config = ParseConfig::default();
        let raw = acquire_page_text(&source, 0, Some(&PageAddressedOcr), &config)
            .await
            .unwrap();
        assert_eq!(raw.method, TextMethod::Ocr);
    }
}
