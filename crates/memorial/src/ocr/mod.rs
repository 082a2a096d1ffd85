//! OCR bridge contract.
//!
//! OCR itself lives outside this crate. The pipeline talks to whatever
//! engine the caller wires in through [`OcrBridge`]; when no bridge is
//! supplied, OCR is simply skipped and acquisition falls back to the native
//! text candidate.

use async_trait::async_trait;

use crate::core::config::OcrConfig;
use crate::error::Result;

/// An external OCR engine.
///
/// Implementations must be thread-safe (`Send + Sync`). Two entry points
/// mirror the two kinds of bridges seen in the wild: engines that accept a
/// rendered image, and engines that can address a document page directly.
#[async_trait]
pub trait OcrBridge: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str {
        "ocr-bridge"
    }

    /// Recognize text from a base64-encoded PNG image.
    async fn recognize_png(&self, png_base64: &str, config: &OcrConfig) -> Result<String>;

    /// Recognize text for a document page directly, bypassing rendering.
    ///
    /// Returns `Ok(None)` when the bridge has no page-addressed path, in
    /// which case the caller renders the page and uses [`recognize_png`].
    ///
    /// [`recognize_png`]: OcrBridge::recognize_png
    async fn recognize_page(&self, _page: usize) -> Result<Option<String>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoBridge;

    #[async_trait]
    impl OcrBridge for EchoBridge {
        async fn recognize_png(&self, png_base64: &str, config: &OcrConfig) -> Result<String> {
            Ok(format!("{}:{}", config.language, png_base64.len()))
        }
    }

    #[test]
    fn test_default_page_path_is_absent() {
        let bridge = EchoBridge;
        let result = tokio_test::block_on(bridge.recognize_page(0)).unwrap();
        assert!(result.is_none());
        assert_eq!(bridge.name(), "ocr-bridge");
    }

    #[test]
    fn test_png_path_receives_config() {
        let bridge = EchoBridge;
        let config = OcrConfig::default();
        let text = tokio_test::block_on(bridge.recognize_png("abcd", &config)).unwrap();
        assert_eq!(text, "por:4");
    }
}
