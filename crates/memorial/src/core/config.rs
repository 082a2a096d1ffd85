//! Configuration loading and management.
//!
//! [`ParseConfig`] can be created programmatically or loaded from TOML or
//! JSON files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MemorialError, Result};

/// Main pipeline configuration.
///
/// # Example
///
/// ```rust
/// use memorial::ParseConfig;
///
/// let config = ParseConfig {
///     projection: Some("SIRGAS2000_22S".to_string()),
///     ..ParseConfig::default()
/// };
/// assert_eq!(config.min_text_len, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Registry key of the target CRS (None = resolve from the data).
    #[serde(default)]
    pub projection: Option<String>,

    /// Prefer OCR text even when the native text passes the sufficiency test.
    #[serde(default)]
    pub force_ocr: bool,

    /// OCR options (None = use bridge defaults).
    #[serde(default)]
    pub ocr: Option<OcrConfig>,

    /// DPI used when rendering a page for OCR.
    #[serde(default = "default_render_dpi")]
    pub render_dpi: i32,

    /// Minimum stripped length a candidate text must exceed to count as
    /// sufficient.
    #[serde(default = "default_min_text_len")]
    pub min_text_len: usize,

    /// Parse the concatenated document text instead of page by page.
    #[serde(default)]
    pub concat_pages: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            projection: None,
            force_ocr: false,
            ocr: None,
            render_dpi: default_render_dpi(),
            min_text_len: default_min_text_len(),
            concat_pages: false,
        }
    }
}

/// OCR bridge options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// ISO 639-2 language code handed to the bridge.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

fn default_render_dpi() -> i32 {
    300
}

fn default_min_text_len() -> usize {
    30
}

fn default_language() -> String {
    "por".to_string()
}

impl ParseConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| MemorialError::validation_with_source("invalid TOML configuration", e))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| MemorialError::validation_with_source("invalid JSON configuration", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParseConfig::default();
        assert_eq!(config.render_dpi, 300);
        assert_eq!(config.min_text_len, 30);
        assert!(!config.force_ocr);
        assert!(!config.concat_pages);
        assert!(config.projection.is_none());
        assert!(config.ocr.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ParseConfig = toml::from_str("projection = \"SAD69_22S\"").unwrap();
        assert_eq!(config.projection.as_deref(), Some("SAD69_22S"));
        assert_eq!(config.render_dpi, 300);
    }

    #[test]
    fn test_ocr_section() {
        let config: ParseConfig = toml::from_str("force_ocr = true\n[ocr]\nlanguage = \"eng\"").unwrap();
        assert!(config.force_ocr);
        assert_eq!(config.ocr.unwrap().language, "eng");
    }

    #[test]
    fn test_default_ocr_language_is_portuguese() {
        assert_eq!(OcrConfig::default().language, "por");
    }

    #[test]
    fn test_json_round_trip() {
        let config = ParseConfig {
            projection: Some("SIRGAS2000_23S".to_string()),
            concat_pages: true,
            ..ParseConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ParseConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.projection.as_deref(), Some("SIRGAS2000_23S"));
        assert!(back.concat_pages);
    }
}
