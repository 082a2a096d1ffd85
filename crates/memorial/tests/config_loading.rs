//! Configuration file loading tests.

use std::io::Write;

use memorial::ParseConfig;
use tempfile::NamedTempFile;

#[test]
fn toml_config_loads_and_fills_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "projection = \"SIRGAS2000_23S\"\nforce_ocr = true\n\n[ocr]\nlanguage = \"por\""
    )
    .unwrap();

    let config = ParseConfig::from_toml_file(file.path()).unwrap();
    assert_eq!(config.projection.as_deref(), Some("SIRGAS2000_23S"));
    assert!(config.force_ocr);
    assert_eq!(config.ocr.unwrap().language, "por");
    assert_eq!(config.render_dpi, 300);
    assert_eq!(config.min_text_len, 30);
}

#[test]
fn json_config_loads() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"concat_pages\": true, \"render_dpi\": 150}}").unwrap();

    let config = ParseConfig::from_json_file(file.path()).unwrap();
    assert!(config.concat_pages);
    assert_eq!(config.render_dpi, 150);
}

#[test]
fn invalid_toml_is_a_validation_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "projection = [not valid").unwrap();

    let err = ParseConfig::from_toml_file(file.path()).unwrap_err();
    assert!(matches!(err, memorial::MemorialError::Validation { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ParseConfig::from_toml_file("/nonexistent/memorial.toml").unwrap_err();
    assert!(matches!(err, memorial::MemorialError::Io(_)));
}
