//! memorial — georeferenced polygon extraction from cadastral survey memorials.
//!
//! Brazilian survey documents (memoriais descritivos) describe a parcel
//! boundary in prose: labeled UTM coordinates, latitude/longitude in half a
//! dozen layouts, or an azimuth-and-distance traverse. This crate turns that
//! text — machine-readable or OCR output, artifacts included — into an
//! ordered ring of projected vertices.
//!
//! # Quick Start
//!
//! ```rust
//! use memorial::parse_vertices;
//!
//! let text = "V1 E=693718,072 N=7186725,466; \
//!             V2 E=693768,072 N=7186725,466; \
//!             V3 E=693768,072 N=7186775,466";
//! let ring = parse_vertices(text, None);
//! assert_eq!(ring.len(), 3);
//! assert_eq!(ring[0].id, "V001");
//! ```
//!
//! # Architecture
//!
//! - **Acquisition** (`acquisition`): picks machine-readable or OCR text per
//!   page based on a sufficiency heuristic.
//! - **Extractors** (`extractors`): independent pattern recognizers for
//!   labeled E/N and X/Y pairs, latitude/longitude, and traverse legs.
//! - **Geometry** (`geometry`): reconstructs one vertex ring, trying the
//!   extraction strategies in a fixed fallback order.
//! - **Projection** (`projection`): a fixed CRS registry plus conversion via
//!   proj4rs (feature `projection`).
//! - **Collaborators** (`pdf`, `ocr`): PDF access and OCR stay behind traits;
//!   the `pdf` feature ships a pdfium-backed [`PageSource`].

#![deny(unsafe_code)]

pub mod acquisition;
pub mod compass;
pub mod core;
pub mod error;
pub mod extractors;
pub mod geometry;
pub mod numeric;
pub mod ocr;
pub mod output;
pub mod pdf;
pub mod projection;
pub mod types;

pub use error::{MemorialError, Result};
pub use types::*;

pub use core::config::{OcrConfig, ParseConfig};
pub use core::pipeline::{DocumentParser, parse_vertices, parse_vertices_with};
pub use extractors::BaselineParser;
pub use geometry::{Reconstruction, RelativePolygon};
pub use ocr::OcrBridge;
pub use pdf::PageSource;

#[cfg(feature = "pdf")]
pub use pdf::source::PdfiumSource;

/// Read a PDF file and run the full document pipeline over it.
#[cfg(all(feature = "tokio-runtime", feature = "pdf"))]
pub async fn parse_pdf_file<P: AsRef<std::path::Path>>(
    path: P,
    config: ParseConfig,
) -> Result<DocumentResult> {
    let bytes = tokio::fs::read(path).await?;
    let source = PdfiumSource::from_bytes(bytes)?;
    DocumentParser::new(config).parse_document(&source).await
}
