//! Coordinate-pair extractors.
//!
//! Each extractor is a pure function from text to coordinate pairs or
//! traverse segments. They run independently; the geometry reconstructor
//! invokes them in a fixed priority order and takes the first strategy that
//! produces enough material, so results are never merged across extractors.
//!
//! An externally supplied parser can be slotted in ahead of the built-in
//! strategies by implementing [`BaselineParser`]; composition is explicit
//! (a prioritized call sequence), with no runtime function replacement.

pub mod latlon;
pub mod projected;
pub mod traverse;

pub use latlon::extract_geo_pairs;
pub use projected::{extract_en_pairs, extract_xy_pairs, find_loose_en_pair};
pub use traverse::extract_traverse_segments;

use crate::types::ProjectedPair;

/// A structured easting/northing parser supplied by the caller.
///
/// When present it is consulted before every built-in strategy, both as a
/// ring source and as a traverse seed source.
pub trait BaselineParser: Send + Sync {
    /// Parse projected pairs out of raw document text. Implementations
    /// should return an empty vector rather than failing.
    fn parse_pairs(&self, text: &str) -> Vec<ProjectedPair>;
}
