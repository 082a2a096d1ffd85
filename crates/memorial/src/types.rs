//! Data model for the coordinate extraction pipeline.
//!
//! Every type here is serde-serializable so results can be shipped to JSON
//! consumers unchanged. Ordering matters throughout: vertices form an ordered
//! boundary walk, never a set.

use serde::{Deserialize, Serialize};

/// Minimum number of vertices for a ring to count as a successful extraction.
///
/// The pipeline itself never pads a short ring; callers must treat anything
/// below this threshold as a failed extraction.
pub const MIN_RING_VERTICES: usize = 3;

/// How a page's text was obtained.
///
/// The two `*Fallback` variants mark text that failed the sufficiency test on
/// both acquisition paths and was kept only because it was the longer candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMethod {
    Selectable,
    Ocr,
    OcrFallback,
    SelectableFallback,
}

impl TextMethod {
    /// The snake_case tag used in log lines and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextMethod::Selectable => "selectable",
            TextMethod::Ocr => "ocr",
            TextMethod::OcrFallback => "ocr_fallback",
            TextMethod::SelectableFallback => "selectable_fallback",
        }
    }
}

/// Text acquired for one page, with its provenance.
///
/// Constructed only by the acquisition module and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPageText {
    /// Zero-based page index within the source document.
    pub page: usize,
    pub text: String,
    pub method: TextMethod,
}

impl RawPageText {
    pub fn new(page: usize, text: String, method: TextMethod) -> Self {
        Self { page, text, method }
    }
}

/// Which extraction strategy produced a coordinate pair.
///
/// Diagnostic only: the pipeline never branches on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairOrigin {
    BaselineParser,
    EnText,
    XyText,
    YxText,
    LatLonText,
    Traverse,
}

/// A geographic coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPair {
    pub latitude: f64,
    pub longitude: f64,
    pub origin: PairOrigin,
}

impl GeoPair {
    pub fn new(latitude: f64, longitude: f64, origin: PairOrigin) -> Self {
        Self {
            latitude,
            longitude,
            origin,
        }
    }

    /// Both components finite and inside the valid geographic range.
    pub fn is_plausible(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }
}

/// A projected coordinate pair (easting/northing in meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPair {
    pub easting: f64,
    pub northing: f64,
    pub origin: PairOrigin,
}

impl ProjectedPair {
    pub fn new(easting: f64, northing: f64, origin: PairOrigin) -> Self {
        Self {
            easting,
            northing,
            origin,
        }
    }
}

/// One leg of a traverse: a bearing and a distance walked along it.
///
/// Azimuth is measured clockwise from true north and normalized into
/// [0, 360) at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraverseSegment {
    pub azimuth_deg: f64,
    pub distance_m: f64,
}

impl TraverseSegment {
    /// Build a segment, normalizing the azimuth. Returns `None` for
    /// non-finite inputs or a non-positive distance; invalid legs are
    /// discarded, never zero-filled.
    pub fn new(azimuth_deg: f64, distance_m: f64) -> Option<Self> {
        if !azimuth_deg.is_finite() || !distance_m.is_finite() || distance_m <= 0.0 {
            return None;
        }
        Some(Self {
            azimuth_deg: azimuth_deg.rem_euclid(360.0),
            distance_m,
        })
    }

    pub fn is_usable(&self) -> bool {
        self.azimuth_deg.is_finite() && self.distance_m.is_finite() && self.distance_m > 0.0
    }
}

/// One boundary vertex in projected coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// `V` + 1-based index zero-padded to three digits (`V001`, `V002`, ...).
    pub id: String,
    pub easting: f64,
    pub northing: f64,
    /// 1-based position along the boundary walk.
    pub order: usize,
}

impl Vertex {
    /// Build the vertex at zero-based position `index` of the walk.
    pub fn numbered(index: usize, easting: f64, northing: f64) -> Self {
        Self {
            id: format!("V{:03}", index + 1),
            easting,
            northing,
            order: index + 1,
        }
    }
}

/// Whether the first and last vertices coincide.
///
/// Presentation-time concern only: the pipeline neither requires nor
/// produces closed rings.
pub fn ring_is_closed(vertices: &[Vertex]) -> bool {
    match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) if vertices.len() > 1 => {
            first.easting == last.easting && first.northing == last.northing
        }
        _ => false,
    }
}

/// Per-page acquisition provenance kept on the document result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageProvenance {
    pub page: usize,
    pub method: TextMethod,
}

/// Everything extracted from one source document.
///
/// Holds at most one ring: multi-ring input collapses into the single best
/// ring found. Session-scoped; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    pub vertices: Vec<Vertex>,
    /// Registry key of the CRS the vertices are expressed in, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<String>,
    pub pages: Vec<PageProvenance>,
}

impl DocumentResult {
    /// A ring below [`MIN_RING_VERTICES`] is a failed extraction.
    pub fn has_valid_ring(&self) -> bool {
        self.vertices.len() >= MIN_RING_VERTICES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_method_tags() {
        assert_eq!(TextMethod::Selectable.as_str(), "selectable");
        assert_eq!(TextMethod::Ocr.as_str(), "ocr");
        assert_eq!(TextMethod::OcrFallback.as_str(), "ocr_fallback");
        assert_eq!(TextMethod::SelectableFallback.as_str(), "selectable_fallback");
    }

    #[test]
    fn test_vertex_id_zero_padding() {
        assert_eq!(Vertex::numbered(0, 1.0, 2.0).id, "V001");
        assert_eq!(Vertex::numbered(9, 1.0, 2.0).id, "V010");
        assert_eq!(Vertex::numbered(99, 1.0, 2.0).id, "V100");
    }

    #[test]
    fn test_vertex_order_is_one_based() {
        assert_eq!(Vertex::numbered(0, 0.0, 0.0).order, 1);
        assert_eq!(Vertex::numbered(4, 0.0, 0.0).order, 5);
    }

    #[test]
    fn test_segment_rejects_invalid_distance() {
        assert!(TraverseSegment::new(45.0, 0.0).is_none());
        assert!(TraverseSegment::new(45.0, -10.0).is_none());
        assert!(TraverseSegment::new(45.0, f64::NAN).is_none());
        assert!(TraverseSegment::new(f64::INFINITY, 10.0).is_none());
    }

    #[test]
    fn test_segment_normalizes_azimuth() {
        let seg = TraverseSegment::new(370.0, 5.0).unwrap();
        assert!((seg.azimuth_deg - 10.0).abs() < 1e-9);
        let seg = TraverseSegment::new(-90.0, 5.0).unwrap();
        assert!((seg.azimuth_deg - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_geo_pair_plausibility() {
        assert!(GeoPair::new(-24.07, -50.72, PairOrigin::LatLonText).is_plausible());
        assert!(!GeoPair::new(-95.0, -50.72, PairOrigin::LatLonText).is_plausible());
        assert!(!GeoPair::new(-24.07, 181.0, PairOrigin::LatLonText).is_plausible());
        assert!(!GeoPair::new(f64::NAN, 0.0, PairOrigin::LatLonText).is_plausible());
    }

    #[test]
    fn test_ring_closure_helper() {
        let open = vec![
            Vertex::numbered(0, 0.0, 0.0),
            Vertex::numbered(1, 1.0, 0.0),
            Vertex::numbered(2, 1.0, 1.0),
        ];
        assert!(!ring_is_closed(&open));

        let mut closed = open.clone();
        closed.push(Vertex::numbered(3, 0.0, 0.0));
        assert!(ring_is_closed(&closed));

        assert!(!ring_is_closed(&[Vertex::numbered(0, 0.0, 0.0)]));
        assert!(!ring_is_closed(&[]));
    }

    #[test]
    fn test_document_result_validity_threshold() {
        let mut result = DocumentResult {
            vertices: vec![Vertex::numbered(0, 0.0, 0.0), Vertex::numbered(1, 1.0, 1.0)],
            projection: None,
            pages: vec![],
        };
        assert!(!result.has_valid_ring());
        result.vertices.push(Vertex::numbered(2, 2.0, 0.0));
        assert!(result.has_valid_ring());
    }

    #[test]
    fn test_serde_round_trip() {
        let result = DocumentResult {
            vertices: vec![Vertex::numbered(0, 693718.072, 7186725.466)],
            projection: Some("SIRGAS2000_22S".to_string()),
            pages: vec![PageProvenance {
                page: 0,
                method: TextMethod::Selectable,
            }],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"selectable\""));
        assert!(json.contains("V001"));
        let back: DocumentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.vertices.len(), 1);
        assert_eq!(back.projection.as_deref(), Some("SIRGAS2000_22S"));
    }
}
