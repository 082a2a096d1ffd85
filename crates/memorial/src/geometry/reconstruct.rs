//! The geometry reconstructor.
//!
//! Strategies run in a fixed order and the first one that yields a ring of at
//! least [`MIN_RING_VERTICES`] wins:
//!
//! 1. the externally supplied baseline parser, when present;
//! 2. labeled E/N pairs, then X/Y pairs, straight from the text;
//! 3. geographic pairs converted through the projection resolver;
//! 4. an azimuth/distance traverse walked from a seed point.
//!
//! When nothing reaches three vertices the longest partial list is returned
//! as-is; the reconstructor never synthesizes a closing or padding vertex.

use crate::extractors::{
    BaselineParser, extract_en_pairs, extract_geo_pairs, extract_traverse_segments, extract_xy_pairs,
    find_loose_en_pair,
};
use crate::geometry::plausible_projected;
use crate::projection;
use crate::types::{GeoPair, MIN_RING_VERTICES, ProjectedPair, TraverseSegment, Vertex};

/// Minimum number of traverse segments worth walking: fewer than two legs
/// cannot reach three vertices even with a seed.
const MIN_TRAVERSE_SEGMENTS: usize = 2;

/// Output of one reconstruction attempt.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub vertices: Vec<Vertex>,
    /// Registry key of the CRS the vertices are expressed in, when known.
    pub projection: Option<String>,
}

impl Reconstruction {
    pub fn has_valid_ring(&self) -> bool {
        self.vertices.len() >= MIN_RING_VERTICES
    }
}

fn vertices_from_pairs(pairs: &[ProjectedPair]) -> Vec<Vertex> {
    pairs
        .iter()
        .filter(|pair| plausible_projected(pair.easting, pair.northing))
        .enumerate()
        .map(|(index, pair)| Vertex::numbered(index, pair.easting, pair.northing))
        .collect()
}

/// Walk a traverse from a projected seed point.
///
/// The seed becomes the first vertex; every usable segment appends one more
/// at `ΔE = d·sin(az)`, `ΔN = d·cos(az)` from the running position (azimuth
/// clockwise from north, the surveying convention). Unusable segments are
/// skipped without advancing the position or emitting a vertex.
pub fn walk_traverse(seed: (f64, f64), segments: &[TraverseSegment]) -> Vec<Vertex> {
    let mut vertices = vec![Vertex::numbered(0, seed.0, seed.1)];
    let (mut easting, mut northing) = seed;

    for segment in segments {
        if !segment.is_usable() {
            continue;
        }
        let azimuth = segment.azimuth_deg.to_radians();
        easting += segment.distance_m * azimuth.sin();
        northing += segment.distance_m * azimuth.cos();
        vertices.push(Vertex::numbered(vertices.len(), easting, northing));
    }
    vertices
}

/// A traverse ring in local relative coordinates, for the pure azimuth-chain
/// case where no seed point is known yet.
///
/// The walk starts at `(0, 0)`; once a seed turns up the whole ring can be
/// re-anchored to it by translation.
#[derive(Debug, Clone)]
pub struct RelativePolygon {
    vertices: Vec<Vertex>,
}

impl RelativePolygon {
    pub fn from_segments(segments: &[TraverseSegment]) -> Self {
        Self {
            vertices: walk_traverse((0.0, 0.0), segments),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Translate every vertex by the seed's offset from the first relative
    /// vertex, so the ring starts at the seed.
    pub fn anchor_to(&self, seed: (f64, f64)) -> Vec<Vertex> {
        let Some(first) = self.vertices.first() else {
            return Vec::new();
        };
        let delta_e = seed.0 - first.easting;
        let delta_n = seed.1 - first.northing;
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, v)| Vertex::numbered(index, v.easting + delta_e, v.northing + delta_n))
            .collect()
    }
}

fn convert_geo_pairs(pairs: &[GeoPair], hint: Option<&str>) -> (Vec<Vertex>, Option<String>) {
    if pairs.is_empty() {
        return (Vec::new(), None);
    }
    let mean_longitude = pairs.iter().map(|p| p.longitude).sum::<f64>() / pairs.len() as f64;
    let def = match projection::resolve(hint, mean_longitude) {
        Ok(def) => def,
        Err(err) => {
            tracing::debug!("geographic conversion unavailable: {err}");
            return (Vec::new(), None);
        }
    };

    let mut vertices = Vec::new();
    for pair in pairs {
        if let Some((easting, northing)) = projection::to_projected(def, pair.latitude, pair.longitude) {
            if plausible_projected(easting, northing) {
                vertices.push(Vertex::numbered(vertices.len(), easting, northing));
            }
        }
    }
    (vertices, Some(def.key.to_string()))
}

fn seed_point(
    baseline_pairs: &[ProjectedPair],
    text: &str,
    geo_pairs: &[GeoPair],
    hint: Option<&str>,
) -> Option<(f64, f64)> {
    if let Some(pair) = baseline_pairs
        .iter()
        .find(|p| plausible_projected(p.easting, p.northing))
    {
        return Some((pair.easting, pair.northing));
    }

    if let Some(pair) = find_loose_en_pair(text) {
        if plausible_projected(pair.easting, pair.northing) {
            return Some((pair.easting, pair.northing));
        }
    }

    let first = geo_pairs.first()?;
    let def = projection::resolve(hint, first.longitude).ok()?;
    projection::to_projected(def, first.latitude, first.longitude)
        .filter(|&(e, n)| plausible_projected(e, n))
}

/// Reconstruct the vertex ring for one body of text.
pub fn reconstruct_ring(
    text: &str,
    baseline: Option<&dyn BaselineParser>,
    hint: Option<&str>,
) -> Reconstruction {
    let hint_key = hint
        .and_then(projection::registry::find)
        .map(|def| def.key.to_string());

    let baseline_pairs = baseline.map(|p| p.parse_pairs(text)).unwrap_or_default();
    let mut partial: Vec<Vertex> = Vec::new();

    // 1. baseline parser
    let vertices = vertices_from_pairs(&baseline_pairs);
    if vertices.len() >= MIN_RING_VERTICES {
        return Reconstruction {
            vertices,
            projection: hint_key,
        };
    }
    keep_longest(&mut partial, vertices);

    // 2. labeled projected pairs
    for pairs in [extract_en_pairs(text), extract_xy_pairs(text)] {
        let vertices = vertices_from_pairs(&pairs);
        if vertices.len() >= MIN_RING_VERTICES {
            return Reconstruction {
                vertices,
                projection: hint_key,
            };
        }
        keep_longest(&mut partial, vertices);
    }

    // 3. geographic pairs through the resolver
    let geo_pairs = extract_geo_pairs(text);
    if geo_pairs.len() >= MIN_RING_VERTICES {
        let (vertices, projection) = convert_geo_pairs(&geo_pairs, hint);
        if vertices.len() >= MIN_RING_VERTICES {
            return Reconstruction { vertices, projection };
        }
        keep_longest(&mut partial, vertices);
    }

    // 4. traverse walk from a seed. The chunk and proximity passes usually
    // see the same legs, so exact duplicates are collapsed before walking.
    let segments = dedupe_segments(extract_traverse_segments(text));
    if segments.len() >= MIN_TRAVERSE_SEGMENTS {
        if let Some(seed) = seed_point(&baseline_pairs, text, &geo_pairs, hint) {
            let vertices = walk_traverse(seed, &segments);
            if vertices.len() >= MIN_RING_VERTICES {
                return Reconstruction {
                    vertices,
                    projection: hint_key,
                };
            }
            keep_longest(&mut partial, vertices);
        }
    }

    Reconstruction {
        vertices: partial,
        projection: hint_key,
    }
}

fn keep_longest(best: &mut Vec<Vertex>, candidate: Vec<Vertex>) {
    if candidate.len() > best.len() {
        *best = candidate;
    }
}

fn dedupe_segments(segments: Vec<TraverseSegment>) -> Vec<TraverseSegment> {
    let mut unique: Vec<TraverseSegment> = Vec::new();
    for segment in segments.into_iter().filter(TraverseSegment::is_usable) {
        if !unique.contains(&segment) {
            unique.push(segment);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PairOrigin;

    struct FixedBaseline(Vec<ProjectedPair>);

    impl BaselineParser for FixedBaseline {
        fn parse_pairs(&self, _text: &str) -> Vec<ProjectedPair> {
            self.0.clone()
        }
    }

    fn seg(azimuth: f64, distance: f64) -> TraverseSegment {
        TraverseSegment::new(azimuth, distance).unwrap()
    }

    #[test]
    fn test_walk_north_then_east() {
        let north = walk_traverse((0.0, 0.0), &[seg(0.0, 100.0)]);
        assert_eq!(north.len(), 2);
        assert!(north[1].easting.abs() < 1e-9);
        assert!((north[1].northing - 100.0).abs() < 1e-9);

        let east = walk_traverse((0.0, 0.0), &[seg(90.0, 100.0)]);
        assert!((east[1].easting - 100.0).abs() < 1e-9);
        assert!(east[1].northing.abs() < 1e-9);
    }

    #[test]
    fn test_walk_skips_unusable_segments_without_advancing() {
        let segments = [
            seg(0.0, 100.0),
            TraverseSegment {
                azimuth_deg: 90.0,
                distance_m: f64::NAN,
            },
            seg(90.0, 50.0),
        ];
        let vertices = walk_traverse((0.0, 0.0), &segments);
        assert_eq!(vertices.len(), 3);
        assert!((vertices[2].easting - 50.0).abs() < 1e-9);
        assert!((vertices[2].northing - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ring_from_labeled_en_text() {
        let text = "V1 E=100,00 N=200,00; V2 E=150,00 N=200,00; V3 E=150,00 N=250,00";
        let result = reconstruct_ring(text, None, None);
        assert!(result.has_valid_ring());
        assert_eq!(result.vertices.len(), 3);
        assert_eq!(result.vertices[0].id, "V001");
        assert_eq!(result.vertices[2].order, 3);
    }

    #[test]
    fn test_baseline_parser_takes_priority() {
        let baseline = FixedBaseline(vec![
            ProjectedPair::new(1.0, 2.0, PairOrigin::BaselineParser),
            ProjectedPair::new(3.0, 4.0, PairOrigin::BaselineParser),
            ProjectedPair::new(5.0, 6.0, PairOrigin::BaselineParser),
        ]);
        let text = "E=100,00 N=200,00; E=150,00 N=200,00; E=150,00 N=250,00";
        let result = reconstruct_ring(text, Some(&baseline), None);
        assert!((result.vertices[0].easting - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_traverse_with_seed_from_text() {
        let text = "Marco inicial E=100,00 N=200,00. \
                    Azimute 30°00'00\" E, distância 50 m; Azimute 150°00'00\" E, distância 50 m";
        let result = reconstruct_ring(text, None, None);
        assert!(result.has_valid_ring());
        assert_eq!(result.vertices.len(), 3);
        assert!((result.vertices[0].easting - 100.0).abs() < 1e-9);
        assert!((result.vertices[0].northing - 200.0).abs() < 1e-9);
        // az 30: ΔE = 25, ΔN = 43.30; az 150: ΔE = 25, ΔN = -43.30
        assert!((result.vertices[1].easting - 125.0).abs() < 1e-6);
        assert!((result.vertices[1].northing - 243.30127).abs() < 1e-4);
        assert!((result.vertices[2].easting - 150.0).abs() < 1e-6);
        assert!((result.vertices[2].northing - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_baseline_single_point_seeds_traverse() {
        let baseline = FixedBaseline(vec![ProjectedPair::new(500.0, 600.0, PairOrigin::BaselineParser)]);
        let text = "Azimute 0°00'00\", distância 10 m; Azimute 90°00'00\", distância 10 m";
        let result = reconstruct_ring(text, Some(&baseline), None);
        assert!(result.has_valid_ring());
        assert!((result.vertices[0].easting - 500.0).abs() < 1e-9);
        assert!((result.vertices[1].northing - 610.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_result_is_not_padded() {
        let text = "E=100,00 N=200,00 e nada mais";
        let result = reconstruct_ring(text, None, None);
        assert!(!result.has_valid_ring());
        assert_eq!(result.vertices.len(), 1);
    }

    #[test]
    fn test_empty_text_gives_empty_ring() {
        let result = reconstruct_ring("", None, None);
        assert!(result.vertices.is_empty());
        assert!(result.projection.is_none());
    }

    #[test]
    fn test_relative_polygon_anchoring() {
        let segments = [seg(30.0, 50.0), seg(150.0, 50.0)];
        let relative = RelativePolygon::from_segments(&segments);
        assert_eq!(relative.vertex_count(), 3);
        assert!(relative.vertices()[0].easting.abs() < 1e-9);

        let anchored = relative.anchor_to((100.0, 200.0));
        assert_eq!(anchored.len(), 3);
        assert!((anchored[0].easting - 100.0).abs() < 1e-9);
        assert!((anchored[0].northing - 200.0).abs() < 1e-9);
        assert!((anchored[2].easting - 150.0).abs() < 1e-6);
        assert!((anchored[2].northing - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_anchor_empty_polygon() {
        let relative = RelativePolygon {
            vertices: Vec::new(),
        };
        assert!(relative.anchor_to((1.0, 2.0)).is_empty());
    }

    #[test]
    fn test_hint_key_is_canonicalized() {
        let text = "E=100,00 N=200,00; E=150,00 N=200,00; E=150,00 N=250,00";
        let result = reconstruct_ring(text, None, Some("sirgas2000_22s"));
        assert_eq!(result.projection.as_deref(), Some("SIRGAS2000_22S"));
    }

    #[cfg(feature = "projection")]
    #[test]
    fn test_geographic_ring_resolves_zone() {
        let text = "vértice 24 04 28,579 S e 50 43 12,738 W; \
                    vértice 24 04 30,000 S e 50 43 14,000 W; \
                    vértice 24 04 32,500 S e 50 43 10,000 W";
        let result = reconstruct_ring(text, None, None);
        assert!(result.has_valid_ring());
        assert_eq!(result.projection.as_deref(), Some("SIRGAS2000_22S"));
        for vertex in &result.vertices {
            assert!((100_000.0..900_000.0).contains(&vertex.easting));
        }
    }
}
