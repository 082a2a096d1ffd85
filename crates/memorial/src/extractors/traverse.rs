//! Azimuth + distance (traverse) extraction.
//!
//! Two complementary passes. Pass A segments the text into sentence-like
//! chunks and pairs an azimuth with a distance inside the same chunk — the
//! layout of a well-punctuated memorial. Pass B ignores punctuation entirely
//! and pairs every azimuth-shaped token with the nearest following
//! distance-shaped token inside a 120-character window, recovering documents
//! whose punctuation came out of OCR too mangled for chunking. Results are
//! concatenated; duplicated legs are harmless because reconstruction only
//! requires two usable segments.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::compass::{Hemisphere, dms_to_decimal, normalize_azimuth, quadrant_to_azimuth};
use crate::numeric::{NUMBER_PATTERN, parse_decimal};
use crate::types::TraverseSegment;

/// Window, in characters, for pairing an azimuth with a following distance
/// during the proximity pass.
const PROXIMITY_WINDOW: usize = 120;

// Sentence-like chunk boundaries: semicolons, sentence-final periods,
// newlines, and the Portuguese enumeration "..., e ...".
static CHUNK_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r";|\r?\n|\.\s|,\s+e\s").unwrap());

// Absolute azimuth as ddd°mm'ss", seconds optional.
static ABSOLUTE_AZIMUTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([0-9]{1,3})\s*[°º]\s*([0-9]{1,2})\s*['’′]\s*(?:([0-9]{1,2}(?:[.,][0-9]+)?)\s*["”″]?)?"#)
        .unwrap()
});

// Quadrant bearing: N/S, angle (degree glyphs optional), E/W with the
// Portuguese O/L letters accepted.
static QUADRANT_BEARING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b([NS])\.?\s*([0-9]{1,3})\s*(?:[°º]\s*(?:([0-9]{1,2})\s*['’′]\s*(?:([0-9]{1,2}(?:[.,][0-9]+)?)\s*["”″]?)?)?)?\s*([EWOL])\b"#,
    )
    .unwrap()
});

static DISTANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"({NUMBER_PATTERN})\s*m(?:etros)?\b")).unwrap());

struct AzimuthHit {
    azimuth_deg: f64,
    start: usize,
    end: usize,
}

fn absolute_azimuths(text: &str) -> Vec<AzimuthHit> {
    ABSOLUTE_AZIMUTH
        .captures_iter(text)
        .filter_map(|cap| {
            let deg = parse_decimal(cap.get(1)?.as_str())?;
            let min = parse_decimal(cap.get(2)?.as_str())?;
            let sec = cap.get(3).and_then(|m| parse_decimal(m.as_str())).unwrap_or(0.0);
            let span = cap.get(0)?;
            Some(AzimuthHit {
                azimuth_deg: normalize_azimuth(dms_to_decimal(deg, min, sec, None)),
                start: span.start(),
                end: span.end(),
            })
        })
        .collect()
}

fn quadrant_azimuths(text: &str) -> Vec<AzimuthHit> {
    QUADRANT_BEARING
        .captures_iter(text)
        .filter_map(|cap| {
            let ns = Hemisphere::from_letter(cap.get(1)?.as_str().chars().next()?)?;
            let ew = Hemisphere::from_letter(cap.get(5)?.as_str().chars().next()?)?;
            let deg = parse_decimal(cap.get(2)?.as_str())?;
            let min = cap.get(3).and_then(|m| parse_decimal(m.as_str())).unwrap_or(0.0);
            let sec = cap.get(4).and_then(|m| parse_decimal(m.as_str())).unwrap_or(0.0);
            let angle = dms_to_decimal(deg, min, sec, None);
            let span = cap.get(0)?;
            Some(AzimuthHit {
                azimuth_deg: quadrant_to_azimuth(ns, angle, ew)?,
                start: span.start(),
                end: span.end(),
            })
        })
        .collect()
}

/// All azimuth-shaped tokens in the text, in document order. A quadrant
/// bearing contains an absolute-azimuth-shaped substring, so absolute hits
/// inside a quadrant span are suppressed in favor of the quadrant reading.
fn azimuth_hits(text: &str) -> Vec<AzimuthHit> {
    let quadrants = quadrant_azimuths(text);
    let mut hits: Vec<AzimuthHit> = absolute_azimuths(text)
        .into_iter()
        .filter(|a| !quadrants.iter().any(|q| a.start >= q.start && a.end <= q.end))
        .collect();
    hits.extend(quadrants);
    hits.sort_by_key(|hit| hit.start);
    hits
}

struct DistanceHit {
    distance_m: f64,
    start: usize,
}

fn distances(text: &str) -> Vec<DistanceHit> {
    DISTANCE
        .captures_iter(text)
        .filter_map(|cap| {
            Some(DistanceHit {
                distance_m: parse_decimal(cap.get(1)?.as_str())?,
                start: cap.get(0)?.start(),
            })
        })
        .collect()
}

/// Pass A: azimuth and distance must co-occur in one sentence-like chunk,
/// the distance after the azimuth.
fn segments_from_chunks(text: &str) -> Vec<TraverseSegment> {
    let mut segments = Vec::new();

    for chunk in CHUNK_BOUNDARY.split(text) {
        let Some(azimuth) = azimuth_hits(chunk).into_iter().next() else {
            continue;
        };

        let Some(distance) = distances(&chunk[azimuth.end..]).into_iter().next() else {
            continue;
        };

        if let Some(segment) = TraverseSegment::new(azimuth.azimuth_deg, distance.distance_m) {
            segments.push(segment);
        }
    }
    segments
}

/// Pass B: position-based pairing over the whole text, each azimuth taking
/// the nearest following distance within the window.
fn segments_from_proximity(text: &str) -> Vec<TraverseSegment> {
    let azimuths = azimuth_hits(text);
    let distance_hits = distances(text);
    let mut segments = Vec::new();

    for azimuth in &azimuths {
        let paired = distance_hits
            .iter()
            .filter(|d| d.start >= azimuth.end && d.start - azimuth.end <= PROXIMITY_WINDOW)
            .min_by_key(|d| d.start - azimuth.end);

        if let Some(distance) = paired
            && let Some(segment) = TraverseSegment::new(azimuth.azimuth_deg, distance.distance_m)
        {
            segments.push(segment);
        }
    }
    segments
}

/// Extract traverse segments with both passes, concatenated.
pub fn extract_traverse_segments(text: &str) -> Vec<TraverseSegment> {
    let mut segments = segments_from_chunks(text);
    segments.extend(segments_from_proximity(text));
    segments
}
