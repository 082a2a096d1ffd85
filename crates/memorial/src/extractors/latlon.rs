//! Geographic coordinate extraction.
//!
//! Six regex strategies run in a fixed order and the first one that yields a
//! plausible pair wins. The spread covers the layouts that survive OCR:
//! labeled DMS rows, loose DMS tokens with hemisphere letters, named or
//! labeled decimal degrees, unlabeled DMS pairs, and DMS with every
//! degree/minute/second glyph lost (OCR routinely drops `°`, `'` and `"`).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::compass::{Hemisphere, dms_to_decimal};
use crate::numeric::parse_decimal;
use crate::types::{GeoPair, PairOrigin};

// Degrees-minutes-seconds with glyphs, tolerating the variant Unicode marks
// OCR produces. Three capture groups: degrees, minutes, seconds.
const DMS: &str = r#"(-?[0-9]{1,3})\s*[°º]\s*([0-9]{1,2})\s*['’′]\s*([0-9]{1,2}(?:[.,][0-9]+)?)\s*["”″]?"#;

static LON_LAT_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)longitude\s*[.:=]?\s*{DMS}\s*([WOEL])?[\s\S]{{0,60}}?latitude\s*[.:=]?\s*{DMS}\s*([NS])?"
    ))
    .unwrap()
});

static DMS_HEMI_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"{DMS}\s*([NSWOEL])\b")).unwrap());

static NAMED_LAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)latitude\s*[.:=]?\s*(-?[0-9]+[.,][0-9]+)").unwrap());
static NAMED_LON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)longitude\s*[.:=]?\s*(-?[0-9]+[.,][0-9]+)").unwrap());

static LABELED_LAT_LON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\blat\.?\s*[.:=]?\s*(-?[0-9]+[.,][0-9]+)[^0-9]{0,40}?\blong?\.?\s*[.:=]?\s*(-?[0-9]+[.,][0-9]+)")
        .unwrap()
});
static LABELED_LON_LAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\blong?\.?\s*[.:=]?\s*(-?[0-9]+[.,][0-9]+)[^0-9]{0,40}?\blat\.?\s*[.:=]?\s*(-?[0-9]+[.,][0-9]+)")
        .unwrap()
});

static DMS_PAIR_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{DMS}\s*([NSWOEL])?\s*[,;]?\s*(?:e\s+)?{DMS}\s*([NSWOEL])?")).unwrap()
});

static BARE_DMS_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9]{1,3})\s+([0-9]{1,2})\s+([0-9]{1,2}[.,][0-9]+)\s*([NSWOEL])\b").unwrap()
});

/// Run the strategies in priority order and return the first plausible result.
pub fn extract_geo_pairs(text: &str) -> Vec<GeoPair> {
    let strategies: [fn(&str) -> Vec<GeoPair>; 6] = [
        labeled_lon_lat_rows,
        loose_dms_tokens,
        named_decimal_degrees,
        labeled_decimal_pairs,
        unlabeled_dms_pairs,
        bare_dms_tokens,
    ];

    for strategy in strategies {
        let pairs: Vec<GeoPair> = strategy(text).into_iter().filter(GeoPair::is_plausible).collect();
        if !pairs.is_empty() {
            return pairs;
        }
    }
    Vec::new()
}

fn dms_value(deg: &str, min: &str, sec: &str, hemi: Option<Hemisphere>) -> Option<f64> {
    let deg = parse_decimal(deg)?;
    let min = parse_decimal(min)?;
    let sec = parse_decimal(sec)?;
    Some(dms_to_decimal(deg, min, sec, hemi))
}

fn hemisphere_at(cap: &regex::Captures<'_>, group: usize) -> Option<Hemisphere> {
    cap.get(group)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Hemisphere::from_letter)
}

/// Strategy (a): a labeled `Longitude ... Latitude ...` DMS row.
fn labeled_lon_lat_rows(text: &str) -> Vec<GeoPair> {
    LON_LAT_ROW
        .captures_iter(text)
        .filter_map(|cap| {
            let lon = dms_value(&cap[1], &cap[2], &cap[3], hemisphere_at(&cap, 4))?;
            let lat = dms_value(&cap[5], &cap[6], &cap[7], hemisphere_at(&cap, 8))?;
            Some(GeoPair::new(lat, lon, PairOrigin::LatLonText))
        })
        .collect()
}

struct HemiToken {
    value: f64,
    latitudinal: bool,
}

/// Pair a token stream by proximity with alternating latitude/longitude tags.
/// Two consecutive tokens of the same type are never paired; the walk skips
/// the first of them instead.
fn pair_alternating(tokens: &[HemiToken]) -> Vec<GeoPair> {
    let mut pairs = Vec::new();
    let mut i = 0;
    while i + 1 < tokens.len() {
        let (a, b) = (&tokens[i], &tokens[i + 1]);
        if a.latitudinal != b.latitudinal {
            let (lat, lon) = if a.latitudinal { (a.value, b.value) } else { (b.value, a.value) };
            pairs.push(GeoPair::new(lat, lon, PairOrigin::LatLonText));
            i += 2;
        } else {
            i += 1;
        }
    }
    pairs
}

/// Strategy (b): loose DMS tokens with an explicit hemisphere letter.
fn loose_dms_tokens(text: &str) -> Vec<GeoPair> {
    let tokens: Vec<HemiToken> = DMS_HEMI_TOKEN
        .captures_iter(text)
        .filter_map(|cap| {
            let hemi = hemisphere_at(&cap, 4)?;
            let value = dms_value(&cap[1], &cap[2], &cap[3], Some(hemi))?;
            Some(HemiToken {
                value,
                latitudinal: hemi.is_latitudinal(),
            })
        })
        .collect();
    pair_alternating(&tokens)
}

/// Strategy (c): full-word `Latitude`/`Longitude` names with decimal degrees.
fn named_decimal_degrees(text: &str) -> Vec<GeoPair> {
    let lats: Vec<f64> = NAMED_LAT
        .captures_iter(text)
        .filter_map(|cap| parse_decimal(&cap[1]))
        .collect();
    let lons: Vec<f64> = NAMED_LON
        .captures_iter(text)
        .filter_map(|cap| parse_decimal(&cap[1]))
        .collect();
    lats.into_iter()
        .zip(lons)
        .map(|(lat, lon)| GeoPair::new(lat, lon, PairOrigin::LatLonText))
        .collect()
}

/// Strategy (d): abbreviated `Lat ... Long ...` decimal pairs, either order.
fn labeled_decimal_pairs(text: &str) -> Vec<GeoPair> {
    let lat_first: Vec<GeoPair> = LABELED_LAT_LON
        .captures_iter(text)
        .filter_map(|cap| {
            let lat = parse_decimal(&cap[1])?;
            let lon = parse_decimal(&cap[2])?;
            Some(GeoPair::new(lat, lon, PairOrigin::LatLonText))
        })
        .collect();
    if !lat_first.is_empty() {
        return lat_first;
    }
    LABELED_LON_LAT
        .captures_iter(text)
        .filter_map(|cap| {
            let lon = parse_decimal(&cap[1])?;
            let lat = parse_decimal(&cap[2])?;
            Some(GeoPair::new(lat, lon, PairOrigin::LatLonText))
        })
        .collect()
}

/// Strategy (e): unlabeled DMS pairs in longitude-then-latitude order.
/// Hemisphere letters, when present, override the positional roles; a pair
/// whose letters land on the same axis is discarded.
fn unlabeled_dms_pairs(text: &str) -> Vec<GeoPair> {
    DMS_PAIR_ROW
        .captures_iter(text)
        .filter_map(|cap| {
            let first_hemi = hemisphere_at(&cap, 4);
            let second_hemi = hemisphere_at(&cap, 8);
            let first = dms_value(&cap[1], &cap[2], &cap[3], first_hemi)?;
            let second = dms_value(&cap[5], &cap[6], &cap[7], second_hemi)?;

            let (lat, lon) = match (first_hemi, second_hemi) {
                (Some(a), Some(b)) if a.is_latitudinal() == b.is_latitudinal() => return None,
                (Some(a), _) => {
                    if a.is_latitudinal() { (first, second) } else { (second, first) }
                }
                (None, Some(b)) => {
                    if b.is_latitudinal() { (second, first) } else { (first, second) }
                }
                (None, None) => (second, first),
            };
            Some(GeoPair::new(lat, lon, PairOrigin::LatLonText))
        })
        .collect()
}

/// Strategy (f): DMS with no degree/minute/second glyphs at all, recovered
/// from space-separated number triplets followed by a hemisphere letter.
fn bare_dms_tokens(text: &str) -> Vec<GeoPair> {
    let tokens: Vec<HemiToken> = BARE_DMS_TOKEN
        .captures_iter(text)
        .filter_map(|cap| {
            let hemi = hemisphere_at(&cap, 4)?;
            let value = dms_value(&cap[1], &cap[2], &cap[3], Some(hemi))?;
            Some(HemiToken {
                value,
                latitudinal: hemi.is_latitudinal(),
            })
        })
        .collect();
    pair_alternating(&tokens)
}
