//! Labeled easting/northing and X/Y pair extraction.
//!
//! Matches `E=693.718,072 m N=7.186.725,466 m` style labels in either order,
//! with or without the unit suffix. Numbers go through the numeric
//! normalizer, so OCR artifacts inside the digits are tolerated.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::numeric::{NUMBER_PATTERN, parse_decimal};
use crate::types::{PairOrigin, ProjectedPair};

// Labels are matched case-sensitively: a lowercase "e" is almost always the
// Portuguese conjunction, not an easting label.
static EN_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b([EN])\s*[.:=]?\s*({NUMBER_PATTERN})\s*m?\b")).unwrap());

static XY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b([XY])\s*[.:=]?\s*({NUMBER_PATTERN})\s*m?\b")).unwrap());

static LOOSE_EN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\bE\s*[.:=]?\s*({NUMBER_PATTERN})[\s\S]{{0,40}}?\bN\s*[.:=]?\s*({NUMBER_PATTERN})"
    ))
    .unwrap()
});

struct LabeledValue {
    label: char,
    value: f64,
}

fn labeled_values(regex: &Regex, text: &str) -> Vec<LabeledValue> {
    regex
        .captures_iter(text)
        .filter_map(|cap| {
            let label = cap.get(1)?.as_str().chars().next()?;
            let value = parse_decimal(cap.get(2)?.as_str())?;
            Some(LabeledValue { label, value })
        })
        .collect()
}

/// Pair a stream of labeled values into coordinate pairs.
///
/// A pending token is completed by the next token carrying the complementary
/// label; a repeated label replaces the pending token, so interleaved noise
/// cannot shift the pairing.
fn pair_labeled(
    tokens: Vec<LabeledValue>,
    first_label: char,
    make: impl Fn(f64, f64, bool) -> ProjectedPair,
) -> Vec<ProjectedPair> {
    let mut pairs = Vec::new();
    let mut pending: Option<LabeledValue> = None;

    for token in tokens {
        match pending.take() {
            Some(held) if held.label != token.label => {
                let (first, second, first_led) = if held.label == first_label {
                    (held.value, token.value, true)
                } else {
                    (token.value, held.value, false)
                };
                pairs.push(make(first, second, first_led));
            }
            _ => pending = Some(token),
        }
    }
    pairs
}

/// Extract labeled `E`/`N` pairs, tolerating either label order.
pub fn extract_en_pairs(text: &str) -> Vec<ProjectedPair> {
    pair_labeled(labeled_values(&EN_TOKEN, text), 'E', |easting, northing, _| {
        ProjectedPair::new(easting, northing, PairOrigin::EnText)
    })
}

/// Extract labeled `X`/`Y` pairs. X is taken as easting, Y as northing; the
/// origin records which label led.
pub fn extract_xy_pairs(text: &str) -> Vec<ProjectedPair> {
    pair_labeled(labeled_values(&XY_TOKEN, text), 'X', |easting, northing, x_led| {
        let origin = if x_led { PairOrigin::XyText } else { PairOrigin::YxText };
        ProjectedPair::new(easting, northing, origin)
    })
}

/// First loose `E ... N ...` pair in the text, used as a traverse seed when
/// no structured source produced one.
pub fn find_loose_en_pair(text: &str) -> Option<ProjectedPair> {
    let cap = LOOSE_EN.captures(text)?;
    let easting = parse_decimal(cap.get(1)?.as_str())?;
    let northing = parse_decimal(cap.get(2)?.as_str())?;
    Some(ProjectedPair::new(easting, northing, PairOrigin::EnText))
}
