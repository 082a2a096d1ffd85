//! Hemisphere letters, DMS angles, and quadrant bearings.
//!
//! Portuguese survey text uses `O` (oeste) for west and `L` (leste) for east,
//! and OCR mixes those freely with the English letters. Every extractor
//! resolves hemisphere letters through this one table so the mapping cannot
//! drift between regexes.

/// A compass hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Canonical letter mapping: `N`/`S` as usual, `E` or `L` (leste) for
    /// east, `W` or `O` (oeste) for west. Case-insensitive.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' | 'L' => Some(Hemisphere::East),
            'W' | 'O' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// South and west negate a coordinate magnitude.
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }

    /// North/South tag a latitude; East/West tag a longitude.
    pub fn is_latitudinal(self) -> bool {
        matches!(self, Hemisphere::North | Hemisphere::South)
    }
}

/// Convert degrees-minutes-seconds to decimal degrees.
///
/// Magnitude is `|deg| + |min|/60 + |sec|/3600`; the result is negative when
/// the hemisphere is south/west or when the degree field itself carries a
/// negative sign.
pub fn dms_to_decimal(deg: f64, min: f64, sec: f64, hemisphere: Option<Hemisphere>) -> f64 {
    let magnitude = deg.abs() + min.abs() / 60.0 + sec.abs() / 3600.0;
    let negative = hemisphere.map(Hemisphere::is_negative).unwrap_or(false) || deg.is_sign_negative();
    if negative { -magnitude } else { magnitude }
}

/// Normalize any angle in degrees into [0, 360).
pub fn normalize_azimuth(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Convert a quadrant bearing (e.g. `S 45° W`) to an azimuth clockwise from
/// true north.
///
/// Branches: NθE → θ, SθE → 180−θ, SθW → 180+θ, NθW → 360−θ. Returns `None`
/// when the letters do not form a valid quadrant (first must be N/S, second
/// E/W).
pub fn quadrant_to_azimuth(ns: Hemisphere, angle_deg: f64, ew: Hemisphere) -> Option<f64> {
    if !ns.is_latitudinal() || ew.is_latitudinal() {
        return None;
    }
    let azimuth = match (ns, ew) {
        (Hemisphere::North, Hemisphere::East) => angle_deg,
        (Hemisphere::South, Hemisphere::East) => 180.0 - angle_deg,
        (Hemisphere::South, Hemisphere::West) => 180.0 + angle_deg,
        (Hemisphere::North, Hemisphere::West) => 360.0 - angle_deg,
        _ => return None,
    };
    Some(normalize_azimuth(azimuth))
}
