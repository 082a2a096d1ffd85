//! Geographic-to-projected conversion through proj4rs.
//!
//! The transform library is an optional collaborator: any failure here (a
//! definition that will not parse, a point the projection rejects, or the
//! `projection` feature being compiled out) degrades to `None` for that pair
//! and the pipeline carries on with its remaining strategies.

use crate::projection::registry::ProjectionDefinition;

/// Convert a WGS84 geographic pair to the target definition's coordinates.
///
/// Returns projected `(easting, northing)` in meters, or the `(lon, lat)`
/// passthrough for the geographic/unprojected registry entries.
#[cfg(feature = "projection")]
pub fn to_projected(def: &ProjectionDefinition, latitude: f64, longitude: f64) -> Option<(f64, f64)> {
    use crate::projection::registry::WGS84_PROJ4;

    // Geographic and unprojected targets need no transform.
    if def.proj4.is_empty() || def.epsg == Some(4326) {
        return Some((longitude, latitude));
    }

    let source = match proj4rs::proj::Proj::from_proj_string(WGS84_PROJ4) {
        Ok(proj) => proj,
        Err(err) => {
            tracing::debug!("projection source definition rejected: {err}");
            return None;
        }
    };
    let target = match proj4rs::proj::Proj::from_proj_string(def.proj4) {
        Ok(proj) => proj,
        Err(err) => {
            tracing::debug!(key = def.key, "projection target definition rejected: {err}");
            return None;
        }
    };

    // proj4rs works in radians on the geographic side.
    let mut point = (longitude.to_radians(), latitude.to_radians());
    match proj4rs::transform::transform(&source, &target, &mut point) {
        Ok(()) => Some((point.0, point.1)),
        Err(err) => {
            tracing::debug!(key = def.key, latitude, longitude, "transform failed: {err}");
            None
        }
    }
}

/// Feature-disabled fallback: conversion degrades to "no result".
#[cfg(not(feature = "projection"))]
pub fn to_projected(def: &ProjectionDefinition, latitude: f64, longitude: f64) -> Option<(f64, f64)> {
    if def.proj4.is_empty() || def.epsg == Some(4326) {
        return Some((longitude, latitude));
    }
    tracing::debug!(
        key = def.key,
        latitude,
        longitude,
        "projection feature disabled; geographic pair not converted"
    );
    None
}

#[cfg(all(test, feature = "projection"))]
mod tests {
    use super::*;
    use crate::projection::registry::find;

    #[test]
    fn test_utm_conversion_lands_in_zone_range() {
        let def = find("SIRGAS2000_22S").unwrap();
        let (easting, northing) = to_projected(def, -24.074605, -50.720205).unwrap();
        // Zone 22S spans eastings around 166km-834km and southern-hemisphere
        // northings in the 7-10 million range.
        assert!((100_000.0..900_000.0).contains(&easting), "easting {easting}");
        assert!((1_000_000.0..10_000_000.0).contains(&northing), "northing {northing}");
    }

    #[test]
    fn test_wgs84_target_is_passthrough() {
        let def = find("WGS84").unwrap();
        assert_eq!(to_projected(def, -24.0, -50.0), Some((-50.0, -24.0)));
    }

    #[test]
    fn test_local_target_is_passthrough() {
        let def = find("LOCAL").unwrap();
        assert_eq!(to_projected(def, -24.0, -50.0), Some((-50.0, -24.0)));
    }

    #[test]
    fn test_round_trip_stability_between_zones() {
        // The same point projected into two adjacent zones gives different
        // eastings but comparable northings.
        let z22 = to_projected(find("SIRGAS2000_22S").unwrap(), -24.0, -51.0).unwrap();
        let z21 = to_projected(find("SIRGAS2000_21S").unwrap(), -24.0, -51.0).unwrap();
        assert!((z22.1 - z21.1).abs() < 50_000.0);
        assert!((z22.0 - z21.0).abs() > 100_000.0);
    }
}
