//! Coordinate reference system resolution and conversion.

pub mod registry;
pub mod transform;

pub use registry::{LOCAL_KEY, ProjectionDefinition, WGS84_KEY};
pub use transform::to_projected;

use crate::error::{MemorialError, Result};

/// UTM zone containing a longitude: `floor((lon + 180) / 6) + 1`.
pub fn utm_zone_for(longitude: f64) -> i32 {
    ((longitude + 180.0) / 6.0).floor() as i32 + 1
}

/// Resolve the target CRS for a set of geographic coordinates.
///
/// An explicit hint always wins. Without one, the SIRGAS2000 entry for the
/// UTM zone of the mean longitude is selected; a key that is not in the
/// registry is an error, never a silent default.
pub fn resolve(hint: Option<&str>, mean_longitude: f64) -> Result<&'static ProjectionDefinition> {
    if let Some(key) = hint {
        return registry::find(key)
            .ok_or_else(|| MemorialError::projection(format!("unknown projection key '{key}'")));
    }

    let zone = utm_zone_for(mean_longitude);
    let key = format!("SIRGAS2000_{zone}S");
    registry::find(&key).ok_or_else(|| {
        MemorialError::projection(format!(
            "no registry entry for computed zone {zone} (longitude {mean_longitude:.4})"
        ))
    })
}
