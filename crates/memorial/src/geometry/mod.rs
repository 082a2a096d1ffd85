//! Ring reconstruction from extracted coordinate material.

pub mod reconstruct;

pub use reconstruct::{Reconstruction, RelativePolygon, reconstruct_ring, walk_traverse};

/// Plausibility gate for projected coordinates: finite and inside an
/// |easting|/|northing| envelope no real-world projected CRS exceeds.
pub(crate) fn plausible_projected(easting: f64, northing: f64) -> bool {
    easting.is_finite() && northing.is_finite() && easting.abs() < 1.0e8 && northing.abs() < 1.0e8
}
