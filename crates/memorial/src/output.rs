//! GIS output formats for extracted results.
//!
//! The pipeline leaves rings open; closure is applied here, at presentation
//! time, by repeating the first position when needed.

use serde_json::{Value, json};

use crate::projection::registry;
use crate::types::DocumentResult;

fn closed_positions(result: &DocumentResult) -> Vec<[f64; 2]> {
    let mut positions: Vec<[f64; 2]> = result
        .vertices
        .iter()
        .map(|v| [v.easting, v.northing])
        .collect();
    if let (Some(first), Some(last)) = (positions.first().copied(), positions.last().copied()) {
        if first != last {
            positions.push(first);
        }
    }
    positions
}

impl DocumentResult {
    /// GeoJSON Feature with a Polygon geometry.
    ///
    /// The geometry is `null` when no valid ring was extracted; properties
    /// always carry the vertex ids, CRS information, and per-page
    /// acquisition provenance.
    pub fn to_geojson(&self) -> Value {
        let geometry = if self.has_valid_ring() {
            json!({
                "type": "Polygon",
                "coordinates": [closed_positions(self)],
            })
        } else {
            Value::Null
        };

        let epsg = self
            .projection
            .as_deref()
            .and_then(registry::find)
            .and_then(|def| def.epsg);

        json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "vertex_ids": self.vertices.iter().map(|v| v.id.clone()).collect::<Vec<_>>(),
                "projection": self.projection.clone(),
                "epsg": epsg,
                "pages": self.pages.iter().map(|p| {
                    json!({ "page": p.page, "method": p.method.as_str() })
                }).collect::<Vec<_>>(),
            },
        })
    }

    /// `POLYGON((...))` WKT, or `None` when no valid ring was extracted.
    pub fn to_wkt(&self) -> Option<String> {
        if !self.has_valid_ring() {
            return None;
        }
        let ring = closed_positions(self)
            .iter()
            .map(|[e, n]| format!("{e:.3} {n:.3}"))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("POLYGON(({ring}))"))
    }
}
