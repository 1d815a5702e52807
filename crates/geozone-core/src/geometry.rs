//! Zone geometry snapshots.

use crate::geo::{LatLng, LatLngBounds};
use crate::zone::ShapeKind;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Serializable spatial representation of a drawn zone.
///
/// One variant per drawing tool. A snapshot is decoupled from the live
/// surface handle that produced it; the sync engine refreshes it on every
/// edit event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ZoneGeometry {
    /// A circle with center and radius in meters.
    Circle { center: LatLng, radius: f64 },
    /// A closed ring of vertices. Stored unclosed (first vertex not repeated).
    Polygon { ring: Vec<LatLng> },
    /// An open chain of points.
    Polyline { points: Vec<LatLng> },
}

impl ZoneGeometry {
    /// The drawing tool this geometry came from.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ZoneGeometry::Circle { .. } => ShapeKind::Circle,
            ZoneGeometry::Polygon { .. } => ShapeKind::Polygon,
            ZoneGeometry::Polyline { .. } => ShapeKind::Polyline,
        }
    }

    /// Geographic bounding box. `None` for an empty vertex list.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        match self {
            ZoneGeometry::Circle { center, radius } => {
                Some(LatLngBounds::from_circle(*center, *radius))
            }
            ZoneGeometry::Polygon { ring } => LatLngBounds::from_points(ring),
            ZoneGeometry::Polyline { points } => LatLngBounds::from_points(points),
        }
    }

    /// Number of vertices (1 for a circle).
    pub fn vertex_count(&self) -> usize {
        match self {
            ZoneGeometry::Circle { .. } => 1,
            ZoneGeometry::Polygon { ring } => ring.len(),
            ZoneGeometry::Polyline { points } => points.len(),
        }
    }

    /// GeoJSON geometry object (RFC 7946, `[lng, lat]` coordinate order).
    ///
    /// Circles have no GeoJSON equivalent and export as a `Point` at the
    /// center; the radius travels in the feature properties instead
    /// (see [`crate::zone::Zone::to_geojson`]).
    pub fn to_geojson(&self) -> Value {
        match self {
            ZoneGeometry::Circle { center, .. } => json!({
                "type": "Point",
                "coordinates": position(center),
            }),
            ZoneGeometry::Polygon { ring } => {
                // GeoJSON polygons close the ring explicitly.
                let mut coords: Vec<Value> = ring.iter().map(position).collect();
                if let Some(first) = ring.first() {
                    coords.push(position(first));
                }
                json!({
                    "type": "Polygon",
                    "coordinates": [coords],
                })
            }
            ZoneGeometry::Polyline { points } => json!({
                "type": "LineString",
                "coordinates": points.iter().map(position).collect::<Vec<_>>(),
            }),
        }
    }
}

fn position(p: &LatLng) -> Value {
    json!([p.lng, p.lat])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<LatLng> {
        vec![
            LatLng::new(41.30, 69.24),
            LatLng::new(41.32, 69.24),
            LatLng::new(41.31, 69.27),
        ]
    }

    #[test]
    fn test_kind() {
        let circle = ZoneGeometry::Circle {
            center: LatLng::new(0.0, 0.0),
            radius: 100.0,
        };
        assert_eq!(circle.kind(), ShapeKind::Circle);
        assert_eq!(ZoneGeometry::Polygon { ring: triangle() }.kind(), ShapeKind::Polygon);
        assert_eq!(
            ZoneGeometry::Polyline { points: triangle() }.kind(),
            ShapeKind::Polyline
        );
    }

    #[test]
    fn test_polygon_bounds() {
        let bounds = ZoneGeometry::Polygon { ring: triangle() }.bounds().unwrap();
        assert!((bounds.south_west.lat - 41.30).abs() < f64::EPSILON);
        assert!((bounds.north_east.lng - 69.27).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_polyline_has_no_bounds() {
        assert!(ZoneGeometry::Polyline { points: vec![] }.bounds().is_none());
    }

    #[test]
    fn test_geojson_closes_polygon_ring() {
        let geojson = ZoneGeometry::Polygon { ring: triangle() }.to_geojson();
        assert_eq!(geojson["type"], "Polygon");
        let ring = geojson["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], ring[3]);
        // [lng, lat] order
        assert_eq!(ring[0][0].as_f64().unwrap(), 69.24);
    }

    #[test]
    fn test_geojson_circle_exports_as_point() {
        let geojson = ZoneGeometry::Circle {
            center: LatLng::new(48.8566, 2.3522),
            radius: 250.0,
        }
        .to_geojson();
        assert_eq!(geojson["type"], "Point");
        assert_eq!(geojson["coordinates"][0].as_f64().unwrap(), 2.3522);
    }

    #[test]
    fn test_serde_round_trip() {
        let geometry = ZoneGeometry::Polyline { points: triangle() };
        let json = serde_json::to_string(&geometry).unwrap();
        let back: ZoneGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, geometry);
    }
}
