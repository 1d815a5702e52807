//! Zone records and their metadata types.

use crate::geometry::ZoneGeometry;
use crate::surface::HandleId;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

/// Unique identifier for zones. Assigned at creation, never reused.
pub type ZoneId = Uuid;

/// The drawing tool a zone was created with. Fixed for the zone's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Polygon,
    Polyline,
}

impl ShapeKind {
    /// Lowercase name as used in exported feature properties.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Polyline => "polyline",
        }
    }
}

/// Serializable stroke color (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string (`#rgb`, `#rrggbb`, `#rrggbbaa`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?.trim();
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 | 8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = if hex.len() == 8 {
                    u8::from_str_radix(&hex[6..8], 16).ok()?
                } else {
                    255
                };
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Hex representation (`#rrggbb`, or `#rrggbbaa` when not fully opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    /// The map library's default stroke blue (`#3388ff`).
    fn default() -> Self {
        Self::new(0x33, 0x88, 0xff, 255)
    }
}

/// Metadata fields a form commit applies to a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFields {
    pub title: String,
    pub description: String,
    pub color: Color,
}

/// A user-defined geographic shape plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Stable identifier, immutable after creation.
    pub id: ZoneId,
    pub title: String,
    pub description: String,
    /// Stroke color applied to the rendered geometry.
    pub color: Color,
    /// Drawing tool the zone was created with. Not user-editable.
    pub shape_kind: ShapeKind,
    /// Spatial snapshot, kept in sync with the live handle.
    pub geometry: ZoneGeometry,
    /// Back-reference to the live surface handle. Relation, not ownership:
    /// once the handle leaves the surface this must be treated as absent.
    #[serde(skip)]
    pub handle: Option<HandleId>,
}

impl Zone {
    /// GeoJSON `Feature` for this zone. Metadata goes into `properties`;
    /// circle radii travel there too since GeoJSON has no circle geometry.
    pub fn to_geojson(&self) -> Value {
        let mut properties = json!({
            "title": self.title,
            "description": self.description,
            "color": self.color.to_hex(),
            "shapeType": self.shape_kind.as_str(),
        });
        if let ZoneGeometry::Circle { radius, .. } = self.geometry {
            properties["radius"] = json!(radius);
        }
        json!({
            "type": "Feature",
            "id": self.id.to_string(),
            "properties": properties,
            "geometry": self.geometry.to_geojson(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LatLng;

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::from_hex("#cc3300").unwrap();
        assert_eq!(color, Color::new(0xcc, 0x33, 0x00, 255));
        assert_eq!(color.to_hex(), "#cc3300");
    }

    #[test]
    fn test_color_short_hex() {
        assert_eq!(Color::from_hex("#f00").unwrap(), Color::new(255, 0, 0, 255));
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::from_hex("#11223380").unwrap();
        assert_eq!(color.a, 0x80);
        assert_eq!(color.to_hex(), "#11223380");
    }

    #[test]
    fn test_color_rejects_garbage() {
        assert!(Color::from_hex("red").is_none());
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#zzzzzz").is_none());
        assert!(Color::from_hex("#ábc").is_none());
    }

    #[test]
    fn test_default_color_is_map_blue() {
        assert_eq!(Color::default().to_hex(), "#3388ff");
    }

    #[test]
    fn test_zone_geojson_feature() {
        let zone = Zone {
            id: Uuid::new_v4(),
            title: "Harbor".to_string(),
            description: "No-anchor area".to_string(),
            color: Color::default(),
            shape_kind: ShapeKind::Circle,
            geometry: ZoneGeometry::Circle {
                center: LatLng::new(48.8566, 2.3522),
                radius: 300.0,
            },
            handle: None,
        };
        let feature = zone.to_geojson();
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["properties"]["title"], "Harbor");
        assert_eq!(feature["properties"]["shapeType"], "circle");
        assert_eq!(feature["properties"]["radius"].as_f64().unwrap(), 300.0);
        assert_eq!(feature["geometry"]["type"], "Point");
    }
}
