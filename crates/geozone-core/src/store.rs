//! Zone store: the authoritative zone collection.

use crate::form::DraftFields;
use crate::geometry::ZoneGeometry;
use crate::surface::HandleId;
use crate::zone::{ShapeKind, Zone, ZoneFields, ZoneId};
use std::collections::HashMap;
use uuid::Uuid;

/// Placeholder title for zones created with a blank title field.
pub const UNTITLED: &str = "untitled";
/// Placeholder description for zones created with a blank description field.
pub const UNDESCRIBED: &str = "undescribed";

/// In-memory, insertion-ordered collection of zones.
///
/// Single owner of the zone lifecycle. Has no knowledge of the geometry
/// surface beyond the opaque handle ids it stores as back-references.
#[derive(Debug, Default, Clone)]
pub struct ZoneStore {
    zones: HashMap<ZoneId, Zone>,
    /// Insertion order, for listing.
    order: Vec<ZoneId>,
}

impl ZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zone from the draft fields and a geometry snapshot,
    /// allocating a fresh id. Blank title/description fall back to the
    /// placeholder values. No surface side effects.
    pub fn create(
        &mut self,
        draft: &DraftFields,
        shape_kind: ShapeKind,
        geometry: ZoneGeometry,
        handle: Option<HandleId>,
    ) -> ZoneId {
        let id = Uuid::new_v4();
        let title = if draft.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            draft.title.clone()
        };
        let description = if draft.description.trim().is_empty() {
            UNDESCRIBED.to_string()
        } else {
            draft.description.clone()
        };
        self.order.push(id);
        self.zones.insert(
            id,
            Zone {
                id,
                title,
                description,
                color: draft.color,
                shape_kind,
                geometry,
                handle,
            },
        );
        id
    }

    /// Merge metadata fields into an existing zone. Silent no-op when `id`
    /// does not exist; callers pre-check existence when absence matters.
    pub fn update(&mut self, id: ZoneId, fields: ZoneFields) {
        let Some(zone) = self.zones.get_mut(&id) else {
            return;
        };
        zone.title = fields.title;
        zone.description = fields.description;
        zone.color = fields.color;
    }

    /// Replace only the geometry of an existing zone. Same existence
    /// contract as [`ZoneStore::update`].
    pub fn update_geometry(&mut self, id: ZoneId, geometry: ZoneGeometry) {
        let Some(zone) = self.zones.get_mut(&id) else {
            return;
        };
        zone.geometry = geometry;
    }

    /// Remove a zone. Idempotent.
    pub fn remove(&mut self, id: ZoneId) {
        if self.zones.remove(&id).is_some() {
            self.order.retain(|z| *z != id);
        }
    }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(&id)
    }

    /// Snapshot of all zones in insertion order. Not a live view.
    pub fn list(&self) -> Vec<Zone> {
        self.order
            .iter()
            .filter_map(|id| self.zones.get(id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Serialize the zone list to pretty-printed JSON (insertion order).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.list())
    }

    /// GeoJSON `FeatureCollection` of every zone, in insertion order.
    pub fn to_geojson(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": self.list().iter().map(Zone::to_geojson).collect::<Vec<_>>(),
        })
    }
}
