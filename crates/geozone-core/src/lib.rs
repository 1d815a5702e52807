//! GeoZone Core Library
//!
//! Platform-agnostic zone data model and map synchronization logic for the
//! GeoZone editor: the zone store, the selection/edit form, and the engine
//! that keeps both consistent with the drawing surface.

pub mod engine;
pub mod events;
pub mod form;
pub mod geo;
pub mod geometry;
pub mod store;
pub mod surface;
pub mod zone;

pub use engine::{SyncEngine, SyncError};
pub use events::SurfaceEvent;
pub use form::{DraftEdit, DraftFields, FormCommit, FormController};
pub use geo::{LatLng, LatLngBounds};
pub use geometry::ZoneGeometry;
pub use store::{UNDESCRIBED, UNTITLED, ZoneStore};
pub use surface::{DetachError, GeometrySurface, HandleId, MemorySurface};
pub use zone::{Color, ShapeKind, Zone, ZoneFields, ZoneId};
