//! Geometry surface abstraction.
//!
//! The surface (an interactive map widget in a full deployment) owns the
//! rendered shapes and their editing-handle UI. The core only talks to it
//! through this seam: read a geometry snapshot, write a style or tag, toggle
//! edit mode, detach a handle.

use crate::geometry::ZoneGeometry;
use crate::zone::{Color, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Opaque identifier of one rendered shape, minted by the surface.
///
/// A `HandleId` stays valid as a correlation token after the shape is
/// removed from the rendered set; only its geometry becomes unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleId(u64);

/// Surface-reported failure to remove a handle.
#[derive(Debug, Error)]
pub enum DetachError {
    #[error("handle {0:?} was never on the surface")]
    Unknown(HandleId),
    #[error("surface refused to detach handle {0:?}")]
    Refused(HandleId),
}

/// The drawing surface as seen by the sync engine.
///
/// Each rendered shape exposes a serializable geometry snapshot, a mutable
/// style, a mutable tag slot correlating it to a zone record, and an
/// edit-enable toggle.
pub trait GeometrySurface {
    /// Whether `handle` is currently part of the rendered set.
    fn contains(&self, handle: HandleId) -> bool;

    /// Geometry snapshot of a live handle. `None` once the handle has been
    /// removed from the rendered set.
    fn geometry(&self, handle: HandleId) -> Option<ZoneGeometry>;

    /// Set the stroke style of a live handle.
    fn set_style(&mut self, handle: HandleId, color: Color);

    /// Attach a zone id to the handle's tag slot.
    fn set_tag(&mut self, handle: HandleId, id: ZoneId);

    /// Read the handle's tag slot. Tags outlive removal so deletion events
    /// can still be correlated to their zone records.
    fn tag(&self, handle: HandleId) -> Option<ZoneId>;

    /// Enable or disable the editing-handle UI on a live handle.
    fn set_editing(&mut self, handle: HandleId, enabled: bool);

    /// Whether the editing-handle UI is currently enabled for `handle`.
    fn is_editing(&self, handle: HandleId) -> bool;

    /// Remove the handle from the rendered set.
    fn remove(&mut self, handle: HandleId) -> Result<(), DetachError>;
}

#[derive(Debug, Clone)]
struct SurfaceShape {
    geometry: ZoneGeometry,
    style: Color,
    tag: Option<ZoneId>,
    editing: bool,
    /// Removed from the rendered set but kept as a correlation tombstone.
    detached: bool,
}

/// In-memory surface for headless sessions and tests.
///
/// [`MemorySurface::add_shape`] plays the role of the user finishing a
/// drawing; the returned handle is what a real map widget would carry in its
/// created event.
#[derive(Debug, Default)]
pub struct MemorySurface {
    shapes: HashMap<HandleId, SurfaceShape>,
    next_handle: u64,
    fail_next_detach: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a freshly drawn shape on the surface and mint its handle.
    pub fn add_shape(&mut self, geometry: ZoneGeometry) -> HandleId {
        let handle = HandleId(self.next_handle);
        self.next_handle += 1;
        self.shapes.insert(
            handle,
            SurfaceShape {
                geometry,
                style: Color::default(),
                tag: None,
                editing: false,
                detached: false,
            },
        );
        handle
    }

    /// Replace a live handle's geometry, simulating the user dragging
    /// vertices in an edit pass.
    pub fn update_shape(&mut self, handle: HandleId, geometry: ZoneGeometry) {
        match self.shapes.get_mut(&handle).filter(|s| !s.detached) {
            Some(shape) => shape.geometry = geometry,
            None => log::debug!("update_shape on dead handle {handle:?}; ignoring"),
        }
    }

    /// Current stroke style of a live handle.
    pub fn style(&self, handle: HandleId) -> Option<Color> {
        self.live(handle).map(|s| s.style)
    }

    /// Make the next `remove` call fail, simulating a surface that refuses
    /// to drop a handle.
    pub fn fail_next_detach(&mut self) {
        self.fail_next_detach = true;
    }

    /// Number of shapes in the rendered set.
    pub fn len(&self) -> usize {
        self.shapes.values().filter(|s| !s.detached).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live(&self, handle: HandleId) -> Option<&SurfaceShape> {
        self.shapes.get(&handle).filter(|s| !s.detached)
    }

    fn live_mut(&mut self, handle: HandleId) -> Option<&mut SurfaceShape> {
        self.shapes.get_mut(&handle).filter(|s| !s.detached)
    }
}

impl GeometrySurface for MemorySurface {
    fn contains(&self, handle: HandleId) -> bool {
        self.live(handle).is_some()
    }

    fn geometry(&self, handle: HandleId) -> Option<ZoneGeometry> {
        self.live(handle).map(|s| s.geometry.clone())
    }

    fn set_style(&mut self, handle: HandleId, color: Color) {
        match self.live_mut(handle) {
            Some(shape) => shape.style = color,
            None => log::debug!("set_style on dead handle {handle:?}; ignoring"),
        }
    }

    fn set_tag(&mut self, handle: HandleId, id: ZoneId) {
        match self.shapes.get_mut(&handle) {
            Some(shape) => shape.tag = Some(id),
            None => log::debug!("set_tag on unknown handle {handle:?}; ignoring"),
        }
    }

    fn tag(&self, handle: HandleId) -> Option<ZoneId> {
        self.shapes.get(&handle).and_then(|s| s.tag)
    }

    fn set_editing(&mut self, handle: HandleId, enabled: bool) {
        match self.live_mut(handle) {
            Some(shape) => shape.editing = enabled,
            None => log::debug!("set_editing on dead handle {handle:?}; ignoring"),
        }
    }

    fn is_editing(&self, handle: HandleId) -> bool {
        self.live(handle).is_some_and(|s| s.editing)
    }

    fn remove(&mut self, handle: HandleId) -> Result<(), DetachError> {
        if self.fail_next_detach {
            self.fail_next_detach = false;
            return Err(DetachError::Refused(handle));
        }
        let shape = self
            .shapes
            .get_mut(&handle)
            .ok_or(DetachError::Unknown(handle))?;
        shape.detached = true;
        shape.editing = false;
        Ok(())
    }
}
