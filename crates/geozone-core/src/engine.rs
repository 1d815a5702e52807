//! Zone synchronization engine.
//!
//! The engine is the single writer that keeps the zone store and the
//! geometry surface consistent: surface events flow in, store mutations and
//! handle tag/style writes flow out. The surface is borrowed `&mut` for the
//! duration of one handler, so there are never two writers.

use crate::events::SurfaceEvent;
use crate::form::{DraftEdit, FormCommit, FormController};
use crate::store::ZoneStore;
use crate::surface::{DetachError, GeometrySurface, HandleId};
use crate::zone::{ShapeKind, ZoneId};
use thiserror::Error;

/// Errors the engine surfaces to the user. Everything else is recovered
/// locally: the offending batch item is logged and skipped, and the rest of
/// the batch still runs.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Form submitted with nothing selected.
    #[error("no zone selected - draw a shape on the map first")]
    NoZoneSelected,
    /// The surface refused to drop the zone's handle. The record is kept so
    /// the delete can be retried against it.
    #[error("could not detach zone {id} from the surface")]
    Detach {
        id: ZoneId,
        #[source]
        source: DetachError,
    },
}

/// Reconciles the zone store, the edit form, and the geometry surface.
#[derive(Debug, Default)]
pub struct SyncEngine {
    store: ZoneStore,
    form: FormController,
}

impl SyncEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &ZoneStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Forward a typed field edit to the draft form.
    pub fn set_field(&mut self, edit: DraftEdit) {
        self.form.set_field(edit);
    }

    /// Dispatch one surface event. Events are applied in arrival order,
    /// each to completion.
    pub fn apply(&mut self, surface: &mut dyn GeometrySurface, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Created { kind, handle } => {
                self.on_shape_created(surface, kind, handle);
            }
            SurfaceEvent::Edited { handles } => self.on_shape_edited(&*surface, &handles),
            SurfaceEvent::Deleted { handles } => self.on_shape_deleted(&*surface, &handles),
        }
    }

    /// A new shape was drawn: create its zone record from the current draft
    /// fields, tag the handle with the new id, push the draft color onto the
    /// handle's style, and clear the draft.
    ///
    /// Returns `None` when the handle's geometry cannot be read (foreign or
    /// already-removed handle), in which case nothing is created.
    pub fn on_shape_created(
        &mut self,
        surface: &mut dyn GeometrySurface,
        kind: ShapeKind,
        handle: HandleId,
    ) -> Option<ZoneId> {
        let Some(geometry) = surface.geometry(handle) else {
            log::warn!("created event for dead handle {handle:?}; ignoring");
            return None;
        };

        let color = self.form.draft().color;
        let id = self
            .store
            .create(self.form.draft(), kind, geometry, Some(handle));
        surface.set_tag(handle, id);
        surface.set_style(handle, color);
        self.form.clear_draft();
        log::info!("zone {id} created from {} drawing", kind.as_str());
        Some(id)
    }

    /// An edit pass finished: refresh the geometry of every tracked zone in
    /// the batch. Untagged handles are foreign geometry and are skipped;
    /// tags pointing at meanwhile-deleted zones are dropped silently
    /// (deletion wins).
    pub fn on_shape_edited(&mut self, surface: &dyn GeometrySurface, handles: &[HandleId]) {
        for &handle in handles {
            let Some(id) = surface.tag(handle) else {
                log::warn!("edited handle {handle:?} carries no zone tag; skipping");
                continue;
            };
            if self.store.get(id).is_none() {
                log::debug!("edit for deleted zone {id}; dropping");
                continue;
            }
            let Some(geometry) = surface.geometry(handle) else {
                log::warn!("edited handle {handle:?} has no readable geometry; skipping");
                continue;
            };
            self.store.update_geometry(id, geometry);
            log::debug!("zone {id} geometry refreshed");
        }
    }

    /// Shapes were removed on the surface: drop the matching zone records.
    /// The visual removal already happened on the surface side; only the
    /// records go. A deleted zone that was mid-edit clears the form.
    pub fn on_shape_deleted(&mut self, surface: &dyn GeometrySurface, handles: &[HandleId]) {
        for &handle in handles {
            let Some(id) = surface.tag(handle) else {
                log::warn!("deleted handle {handle:?} carries no zone tag; skipping");
                continue;
            };
            if self.store.get(id).is_none() {
                log::debug!("delete for already-removed zone {id}; dropping");
                continue;
            }
            self.store.remove(id);
            self.form.drop_selection(id);
            log::info!("zone {id} removed with its shape");
        }
    }

    /// Select a zone for editing. Unknown ids are a logged no-op.
    pub fn begin_edit(&mut self, surface: &mut dyn GeometrySurface, id: ZoneId) {
        let Some(zone) = self.store.get(id) else {
            log::warn!("edit requested for unknown zone {id}");
            return;
        };
        self.form.begin_edit(zone, surface);
    }

    /// Abandon the in-progress edit, leaving the handle edit-disabled.
    pub fn cancel_edit(&mut self, surface: &mut dyn GeometrySurface) {
        self.form.reset(surface);
    }

    /// Submit the form. A committed edit applies the metadata fields to the
    /// selected zone and, when its handle is live, pushes the new color onto
    /// the handle's style; the controller has already edit-disabled it.
    /// With nothing selected this is a user error and mutates nothing.
    pub fn on_form_commit(
        &mut self,
        surface: &mut dyn GeometrySurface,
    ) -> Result<ZoneId, SyncError> {
        match self.form.commit(surface) {
            FormCommit::Update { id, fields } => {
                let color = fields.color;
                self.store.update(id, fields);
                if let Some(handle) = self.store.get(id).and_then(|z| z.handle) {
                    if surface.contains(handle) {
                        surface.set_style(handle, color);
                    }
                }
                log::info!("zone {id} updated from form");
                Ok(id)
            }
            FormCommit::CreatePending => Err(SyncError::NoZoneSelected),
        }
    }

    /// Delete a zone from the list view: detach its live handle from the
    /// surface first, then drop the record. A failed detach keeps the record
    /// so the delete can be retried; a deleted zone that was mid-edit clears
    /// the form.
    pub fn delete_zone(
        &mut self,
        surface: &mut dyn GeometrySurface,
        id: ZoneId,
    ) -> Result<(), SyncError> {
        let Some(zone) = self.store.get(id) else {
            log::debug!("delete for unknown zone {id}; nothing to do");
            return Ok(());
        };
        if let Some(handle) = zone.handle {
            if surface.contains(handle) {
                surface
                    .remove(handle)
                    .map_err(|source| SyncError::Detach { id, source })?;
            }
        }
        self.store.remove(id);
        self.form.drop_selection(id);
        log::info!("zone {id} deleted");
        Ok(())
    }
}
