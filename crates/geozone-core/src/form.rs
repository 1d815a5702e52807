//! Selection and draft form state.

use crate::surface::{GeometrySurface, HandleId};
use crate::zone::{Color, ShapeKind, Zone, ZoneFields, ZoneId};

/// Draft field values held by the form before a commit.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftFields {
    pub title: String,
    pub description: String,
    pub color: Color,
    /// Drawing tool to arm next, or the kind of the zone under edit.
    /// Display/tool-selection only; a zone's kind never changes.
    pub shape_kind: Option<ShapeKind>,
}

impl Default for DraftFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            color: Color::default(),
            shape_kind: None,
        }
    }
}

impl DraftFields {
    fn from_zone(zone: &Zone) -> Self {
        Self {
            title: zone.title.clone(),
            description: zone.description.clone(),
            color: zone.color,
            shape_kind: Some(zone.shape_kind),
        }
    }

    fn into_fields(self) -> ZoneFields {
        ZoneFields {
            title: self.title,
            description: self.description,
            color: self.color,
        }
    }
}

/// A typed edit to one draft field.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    Title(String),
    Description(String),
    Color(Color),
    /// Arms the drawing tool for the next shape. Ignored on commit for
    /// zones that already exist.
    ShapeKind(ShapeKind),
}

/// Outcome of submitting the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormCommit {
    /// A zone was selected: apply `fields` to it.
    Update { id: ZoneId, fields: ZoneFields },
    /// Nothing selected; a shape has to be drawn before it can be saved.
    CreatePending,
}

#[derive(Debug, Clone, Copy)]
struct EditSession {
    id: ZoneId,
    /// The zone's handle at `begin_edit` time, already filtered for liveness.
    handle: Option<HandleId>,
}

/// Tracks the at-most-one zone under edit plus the draft field values.
///
/// States are Idle and Editing(id). `begin_edit` is the only way in;
/// `commit` and `reset` are the only ways out, and both leave the surface
/// handle edit-disabled so no dangling editable handle survives the
/// transition.
#[derive(Debug, Default)]
pub struct FormController {
    session: Option<EditSession>,
    draft: DraftFields,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the zone under edit, if any.
    pub fn selected(&self) -> Option<ZoneId> {
        self.session.map(|s| s.id)
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Current draft values.
    pub fn draft(&self) -> &DraftFields {
        &self.draft
    }

    /// Select `zone` for editing, load its fields into the draft, and enable
    /// the editing-handle UI on its live handle.
    ///
    /// Editing metadata without live geometry is permitted: a dead or absent
    /// handle is a logged, recoverable condition. Switching directly from
    /// another zone first edit-disables the previous handle.
    pub fn begin_edit(&mut self, zone: &Zone, surface: &mut dyn GeometrySurface) {
        if let Some(previous) = self.session.take() {
            if previous.id != zone.id {
                if let Some(handle) = previous.handle {
                    surface.set_editing(handle, false);
                }
            }
        }

        let handle = zone.handle.filter(|h| surface.contains(*h));
        match handle {
            Some(h) => surface.set_editing(h, true),
            None => log::warn!("zone {} has no live handle; editing metadata only", zone.id),
        }

        self.session = Some(EditSession { id: zone.id, handle });
        self.draft = DraftFields::from_zone(zone);
        log::debug!("editing zone {}", zone.id);
    }

    /// Apply one typed field edit to the draft.
    pub fn set_field(&mut self, edit: DraftEdit) {
        match edit {
            DraftEdit::Title(title) => self.draft.title = title,
            DraftEdit::Description(description) => self.draft.description = description,
            DraftEdit::Color(color) => self.draft.color = color,
            DraftEdit::ShapeKind(kind) => self.draft.shape_kind = Some(kind),
        }
    }

    /// Submit the form.
    ///
    /// When a zone is selected, returns its id and the draft fields for the
    /// sync engine to apply, clears the selection, and edit-disables the
    /// zone's handle. When nothing is selected, returns
    /// [`FormCommit::CreatePending`] and mutates nothing.
    pub fn commit(&mut self, surface: &mut dyn GeometrySurface) -> FormCommit {
        match self.session.take() {
            Some(session) => {
                if let Some(handle) = session.handle {
                    surface.set_editing(handle, false);
                }
                let fields = std::mem::take(&mut self.draft).into_fields();
                FormCommit::Update {
                    id: session.id,
                    fields,
                }
            }
            None => FormCommit::CreatePending,
        }
    }

    /// Abandon the in-progress edit: clear the selection, restore draft
    /// defaults, and edit-disable the remembered handle.
    pub fn reset(&mut self, surface: &mut dyn GeometrySurface) {
        if let Some(session) = self.session.take() {
            if let Some(handle) = session.handle {
                surface.set_editing(handle, false);
            }
        }
        self.draft = DraftFields::default();
    }

    /// Restore the draft to its defaults without touching the selection.
    pub(crate) fn clear_draft(&mut self) {
        self.draft = DraftFields::default();
    }

    /// Drop the selection if it references `id`. Used when the zone is
    /// removed by another flow; its handle is already gone, so there is
    /// nothing to edit-disable.
    pub(crate) fn drop_selection(&mut self, id: ZoneId) {
        if self.session.as_ref().is_some_and(|s| s.id == id) {
            self.session = None;
            self.draft = DraftFields::default();
            log::debug!("zone {id} deleted while under edit; selection cleared");
        }
    }
}
