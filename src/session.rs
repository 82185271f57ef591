//! The editing session behind the builder canvas.

use crate::dnd::{DragController, DragPayload, DragSource, DropOutcome, DropTarget};
use crate::error::{LibraryError, TreeError};
use crate::field::{Field, FieldId, FieldType, Tab, TextSubtype, fresh_id};
use crate::form::{FormSettings, SavedForm};
use crate::logic::QueryParams;
use crate::preview::FormRun;
use crate::tree::{FieldPatch, FieldTree, SlotLocator};
use crate::workspace::{FormLibrary, Identity};

/// A form being edited, the current selection and any drag in progress.
#[derive(Debug, Clone)]
pub struct FormBuilder {
    form: SavedForm,
    selected: Option<FieldId>,
    drag: DragController,
}

impl FormBuilder {
    pub fn new(form: SavedForm) -> Self {
        Self {
            form,
            selected: None,
            drag: DragController::new(),
        }
    }

    pub fn form(&self) -> &SavedForm {
        &self.form
    }

    pub fn fields(&self) -> &FieldTree {
        &self.form.fields
    }

    pub fn settings(&self) -> &FormSettings {
        &self.form.form_settings
    }

    pub fn set_settings(&mut self, settings: FormSettings) {
        self.form.form_settings = settings;
    }

    pub fn into_form(self) -> SavedForm {
        self.form
    }

    // --- Selection ---

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Field> {
        self.selected.as_deref().and_then(|id| self.form.fields.find(id))
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    // --- Field operations ---

    /// Creates a field from its type template and inserts it; the new field is selected.
    pub fn add_field(
        &mut self,
        target: &SlotLocator,
        field_type: FieldType,
        subtype: Option<TextSubtype>,
        position: usize,
    ) -> Result<FieldId, TreeError> {
        let field = Field::new(fresh_id(), field_type, subtype);
        let id = field.id.clone();
        self.form.fields.insert(target, field, position)?;
        self.selected = Some(id.clone());
        Ok(id)
    }

    /// Deletes a field with its subtree. Clears the selection.
    pub fn remove_field(&mut self, id: &str) -> Option<Field> {
        let removed = self.form.fields.remove(id);
        if removed.is_some() {
            self.selected = None;
        }
        removed
    }

    pub fn update_field(&mut self, id: &str, patch: &FieldPatch) -> Result<bool, TreeError> {
        self.form.fields.update(id, patch)
    }

    fn edit<R>(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut Field) -> Result<R, TreeError>,
    ) -> Result<R, TreeError> {
        self.form
            .fields
            .modify(id, edit)
            .unwrap_or_else(|| Err(TreeError::FieldNotFound(id.to_string())))
    }

    pub fn add_option(&mut self, field_id: &str, label: &str) -> Result<String, TreeError> {
        self.edit(field_id, |field| field.add_option(label))
    }

    pub fn remove_option(&mut self, field_id: &str, option_id: &str) -> Result<bool, TreeError> {
        self.edit(field_id, |field| field.remove_option(option_id))
    }

    pub fn rename_option(
        &mut self,
        field_id: &str,
        option_id: &str,
        label: &str,
    ) -> Result<bool, TreeError> {
        self.edit(field_id, |field| field.rename_option(option_id, label))
    }

    pub fn add_tab(&mut self, field_id: &str, label: &str) -> Result<String, TreeError> {
        self.edit(field_id, |field| field.add_tab(label))
    }

    /// Removes a tab and everything in it. Clears the selection if it was inside.
    pub fn remove_tab(&mut self, field_id: &str, tab_id: &str) -> Result<Option<Tab>, TreeError> {
        let removed = self.edit(field_id, |field| field.remove_tab(tab_id))?;
        if self.selected.as_deref().is_some_and(|id| !self.form.fields.contains(id)) {
            self.selected = None;
        }
        Ok(removed)
    }

    // --- Drag and drop ---

    /// Starts a drag. Dragging a placed field also selects it.
    pub fn begin_drag(&mut self, source: DragSource) -> bool {
        let Some(payload) = self.drag.begin(source, &self.form.fields) else {
            return false;
        };
        if let DragPayload::Existing(field) = payload {
            self.selected = Some(field.id.clone());
        }
        true
    }

    pub fn drag_payload(&self) -> Option<&DragPayload> {
        self.drag.payload()
    }

    pub fn drop(&mut self, target: Option<DropTarget>) -> DropOutcome {
        let outcome = self.drag.drop(target, &mut self.form.fields);
        if let DropOutcome::Inserted { field_id, .. } = &outcome {
            self.selected = Some(field_id.clone());
        }
        outcome
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    // --- Preview and persistence ---

    /// Opens the form as a respondent would see it.
    pub fn preview(&self, params: &QueryParams) -> FormRun {
        FormRun::new(&self.form, params)
    }

    /// Saves through the library and adopts the stamped copy.
    pub fn save(&mut self, library: &mut FormLibrary, who: &Identity) -> Result<(), LibraryError> {
        self.form = library.save(who, self.form.clone())?;
        Ok(())
    }
}
