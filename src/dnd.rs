//! The drag-and-drop orchestrator.
//!
//! Translates drag gestures into tree operations. Hit-testing belongs to the collaborator
//! driving the gesture: a drop receives exactly one already-resolved [`DropTarget`].

use crate::field::{Field, FieldId, FieldType, TextSubtype, fresh_id};
use crate::tree::{APPEND, FieldTree, SlotLocator, Variant};

/// Id carried by the preview instance of a palette drag. Never inserted into a tree.
pub const DRAG_PREVIEW_ID: &str = "__drag_preview__";

/// What started the drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A palette template.
    Control {
        field_type: FieldType,
        subtype: Option<TextSubtype>,
    },
    /// A field already placed on the canvas.
    Field { field_id: FieldId },
}

/// The resolved element under the pointer on release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Another field: the dragged field lands immediately before it.
    Field { field_id: FieldId },
    /// A droppable slot: the dragged field is appended to it.
    Slot(SlotLocator),
}

impl DropTarget {
    /// Builds a target from the tags a droppable area or sortable field carries.
    pub fn from_tags(
        over_id: &str,
        is_container: bool,
        container_id: Option<&str>,
        tab_id: Option<&str>,
        variant: Option<Variant>,
    ) -> Self {
        if is_container {
            let container = container_id.unwrap_or(SlotLocator::ROOT_ID);
            DropTarget::Slot(SlotLocator::from_parts(container, tab_id, variant))
        } else {
            DropTarget::Field {
                field_id: over_id.to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    /// Preview of the field a palette drop would create.
    Template {
        field_type: FieldType,
        subtype: Option<TextSubtype>,
        preview: Field,
    },
    /// Copy of the field being moved.
    Existing(Field),
}

impl DragPayload {
    /// The field to draw under the pointer.
    pub fn field(&self) -> &Field {
        match self {
            DragPayload::Template { preview, .. } => preview,
            DragPayload::Existing(field) => field,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragPayload),
}

/// Result of releasing a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// A palette template became a new field. It should become the selection.
    Inserted { field_id: FieldId, slot: SlotLocator },
    /// An existing field moved to `slot`.
    Moved { field_id: FieldId, slot: SlotLocator },
    /// Nothing changed: same-id drop, unresolvable target, or a move into the field's own
    /// subtree.
    Unchanged,
    /// No target, or no drag in progress.
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        match &self.state {
            DragState::Dragging(payload) => Some(payload),
            DragState::Idle => None,
        }
    }

    /// Starts a drag. Returns `None`, staying idle, if a field source is not in `tree`.
    pub fn begin(&mut self, source: DragSource, tree: &FieldTree) -> Option<&DragPayload> {
        let payload = match source {
            DragSource::Control {
                field_type,
                subtype,
            } => DragPayload::Template {
                field_type,
                subtype,
                preview: Field::new(DRAG_PREVIEW_ID, field_type, subtype),
            },
            DragSource::Field { field_id } => match tree.find(&field_id) {
                Some(field) => DragPayload::Existing(field.clone()),
                None => {
                    log::warn!("Drag started on unknown field '{}'", field_id);
                    self.state = DragState::Idle;
                    return None;
                }
            },
        };
        log::debug!("Drag started with '{}'", payload.field().label);
        self.state = DragState::Dragging(payload);
        self.payload()
    }

    /// Abandons the drag without touching any tree.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Releases the drag over `target` and applies the resulting mutation to `tree`.
    pub fn drop(&mut self, target: Option<DropTarget>, tree: &mut FieldTree) -> DropOutcome {
        let state = std::mem::take(&mut self.state);
        let (payload, target) = match (state, target) {
            (DragState::Dragging(payload), Some(target)) => (payload, target),
            _ => return DropOutcome::Cancelled,
        };

        match payload {
            DragPayload::Template {
                field_type,
                subtype,
                ..
            } => insert_new(tree, Field::new(fresh_id(), field_type, subtype), target),
            DragPayload::Existing(field) => move_existing(tree, &field.id, target),
        }
    }
}

fn insert_new(tree: &mut FieldTree, field: Field, target: DropTarget) -> DropOutcome {
    let slot = match target {
        DropTarget::Slot(locator) => locator,
        DropTarget::Field { field_id } => match tree.locate(&field_id) {
            Some((locator, _)) => locator,
            None => return DropOutcome::Unchanged,
        },
    };
    let field_id = field.id.clone();
    match tree.insert(&slot, field, APPEND) {
        Ok(()) => {
            log::info!("Dropped new field '{}' into '{}'", field_id, slot);
            DropOutcome::Inserted { field_id, slot }
        }
        Err(e) => {
            log::warn!("Palette drop discarded: {}", e);
            DropOutcome::Unchanged
        }
    }
}

fn move_existing(tree: &mut FieldTree, field_id: &str, target: DropTarget) -> DropOutcome {
    if let DropTarget::Field { field_id: over } = &target {
        if over == field_id {
            return DropOutcome::Unchanged;
        }
    }

    let mut snapshot = tree.clone();
    let Some(field) = snapshot.remove(field_id) else {
        return DropOutcome::Unchanged;
    };
    let (slot, index) = match target {
        DropTarget::Slot(locator) => (locator, APPEND),
        DropTarget::Field { field_id: over } => match snapshot.locate(&over) {
            Some(location) => location,
            // The target sat inside the moved subtree.
            None => return DropOutcome::Unchanged,
        },
    };

    match snapshot.insert(&slot, field, index) {
        Ok(()) => {
            *tree = snapshot;
            log::info!("Moved field '{}' into '{}'", field_id, slot);
            DropOutcome::Moved {
                field_id: field_id.to_string(),
                slot,
            }
        }
        Err(e) => {
            log::warn!("Move of '{}' discarded: {}", field_id, e);
            DropOutcome::Unchanged
        }
    }
}
