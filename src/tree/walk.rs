//! The single depth-first traversal shared by every tree operation.
//!
//! Order: the fields of a slot in sequence; for each field, the field itself and then each of
//! its slots in [`Field::slots`] order. The first `Break` ends the walk.

use super::SlotLocator;
use crate::field::Field;
use std::ops::ControlFlow;

/// A stop of the mutable walk.
pub enum Step<'a> {
    /// Entered a slot, before any of its fields.
    Slot {
        locator: &'a SlotLocator,
        fields: &'a mut Vec<Field>,
    },
    /// Reached the field at `index` of the slot.
    Field {
        locator: &'a SlotLocator,
        fields: &'a mut Vec<Field>,
        index: usize,
    },
}

/// Walks `root` read-only, handing each field with its owning slot and index to `visitor`.
pub fn walk<'t, B>(
    root: &'t [Field],
    visitor: &mut impl FnMut(&SlotLocator, usize, &'t Field) -> ControlFlow<B>,
) -> Option<B> {
    match walk_slot(&SlotLocator::Root, root, visitor) {
        ControlFlow::Break(value) => Some(value),
        ControlFlow::Continue(()) => None,
    }
}

fn walk_slot<'t, B>(
    locator: &SlotLocator,
    fields: &'t [Field],
    visitor: &mut impl FnMut(&SlotLocator, usize, &'t Field) -> ControlFlow<B>,
) -> ControlFlow<B> {
    for (index, field) in fields.iter().enumerate() {
        visitor(locator, index, field)?;
        for (child_locator, children) in field.slots() {
            walk_slot(&child_locator, children, visitor)?;
        }
    }
    ControlFlow::Continue(())
}

/// Walks `root` with mutable access to every slot.
///
/// A visitor may only change a slot's structure on the step where it breaks.
pub fn walk_mut<B>(
    root: &mut Vec<Field>,
    visitor: &mut impl FnMut(Step<'_>) -> ControlFlow<B>,
) -> Option<B> {
    match walk_slot_mut(&SlotLocator::Root, root, visitor) {
        ControlFlow::Break(value) => Some(value),
        ControlFlow::Continue(()) => None,
    }
}

fn walk_slot_mut<B>(
    locator: &SlotLocator,
    fields: &mut Vec<Field>,
    visitor: &mut impl FnMut(Step<'_>) -> ControlFlow<B>,
) -> ControlFlow<B> {
    visitor(Step::Slot {
        locator,
        fields: &mut *fields,
    })?;
    for index in 0..fields.len() {
        visitor(Step::Field {
            locator,
            fields: &mut *fields,
            index,
        })?;
        for (child_locator, children) in fields[index].slots_mut() {
            walk_slot_mut(&child_locator, children, visitor)?;
        }
    }
    ControlFlow::Continue(())
}
