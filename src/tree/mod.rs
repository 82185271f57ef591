//! The tree operations engine: lookup, insertion, removal and patching of fields anywhere in
//! the recursive field tree.
//!
//! All operations share one depth-first traversal ([`walk`]). Lookups resolve to the first
//! pre-order match, so a tree with duplicate ids (see [`FieldTree::duplicate_ids`]) behaves
//! deterministically without being rejected.

mod locator;
mod patch;
pub mod walk;

pub use locator::{SlotLocator, Variant};
pub use patch::FieldPatch;

use crate::error::TreeError;
use crate::field::Field;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use walk::Step;

/// Insertion position meaning "after the last field of the slot".
pub const APPEND: usize = usize::MAX;

/// The root sequence of a form's fields. Cloning yields an independent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTree {
    fields: Vec<Field>,
}

impl FieldTree {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// The top-level fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of fields at every depth.
    pub fn len(&self) -> usize {
        let mut count = 0;
        walk::walk::<()>(&self.fields, &mut |_, _, _| {
            count += 1;
            ControlFlow::Continue(())
        });
        count
    }

    /// Every field in pre-order.
    pub fn flatten(&self) -> Vec<&Field> {
        let mut out = Vec::new();
        walk::walk::<()>(&self.fields, &mut |_, _, field| {
            out.push(field);
            ControlFlow::Continue(())
        });
        out
    }

    pub fn find(&self, id: &str) -> Option<&Field> {
        walk::walk(&self.fields, &mut |_, _, field| {
            if field.id == id {
                ControlFlow::Break(field)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// The slot owning the field and the field's index within it.
    pub fn locate(&self, id: &str) -> Option<(SlotLocator, usize)> {
        walk::walk(&self.fields, &mut |locator, index, field| {
            if field.id == id {
                ControlFlow::Break((locator.clone(), index))
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Runs `f` on the field with `id`, returning its result, or `None` if no field matches.
    pub fn modify<R>(&mut self, id: &str, f: impl FnOnce(&mut Field) -> R) -> Option<R> {
        let mut f = Some(f);
        walk::walk_mut(&mut self.fields, &mut |step| match step {
            Step::Field { fields, index, .. } if fields[index].id == id => {
                match f.take() {
                    Some(f) => ControlFlow::Break(f(&mut fields[index])),
                    None => ControlFlow::Continue(()),
                }
            }
            _ => ControlFlow::Continue(()),
        })
    }

    /// Inserts `field` into the slot addressed by `target` at `position`, clamped to the
    /// slot's length. The tree is unchanged if the slot does not exist.
    pub fn insert(
        &mut self,
        target: &SlotLocator,
        field: Field,
        position: usize,
    ) -> Result<(), TreeError> {
        let field_id = field.id.clone();
        let mut pending = Some(field);
        let placed = walk::walk_mut(&mut self.fields, &mut |step| match step {
            Step::Slot { locator, fields } if locator == target => {
                let index = position.min(fields.len());
                if let Some(field) = pending.take() {
                    fields.insert(index, field);
                }
                ControlFlow::Break(index)
            }
            _ => ControlFlow::Continue(()),
        });

        match placed {
            Some(index) => {
                log::debug!("Inserted field '{}' into '{}' at {}", field_id, target, index);
                Ok(())
            }
            None => Err(TreeError::SlotNotFound {
                locator: target.to_string(),
            }),
        }
    }

    /// Detaches the field with `id` (and its whole subtree) from its slot.
    pub fn remove(&mut self, id: &str) -> Option<Field> {
        let removed = walk::walk_mut(&mut self.fields, &mut |step| match step {
            Step::Field { fields, index, .. } if fields[index].id == id => {
                ControlFlow::Break(fields.remove(index))
            }
            _ => ControlFlow::Continue(()),
        });
        if removed.is_some() {
            log::debug!("Removed field '{}'", id);
        }
        removed
    }

    /// Shallow-merges `patch` into the field with `id`.
    ///
    /// Returns `Ok(false)` if no field has that id. A rejected patch leaves the field as it was.
    pub fn update(&mut self, id: &str, patch: &FieldPatch) -> Result<bool, TreeError> {
        match self.modify(id, |field| patch.apply(field)) {
            Some(result) => result.map(|()| true),
            None => Ok(false),
        }
    }

    /// Ids that occur more than once, in first-occurrence order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen: AHashMap<&str, usize> = AHashMap::new();
        let mut order = Vec::new();
        for field in self.flatten() {
            let count = seen.entry(field.id.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(field.id.clone());
            }
        }
        order
    }
}

impl From<Vec<Field>> for FieldTree {
    fn from(fields: Vec<Field>) -> Self {
        Self::new(fields)
    }
}
