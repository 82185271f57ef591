use crate::field::FieldId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two arms of an A/B test container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    A,
    B,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::A => write!(f, "A"),
            Variant::B => write!(f, "B"),
        }
    }
}

/// Addresses one ordered child sequence ("slot") of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotLocator {
    /// The form's top-level sequence.
    Root,
    /// The children of a group or repeater.
    Children { container: FieldId },
    /// The children of one tab of a tabs field.
    Tab { container: FieldId, tab: String },
    /// One variant of an A/B test field.
    Variant { container: FieldId, variant: Variant },
}

impl SlotLocator {
    /// Container id used by drag sources to address the top-level sequence.
    pub const ROOT_ID: &'static str = "root";

    /// Builds a locator from the tags attached to a droppable area.
    ///
    /// `"root"` always resolves to [`SlotLocator::Root`]. A tab id takes precedence over a
    /// variant when both are given.
    pub fn from_parts(container_id: &str, tab_id: Option<&str>, variant: Option<Variant>) -> Self {
        if container_id == Self::ROOT_ID {
            return SlotLocator::Root;
        }
        let container = container_id.to_string();
        match (tab_id, variant) {
            (Some(tab), _) => SlotLocator::Tab {
                container,
                tab: tab.to_string(),
            },
            (None, Some(variant)) => SlotLocator::Variant { container, variant },
            (None, None) => SlotLocator::Children { container },
        }
    }

    /// The id of the owning container field, `None` for the root.
    pub fn container_id(&self) -> Option<&str> {
        match self {
            SlotLocator::Root => None,
            SlotLocator::Children { container }
            | SlotLocator::Tab { container, .. }
            | SlotLocator::Variant { container, .. } => Some(container),
        }
    }
}

impl fmt::Display for SlotLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotLocator::Root => write!(f, "{}", Self::ROOT_ID),
            SlotLocator::Children { container } => write!(f, "{}", container),
            SlotLocator::Tab { container, tab } => write!(f, "{}/tab:{}", container, tab),
            SlotLocator::Variant { container, variant } => {
                write!(f, "{}/variant:{}", container, variant)
            }
        }
    }
}
