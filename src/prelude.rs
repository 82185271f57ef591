//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the formsculptor
//! crate. Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use formsculptor::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/form.json")?;
//! let form = SavedForm::from_json(&json)?;
//!
//! let params: QueryParams = [("email", "ada@example.com")].into_iter().collect();
//! let run = FormRun::new(&form, &params);
//! for (id, state) in run.state().iter() {
//!     println!("{}: visible={} value={:?}", id, state.is_visible, state.value);
//! }
//! # Ok(())
//! # }
//! ```

// Field model
pub use crate::field::{
    Category, ControlTemplate, Field, FieldId, FieldKind, FieldOption, FieldType, HasHelperText,
    HasOptions, HasPlaceholder, Requirable, TextSubtype, palette, template_for,
};

// Tree operations and drag and drop
pub use crate::dnd::{DragController, DragSource, DropOutcome, DropTarget};
pub use crate::tree::{APPEND, FieldPatch, FieldTree, SlotLocator, Variant};

// Rules, formulas and derived state
pub use crate::formula::Formula;
pub use crate::logic::{
    ActionType, Condition, ConditionGroup, Conjunction, FieldState, FormState, LogicAction,
    LogicRule, Operator, QueryParams, evaluate, seed_values,
};
pub use crate::value::{InputValues, Value};

// Pagination, rendering and validation
pub use crate::pagination::{PageNavigator, Pagination, ProgressIndicator, paginate};
pub use crate::render::{FieldView, RenderDispatch, RenderKind, ValueChange, visible_views};
pub use crate::validation::{Validation, ValidationIssue};

// Forms, sessions and storage
pub use crate::form::{FormSettings, SavedForm, UrlParameterMapping};
pub use crate::preview::FormRun;
pub use crate::session::FormBuilder;
pub use crate::workspace::{
    DbState, FormLibrary, Identity, JsonFileRepository, MemoryRepository, Permission, Repository,
    StoreConfig,
};

// Error types
pub use crate::error::{FormulaError, LibraryError, StorageError, TreeError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
