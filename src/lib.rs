//! # FormSculptor - Form Tree and Rule Evaluation Engine
//!
//! **FormSculptor** is the engine behind a visual form builder. It owns the recursive tree of
//! form fields (including containers such as groups, tabs, repeaters and A/B variants), turns
//! drag-and-drop gestures into atomic tree edits, and evaluates each field's declarative rules
//! and formulas into the derived state a renderer draws.
//!
//! ## Core Workflow
//!
//! 1.  **Build**: Edit a [`SavedForm`](form::SavedForm) through a [`FormBuilder`](session::FormBuilder):
//!     add fields from palette templates, patch their properties, and move them with the
//!     [`DragController`](dnd::DragController).
//! 2.  **Evaluate**: Seed the input values from defaults and URL parameters, then compute the
//!     [`FormState`](logic::FormState) (visibility, read-only flags, values, calculated fields).
//! 3.  **Render**: Split the form into pages and hand the visible [`FieldView`](render::FieldView)s
//!     to your [`RenderDispatch`](render::RenderDispatch) implementation.
//! 4.  **Persist**: Store forms per organization in a [`FormLibrary`](workspace::FormLibrary)
//!     backed by any [`Repository`](workspace::Repository).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formsculptor::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut builder = FormBuilder::new(SavedForm::new("org_default"));
//!
//! // Two numeric inputs and a calculated total.
//! let price = builder.add_field(&SlotLocator::Root, FieldType::TextField, None, APPEND)?;
//! let quantity = builder.add_field(&SlotLocator::Root, FieldType::TextField, None, APPEND)?;
//! let total = builder.add_field(&SlotLocator::Root, FieldType::CalculatedField, None, APPEND)?;
//! let formula = format!("{{{}}} * {{{}}}", price, quantity);
//! builder.update_field(&total, &FieldPatch::new().property("formula", formula.into()))?;
//!
//! // Run it the way a respondent would.
//! let mut run = builder.preview(&QueryParams::new());
//! run.set_value(price.clone(), Value::from(4));
//! let state = run.set_value(quantity.clone(), Value::from(3));
//! assert_eq!(state.value(&total), Some(&Value::from("12")));
//! # Ok(())
//! # }
//! ```

pub mod dnd;
pub mod error;
pub mod field;
pub mod form;
pub mod formula;
pub mod logic;
pub mod pagination;
pub mod prelude;
pub mod preview;
pub mod render;
pub mod session;
pub mod tree;
pub mod validation;
pub mod value;
pub mod workspace;
