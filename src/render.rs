//! The boundary to whatever draws the form.
//!
//! The engine decides *what* is shown (visible fields, their derived state and their child
//! slots); a [`RenderDispatch`] implementation decides *how*.

use crate::field::{Field, FieldId, FieldKind, FieldType};
use crate::logic::{FieldState, FormState};
use crate::tree::SlotLocator;
use crate::value::Value;

/// The rendering family of a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    /// Accepts free or structured input.
    Input,
    /// Picks from a list of options.
    Choice,
    /// Shows a value derived from other fields.
    Computed,
    /// Static content.
    Layout,
    /// Hosts child slots.
    Container,
    /// Consumed by pagination, never rendered inline.
    Structural,
}

impl RenderKind {
    pub fn of(field_type: FieldType) -> Self {
        match field_type {
            FieldType::TextField
            | FieldType::TextareaField
            | FieldType::CheckboxField
            | FieldType::DatePickerField
            | FieldType::TimeField
            | FieldType::DateTimeField
            | FieldType::FileUploadField
            | FieldType::SignatureField
            | FieldType::RatingField
            | FieldType::SliderField
            | FieldType::MatrixField
            | FieldType::GeolocationField
            | FieldType::PaymentField => RenderKind::Input,
            FieldType::SelectField | FieldType::RadioGroupField | FieldType::LookupField => {
                RenderKind::Choice
            }
            FieldType::CalculatedField => RenderKind::Computed,
            FieldType::SectionBreak | FieldType::ImageField | FieldType::HtmlField => {
                RenderKind::Layout
            }
            FieldType::GroupField
            | FieldType::RepeaterField
            | FieldType::TabsField
            | FieldType::AbTestField => RenderKind::Container,
            FieldType::PageBreak | FieldType::ProgressTrackerField => RenderKind::Structural,
        }
    }
}

/// A field paired with its derived state.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub field: &'a Field,
    pub state: &'a FieldState,
    form: &'a FormState,
}

/// One child slot of a container, with the views it renders.
#[derive(Debug, Clone)]
pub struct ChildSlot<'a> {
    pub locator: SlotLocator,
    /// The tab label, for tabs.
    pub label: Option<&'a str>,
    pub views: Vec<FieldView<'a>>,
}

impl<'a> FieldView<'a> {
    pub fn kind(&self) -> RenderKind {
        RenderKind::of(self.field.field_type())
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.state.value.as_ref()
    }

    pub fn is_read_only(&self) -> bool {
        self.state.is_read_only
    }

    /// The child slots to render. A/B tests render variant A only.
    pub fn children(&self) -> Vec<ChildSlot<'a>> {
        let form = self.form;
        let slot = |locator: SlotLocator, label: Option<&'a str>, fields: &'a [Field]| ChildSlot {
            locator,
            label,
            views: visible_views(fields, form),
        };
        let container = || self.field.id.clone();
        match &self.field.kind {
            FieldKind::GroupField(config) => {
                vec![slot(SlotLocator::Children { container: container() }, None, &config.children)]
            }
            FieldKind::RepeaterField(config) => {
                vec![slot(SlotLocator::Children { container: container() }, None, &config.children)]
            }
            FieldKind::TabsField(config) => config
                .tabs
                .iter()
                .map(|tab| {
                    let locator = SlotLocator::Tab {
                        container: container(),
                        tab: tab.id.clone(),
                    };
                    slot(locator, Some(tab.label.as_str()), &tab.children)
                })
                .collect(),
            FieldKind::AbTestField(config) => {
                let locator = SlotLocator::Variant {
                    container: container(),
                    variant: crate::tree::Variant::A,
                };
                vec![slot(locator, None, &config.variant_a)]
            }
            _ => Vec::new(),
        }
    }
}

/// The views of `fields` that should be drawn: visible, with a derived state, and not
/// structural.
pub fn visible_views<'a>(
    fields: impl IntoIterator<Item = &'a Field>,
    state: &'a FormState,
) -> Vec<FieldView<'a>> {
    fields
        .into_iter()
        .filter_map(|field| {
            let field_state = state.get(&field.id)?;
            let view = FieldView {
                field,
                state: field_state,
                form: state,
            };
            (field_state.is_visible && view.kind() != RenderKind::Structural).then_some(view)
        })
        .collect()
}

/// Implemented by the collaborator that turns views into widgets.
pub trait RenderDispatch {
    type Output;

    fn render(&mut self, view: &FieldView<'_>) -> Self::Output;

    fn render_all(&mut self, views: &[FieldView<'_>]) -> Vec<Self::Output> {
        views.iter().map(|view| self.render(view)).collect()
    }
}

/// A respondent edit, fed back into the preview runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub field_id: FieldId,
    pub value: Value,
}

impl ValueChange {
    pub fn new(field_id: impl Into<FieldId>, value: impl Into<Value>) -> Self {
        Self {
            field_id: field_id.into(),
            value: value.into(),
        }
    }
}
