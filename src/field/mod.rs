//! The field model: the recursive [`Field`] record, its closed set of [`FieldType`]s and the
//! per-type configurations held by [`FieldKind`].

mod config;
pub mod palette;

pub use config::*;
pub use palette::{Category, ControlTemplate, palette, template_for};

use crate::error::TreeError;
use crate::logic::LogicRule;
use crate::tree::{SlotLocator, Variant};
use crate::validation::Validation;
use crate::value::{Value, deserialize_present};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identifier of a field, unique across a form's entire tree.
pub type FieldId = String;

/// Generates a fresh identifier for fields, tabs, options and forms.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// One element of a form.
///
/// The common properties live on the struct; everything type-specific (including the child
/// slots of container fields) lives in [`FieldKind`], flattened next to them in JSON under a
/// `type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    pub label: String,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, Value>,
    #[serde(default)]
    pub logic: Vec<LogicRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Type-specific configuration, discriminated by the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldKind {
    TextField(TextConfig),
    TextareaField(TextareaConfig),
    SelectField(SelectConfig),
    CheckboxField(InputConfig),
    RadioGroupField(RadioGroupConfig),
    DatePickerField(InputConfig),
    TimeField(InputConfig),
    DateTimeField(InputConfig),
    FileUploadField(FileUploadConfig),
    SignatureField(InputConfig),
    RatingField(RatingConfig),
    SliderField(SliderConfig),
    SectionBreak(SectionBreakConfig),
    CalculatedField(CalculatedConfig),
    GroupField(GroupConfig),
    PageBreak,
    TabsField(TabsConfig),
    ImageField(ImageConfig),
    HtmlField(HtmlConfig),
    MatrixField(MatrixConfig),
    LookupField(LookupConfig),
    GeolocationField(InputConfig),
    PaymentField(PaymentConfig),
    RepeaterField(RepeaterConfig),
    ProgressTrackerField,
    #[serde(rename = "ABTestField")]
    AbTestField(AbTestConfig),
}

/// The closed set of field type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    TextField,
    TextareaField,
    SelectField,
    CheckboxField,
    RadioGroupField,
    DatePickerField,
    TimeField,
    DateTimeField,
    FileUploadField,
    SignatureField,
    RatingField,
    SliderField,
    SectionBreak,
    CalculatedField,
    GroupField,
    PageBreak,
    TabsField,
    ImageField,
    HtmlField,
    MatrixField,
    LookupField,
    GeolocationField,
    PaymentField,
    RepeaterField,
    ProgressTrackerField,
    #[serde(rename = "ABTestField")]
    AbTestField,
}

impl FieldType {
    pub const ALL: [FieldType; 26] = [
        FieldType::TextField,
        FieldType::TextareaField,
        FieldType::SelectField,
        FieldType::CheckboxField,
        FieldType::RadioGroupField,
        FieldType::DatePickerField,
        FieldType::TimeField,
        FieldType::DateTimeField,
        FieldType::FileUploadField,
        FieldType::SignatureField,
        FieldType::RatingField,
        FieldType::SliderField,
        FieldType::SectionBreak,
        FieldType::CalculatedField,
        FieldType::GroupField,
        FieldType::PageBreak,
        FieldType::TabsField,
        FieldType::ImageField,
        FieldType::HtmlField,
        FieldType::MatrixField,
        FieldType::LookupField,
        FieldType::GeolocationField,
        FieldType::PaymentField,
        FieldType::RepeaterField,
        FieldType::ProgressTrackerField,
        FieldType::AbTestField,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::TextField => "TextField",
            FieldType::TextareaField => "TextareaField",
            FieldType::SelectField => "SelectField",
            FieldType::CheckboxField => "CheckboxField",
            FieldType::RadioGroupField => "RadioGroupField",
            FieldType::DatePickerField => "DatePickerField",
            FieldType::TimeField => "TimeField",
            FieldType::DateTimeField => "DateTimeField",
            FieldType::FileUploadField => "FileUploadField",
            FieldType::SignatureField => "SignatureField",
            FieldType::RatingField => "RatingField",
            FieldType::SliderField => "SliderField",
            FieldType::SectionBreak => "SectionBreak",
            FieldType::CalculatedField => "CalculatedField",
            FieldType::GroupField => "GroupField",
            FieldType::PageBreak => "PageBreak",
            FieldType::TabsField => "TabsField",
            FieldType::ImageField => "ImageField",
            FieldType::HtmlField => "HtmlField",
            FieldType::MatrixField => "MatrixField",
            FieldType::LookupField => "LookupField",
            FieldType::GeolocationField => "GeolocationField",
            FieldType::PaymentField => "PaymentField",
            FieldType::RepeaterField => "RepeaterField",
            FieldType::ProgressTrackerField => "ProgressTrackerField",
            FieldType::AbTestField => "ABTestField",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            FieldType::GroupField
                | FieldType::RepeaterField
                | FieldType::TabsField
                | FieldType::AbTestField
        )
    }

    /// Builds a fully defaulted field of this type.
    pub fn construct(self, id: impl Into<FieldId>) -> Field {
        Field::new(id, self, None)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::TextField(_) => FieldType::TextField,
            Self::TextareaField(_) => FieldType::TextareaField,
            Self::SelectField(_) => FieldType::SelectField,
            Self::CheckboxField(_) => FieldType::CheckboxField,
            Self::RadioGroupField(_) => FieldType::RadioGroupField,
            Self::DatePickerField(_) => FieldType::DatePickerField,
            Self::TimeField(_) => FieldType::TimeField,
            Self::DateTimeField(_) => FieldType::DateTimeField,
            Self::FileUploadField(_) => FieldType::FileUploadField,
            Self::SignatureField(_) => FieldType::SignatureField,
            Self::RatingField(_) => FieldType::RatingField,
            Self::SliderField(_) => FieldType::SliderField,
            Self::SectionBreak(_) => FieldType::SectionBreak,
            Self::CalculatedField(_) => FieldType::CalculatedField,
            Self::GroupField(_) => FieldType::GroupField,
            Self::PageBreak => FieldType::PageBreak,
            Self::TabsField(_) => FieldType::TabsField,
            Self::ImageField(_) => FieldType::ImageField,
            Self::HtmlField(_) => FieldType::HtmlField,
            Self::MatrixField(_) => FieldType::MatrixField,
            Self::LookupField(_) => FieldType::LookupField,
            Self::GeolocationField(_) => FieldType::GeolocationField,
            Self::PaymentField(_) => FieldType::PaymentField,
            Self::RepeaterField(_) => FieldType::RepeaterField,
            Self::ProgressTrackerField => FieldType::ProgressTrackerField,
            Self::AbTestField(_) => FieldType::AbTestField,
        }
    }
}

const HELPER_TEXT: &str = "Helper text";
const PLACEHOLDER: &str = "Value here...";

fn placeholder_option() -> FieldOption {
    FieldOption {
        id: fresh_id(),
        label: "Option 1".to_string(),
        value: "option1".to_string(),
    }
}

fn axis(label: &str) -> MatrixAxis {
    MatrixAxis {
        id: fresh_id(),
        label: label.to_string(),
    }
}

fn input(helper_text: &str) -> InputConfig {
    InputConfig {
        helper_text: helper_text.to_string(),
        required: false,
    }
}

impl Field {
    /// Builds a field with the palette defaults of `field_type`.
    ///
    /// `subtype` only matters for `TextField`; it is ignored for every other type.
    pub fn new(id: impl Into<FieldId>, field_type: FieldType, subtype: Option<TextSubtype>) -> Self {
        let mut default_value = Some(Value::Text(String::new()));
        let (label, kind) = match field_type {
            FieldType::TextField => {
                let subtype = subtype.unwrap_or_default();
                let kind = FieldKind::TextField(TextConfig {
                    subtype,
                    placeholder: PLACEHOLDER.to_string(),
                    helper_text: HELPER_TEXT.to_string(),
                    required: false,
                });
                (subtype.default_label(), kind)
            }
            FieldType::TextareaField => (
                "Textarea Field",
                FieldKind::TextareaField(TextareaConfig {
                    placeholder: PLACEHOLDER.to_string(),
                    helper_text: HELPER_TEXT.to_string(),
                    required: false,
                    rows: 3,
                    rich_text: false,
                }),
            ),
            FieldType::SelectField => (
                "Select Field",
                FieldKind::SelectField(SelectConfig {
                    placeholder: "Select an option".to_string(),
                    helper_text: HELPER_TEXT.to_string(),
                    required: false,
                    options: vec![placeholder_option()],
                    searchable: false,
                }),
            ),
            FieldType::CheckboxField => {
                default_value = Some(Value::Bool(false));
                ("Checkbox Field", FieldKind::CheckboxField(input(HELPER_TEXT)))
            }
            FieldType::RadioGroupField => (
                "Radio Group",
                FieldKind::RadioGroupField(RadioGroupConfig {
                    helper_text: HELPER_TEXT.to_string(),
                    required: false,
                    options: vec![placeholder_option()],
                }),
            ),
            FieldType::DatePickerField => {
                ("Date Picker", FieldKind::DatePickerField(input(HELPER_TEXT)))
            }
            FieldType::TimeField => ("Time Picker", FieldKind::TimeField(input(HELPER_TEXT))),
            FieldType::DateTimeField => {
                ("Date Time Picker", FieldKind::DateTimeField(input(HELPER_TEXT)))
            }
            FieldType::FileUploadField => (
                "File Upload",
                FieldKind::FileUploadField(FileUploadConfig {
                    helper_text: HELPER_TEXT.to_string(),
                    required: false,
                    multiple: false,
                    max_size_in_mb: 5.0,
                    allowed_file_types: String::new(),
                }),
            ),
            FieldType::SignatureField => {
                ("Signature", FieldKind::SignatureField(input("Please sign here")))
            }
            FieldType::RatingField => {
                default_value = Some(Value::Number(0.0));
                (
                    "Rating",
                    FieldKind::RatingField(RatingConfig {
                        helper_text: "Rate your experience".to_string(),
                        required: false,
                        max_rating: 5,
                    }),
                )
            }
            FieldType::SliderField => {
                default_value = Some(Value::Number(50.0));
                (
                    "Slider",
                    FieldKind::SliderField(SliderConfig {
                        helper_text: "Select a value".to_string(),
                        required: false,
                        min: 0.0,
                        max: 100.0,
                        step: 1.0,
                    }),
                )
            }
            FieldType::SectionBreak => (
                "Section Break",
                FieldKind::SectionBreak(SectionBreakConfig {
                    description: "A description for the new section".to_string(),
                }),
            ),
            FieldType::CalculatedField => (
                "Calculated Field",
                FieldKind::CalculatedField(CalculatedConfig {
                    helper_text: "This field is calculated automatically".to_string(),
                    formula: String::new(),
                    formatting: Formatting::None,
                }),
            ),
            FieldType::GroupField => (
                "Container",
                FieldKind::GroupField(GroupConfig {
                    columns: 1,
                    children: Vec::new(),
                }),
            ),
            FieldType::PageBreak => ("Page Break", FieldKind::PageBreak),
            FieldType::TabsField => (
                "Tabs",
                FieldKind::TabsField(TabsConfig {
                    tabs: ["Tab 1", "Tab 2"]
                        .into_iter()
                        .map(|label| Tab {
                            id: fresh_id(),
                            label: label.to_string(),
                            children: Vec::new(),
                        })
                        .collect(),
                }),
            ),
            FieldType::ImageField => (
                "Image",
                FieldKind::ImageField(ImageConfig {
                    src: "https://via.placeholder.com/400x200".to_string(),
                    alt: "Placeholder Image".to_string(),
                    width: "100%".to_string(),
                    height: "auto".to_string(),
                }),
            ),
            FieldType::HtmlField => (
                "HTML Embed",
                FieldKind::HtmlField(HtmlConfig {
                    html: "<p>Your custom HTML here.</p>".to_string(),
                }),
            ),
            FieldType::MatrixField => (
                "Matrix Table",
                FieldKind::MatrixField(MatrixConfig {
                    helper_text: "Fill out the table below.".to_string(),
                    rows: vec![axis("Row 1"), axis("Row 2")],
                    columns: vec![axis("Column 1"), axis("Column 2")],
                    cell_input_type: CellInputType::Text,
                }),
            ),
            FieldType::LookupField => (
                "Lookup Field",
                FieldKind::LookupField(LookupConfig {
                    placeholder: "Search for an item...".to_string(),
                    helper_text: "This dropdown is populated from an external source."
                        .to_string(),
                    required: false,
                    data_source_url: "https://api.example.com/data".to_string(),
                }),
            ),
            FieldType::GeolocationField => (
                "Location Picker",
                FieldKind::GeolocationField(input("Pin a location on the map.")),
            ),
            FieldType::PaymentField => (
                "Payment Information",
                FieldKind::PaymentField(PaymentConfig {
                    helper_text: "Your payment information is secure.".to_string(),
                    gateway: PaymentGateway::Stripe,
                }),
            ),
            FieldType::RepeaterField => (
                "Replicating Group",
                FieldKind::RepeaterField(RepeaterConfig {
                    add_button_label: "Add another item".to_string(),
                    children: Vec::new(),
                }),
            ),
            FieldType::ProgressTrackerField => {
                ("Progress Tracker", FieldKind::ProgressTrackerField)
            }
            FieldType::AbTestField => (
                "A/B Test Variant",
                FieldKind::AbTestField(AbTestConfig::default()),
            ),
        };

        Field {
            id: id.into(),
            label: label.to_string(),
            default_value,
            styles: BTreeMap::new(),
            logic: Vec::new(),
            validation: Some(Validation::default()),
            read_only: false,
            kind,
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn is_container(&self) -> bool {
        self.field_type().is_container()
    }

    /// The child slots of a container, in canonical traversal order. Empty for leaves.
    pub fn slots(&self) -> Vec<(SlotLocator, &[Field])> {
        let container = || self.id.clone();
        match &self.kind {
            FieldKind::GroupField(GroupConfig { children, .. })
            | FieldKind::RepeaterField(RepeaterConfig { children, .. }) => {
                vec![(SlotLocator::Children { container: container() }, children.as_slice())]
            }
            FieldKind::TabsField(config) => config
                .tabs
                .iter()
                .map(|tab| {
                    let locator = SlotLocator::Tab {
                        container: container(),
                        tab: tab.id.clone(),
                    };
                    (locator, tab.children.as_slice())
                })
                .collect(),
            FieldKind::AbTestField(config) => vec![
                (
                    SlotLocator::Variant {
                        container: container(),
                        variant: Variant::A,
                    },
                    config.variant_a.as_slice(),
                ),
                (
                    SlotLocator::Variant {
                        container: container(),
                        variant: Variant::B,
                    },
                    config.variant_b.as_slice(),
                ),
            ],
            _ => Vec::new(),
        }
    }

    /// Mutable counterpart of [`Field::slots`], same order.
    pub fn slots_mut(&mut self) -> Vec<(SlotLocator, &mut Vec<Field>)> {
        let container = self.id.clone();
        match &mut self.kind {
            FieldKind::GroupField(GroupConfig { children, .. })
            | FieldKind::RepeaterField(RepeaterConfig { children, .. }) => {
                vec![(SlotLocator::Children { container }, children)]
            }
            FieldKind::TabsField(config) => config
                .tabs
                .iter_mut()
                .map(|tab| {
                    let locator = SlotLocator::Tab {
                        container: container.clone(),
                        tab: tab.id.clone(),
                    };
                    (locator, &mut tab.children)
                })
                .collect(),
            FieldKind::AbTestField(config) => vec![
                (
                    SlotLocator::Variant {
                        container: container.clone(),
                        variant: Variant::A,
                    },
                    &mut config.variant_a,
                ),
                (
                    SlotLocator::Variant {
                        container,
                        variant: Variant::B,
                    },
                    &mut config.variant_b,
                ),
            ],
            _ => Vec::new(),
        }
    }

    // --- Capability dispatch ---

    pub fn as_placeholder(&self) -> Option<&dyn HasPlaceholder> {
        match &self.kind {
            FieldKind::TextField(c) => Some(c),
            FieldKind::TextareaField(c) => Some(c),
            FieldKind::SelectField(c) => Some(c),
            FieldKind::LookupField(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_helper_text(&self) -> Option<&dyn HasHelperText> {
        match &self.kind {
            FieldKind::TextField(c) => Some(c),
            FieldKind::TextareaField(c) => Some(c),
            FieldKind::SelectField(c) => Some(c),
            FieldKind::RadioGroupField(c) => Some(c),
            FieldKind::CheckboxField(c)
            | FieldKind::DatePickerField(c)
            | FieldKind::TimeField(c)
            | FieldKind::DateTimeField(c)
            | FieldKind::SignatureField(c)
            | FieldKind::GeolocationField(c) => Some(c),
            FieldKind::FileUploadField(c) => Some(c),
            FieldKind::RatingField(c) => Some(c),
            FieldKind::SliderField(c) => Some(c),
            FieldKind::MatrixField(c) => Some(c),
            FieldKind::LookupField(c) => Some(c),
            FieldKind::PaymentField(c) => Some(c),
            FieldKind::CalculatedField(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_options(&self) -> Option<&dyn HasOptions> {
        match &self.kind {
            FieldKind::SelectField(c) => Some(c),
            FieldKind::RadioGroupField(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_requirable(&self) -> Option<&dyn Requirable> {
        match &self.kind {
            FieldKind::TextField(c) => Some(c),
            FieldKind::TextareaField(c) => Some(c),
            FieldKind::SelectField(c) => Some(c),
            FieldKind::RadioGroupField(c) => Some(c),
            FieldKind::CheckboxField(c)
            | FieldKind::DatePickerField(c)
            | FieldKind::TimeField(c)
            | FieldKind::DateTimeField(c)
            | FieldKind::SignatureField(c)
            | FieldKind::GeolocationField(c) => Some(c),
            FieldKind::FileUploadField(c) => Some(c),
            FieldKind::RatingField(c) => Some(c),
            FieldKind::SliderField(c) => Some(c),
            FieldKind::LookupField(c) => Some(c),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.as_placeholder().map(HasPlaceholder::placeholder)
    }

    pub fn helper_text(&self) -> Option<&str> {
        self.as_helper_text().map(HasHelperText::helper_text)
    }

    pub fn options(&self) -> &[FieldOption] {
        self.as_options().map_or(&[], HasOptions::options)
    }

    pub fn is_required(&self) -> bool {
        self.as_requirable().is_some_and(Requirable::required)
    }

    /// The formula and formatting of a calculated field.
    pub fn calculation(&self) -> Option<&CalculatedConfig> {
        match &self.kind {
            FieldKind::CalculatedField(c) => Some(c),
            _ => None,
        }
    }

    // --- Option and tab editing ---

    fn options_mut(&mut self) -> Result<&mut Vec<FieldOption>, TreeError> {
        match &mut self.kind {
            FieldKind::SelectField(c) => Ok(c.options_mut()),
            FieldKind::RadioGroupField(c) => Ok(c.options_mut()),
            other => Err(unsupported(&self.id, other, "options")),
        }
    }

    /// Appends an option labelled `label`, returning its id.
    pub fn add_option(&mut self, label: &str) -> Result<String, TreeError> {
        let options = self.options_mut()?;
        let option = FieldOption::from_label(fresh_id(), label);
        let id = option.id.clone();
        options.push(option);
        Ok(id)
    }

    /// Removes an option. Returns `false` when no option has that id.
    pub fn remove_option(&mut self, option_id: &str) -> Result<bool, TreeError> {
        let options = self.options_mut()?;
        let before = options.len();
        options.retain(|option| option.id != option_id);
        Ok(options.len() != before)
    }

    /// Relabels an option and re-derives its value from the new label.
    pub fn rename_option(&mut self, option_id: &str, label: &str) -> Result<bool, TreeError> {
        let options = self.options_mut()?;
        match options.iter_mut().find(|option| option.id == option_id) {
            Some(option) => {
                option.label = label.to_string();
                option.value = option_value(label);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Appends an empty tab, returning its id.
    pub fn add_tab(&mut self, label: &str) -> Result<String, TreeError> {
        match &mut self.kind {
            FieldKind::TabsField(config) => {
                let id = fresh_id();
                config.tabs.push(Tab {
                    id: id.clone(),
                    label: label.to_string(),
                    children: Vec::new(),
                });
                Ok(id)
            }
            other => Err(unsupported(&self.id, other, "tabs")),
        }
    }

    /// Removes a tab together with every field inside it.
    pub fn remove_tab(&mut self, tab_id: &str) -> Result<Option<Tab>, TreeError> {
        match &mut self.kind {
            FieldKind::TabsField(config) => {
                let position = config.tabs.iter().position(|tab| tab.id == tab_id);
                Ok(position.map(|index| config.tabs.remove(index)))
            }
            other => Err(unsupported(&self.id, other, "tabs")),
        }
    }
}

fn unsupported(field_id: &str, kind: &FieldKind, capability: &'static str) -> TreeError {
    TreeError::Unsupported {
        field_id: field_id.to_string(),
        field_type: kind.field_type().to_string(),
        capability,
    }
}
