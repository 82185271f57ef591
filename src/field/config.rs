//! Per-type configuration records carried by [`FieldKind`](super::FieldKind) variants,
//! and the capability traits they implement.

use super::Field;
use serde::{Deserialize, Serialize};

/// Input subtype of a `TextField`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSubtype {
    #[default]
    Text,
    Email,
    Phone,
    Url,
    Password,
}

impl TextSubtype {
    pub const ALL: [TextSubtype; 5] = [
        TextSubtype::Text,
        TextSubtype::Email,
        TextSubtype::Phone,
        TextSubtype::Url,
        TextSubtype::Password,
    ];

    pub fn default_label(&self) -> &'static str {
        match self {
            TextSubtype::Text => "Text Field",
            TextSubtype::Email => "Email Field",
            TextSubtype::Phone => "Phone Field",
            TextSubtype::Url => "URL Field",
            TextSubtype::Password => "Password Field",
        }
    }
}

/// A choice offered by select and radio fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub id: String,
    pub label: String,
    pub value: String,
}

impl FieldOption {
    /// Builds an option whose value is derived from its label.
    pub fn from_label(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: id.into(),
            value: option_value(&label),
            label,
        }
    }
}

/// Lowercased label with whitespace runs replaced by `_`.
pub fn option_value(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub children: Vec<Field>,
}

/// Header row or column of a matrix field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixAxis {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellInputType {
    #[default]
    Text,
    Number,
    Checkbox,
    Radio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatting {
    #[default]
    None,
    CurrencyUsd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentGateway {
    #[default]
    Stripe,
    Paypal,
}

// --- Leaf inputs ---

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextConfig {
    pub subtype: TextSubtype,
    pub placeholder: String,
    pub helper_text: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextareaConfig {
    pub placeholder: String,
    pub helper_text: String,
    pub required: bool,
    pub rows: u32,
    pub rich_text: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectConfig {
    pub placeholder: String,
    pub helper_text: String,
    pub required: bool,
    pub options: Vec<FieldOption>,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadioGroupConfig {
    pub helper_text: String,
    pub required: bool,
    pub options: Vec<FieldOption>,
}

/// Shared by inputs that only carry helper text and a required flag
/// (checkbox, date/time pickers, signature, geolocation).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputConfig {
    pub helper_text: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileUploadConfig {
    pub helper_text: String,
    pub required: bool,
    pub multiple: bool,
    pub max_size_in_mb: f64,
    /// Comma-separated list of accepted extensions; empty accepts anything.
    pub allowed_file_types: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingConfig {
    pub helper_text: String,
    pub required: bool,
    pub max_rating: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderConfig {
    pub helper_text: String,
    pub required: bool,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatrixConfig {
    pub helper_text: String,
    pub rows: Vec<MatrixAxis>,
    pub columns: Vec<MatrixAxis>,
    pub cell_input_type: CellInputType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookupConfig {
    pub placeholder: String,
    pub helper_text: String,
    pub required: bool,
    pub data_source_url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentConfig {
    pub helper_text: String,
    pub gateway: PaymentGateway,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatedConfig {
    pub helper_text: String,
    pub formula: String,
    pub formatting: Formatting,
}

// --- Layout and passive content ---

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionBreakConfig {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageConfig {
    pub src: String,
    pub alt: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlConfig {
    pub html: String,
}

// --- Containers ---

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupConfig {
    pub columns: u32,
    pub children: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepeaterConfig {
    pub add_button_label: String,
    pub children: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabsConfig {
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbTestConfig {
    pub variant_a: Vec<Field>,
    pub variant_b: Vec<Field>,
}

// --- Capabilities ---

pub trait HasPlaceholder {
    fn placeholder(&self) -> &str;
    fn set_placeholder(&mut self, placeholder: String);
}

pub trait HasHelperText {
    fn helper_text(&self) -> &str;
    fn set_helper_text(&mut self, helper_text: String);
}

pub trait HasOptions {
    fn options(&self) -> &[FieldOption];
    fn options_mut(&mut self) -> &mut Vec<FieldOption>;
}

pub trait Requirable {
    fn required(&self) -> bool;
    fn set_required(&mut self, required: bool);
}

macro_rules! impl_capability {
    (placeholder: $($config:ty),+) => {$(
        impl HasPlaceholder for $config {
            fn placeholder(&self) -> &str { &self.placeholder }
            fn set_placeholder(&mut self, placeholder: String) { self.placeholder = placeholder; }
        }
    )+};
    (helper_text: $($config:ty),+) => {$(
        impl HasHelperText for $config {
            fn helper_text(&self) -> &str { &self.helper_text }
            fn set_helper_text(&mut self, helper_text: String) { self.helper_text = helper_text; }
        }
    )+};
    (options: $($config:ty),+) => {$(
        impl HasOptions for $config {
            fn options(&self) -> &[FieldOption] { &self.options }
            fn options_mut(&mut self) -> &mut Vec<FieldOption> { &mut self.options }
        }
    )+};
    (required: $($config:ty),+) => {$(
        impl Requirable for $config {
            fn required(&self) -> bool { self.required }
            fn set_required(&mut self, required: bool) { self.required = required; }
        }
    )+};
}

impl_capability!(placeholder: TextConfig, TextareaConfig, SelectConfig, LookupConfig);
impl_capability!(
    helper_text: TextConfig,
    TextareaConfig,
    SelectConfig,
    RadioGroupConfig,
    InputConfig,
    FileUploadConfig,
    RatingConfig,
    SliderConfig,
    MatrixConfig,
    LookupConfig,
    PaymentConfig,
    CalculatedConfig
);
impl_capability!(options: SelectConfig, RadioGroupConfig);
impl_capability!(
    required: TextConfig,
    TextareaConfig,
    SelectConfig,
    RadioGroupConfig,
    InputConfig,
    FileUploadConfig,
    RatingConfig,
    SliderConfig,
    LookupConfig
);
