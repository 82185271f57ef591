//! Palette templates: the controls a user can drag onto the canvas.

use super::{Field, FieldId, FieldType, TextSubtype};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Basic,
    Layout,
    Advanced,
    #[serde(rename = "UX & Smart")]
    UxSmart,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Basic => "Basic",
            Category::Layout => "Layout",
            Category::Advanced => "Advanced",
            Category::UxSmart => "UX & Smart",
        };
        write!(f, "{}", name)
    }
}

/// A palette entry. Dropping it constructs a field with the type's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlTemplate {
    pub key: &'static str,
    pub field_type: FieldType,
    pub subtype: Option<TextSubtype>,
    pub label: &'static str,
    pub category: Category,
}

impl ControlTemplate {
    pub fn construct(&self, id: impl Into<FieldId>) -> Field {
        Field::new(id, self.field_type, self.subtype)
    }
}

macro_rules! template {
    ($key:literal, $field_type:ident, $label:literal, $category:ident) => {
        ControlTemplate {
            key: $key,
            field_type: FieldType::$field_type,
            subtype: None,
            label: $label,
            category: Category::$category,
        }
    };
    ($key:literal, $field_type:ident($subtype:ident), $label:literal, $category:ident) => {
        ControlTemplate {
            key: $key,
            field_type: FieldType::$field_type,
            subtype: Some(TextSubtype::$subtype),
            label: $label,
            category: Category::$category,
        }
    };
}

static PALETTE: [ControlTemplate; 30] = [
    template!("TextField", TextField(Text), "Text Field", Basic),
    template!("EmailField", TextField(Email), "Email Field", Basic),
    template!("PhoneField", TextField(Phone), "Phone Field", Basic),
    template!("UrlField", TextField(Url), "URL Field", Basic),
    template!("PasswordField", TextField(Password), "Password Field", Basic),
    template!("TextareaField", TextareaField, "Textarea Field", Basic),
    template!("SelectField", SelectField, "Select Field", Basic),
    template!("CheckboxField", CheckboxField, "Checkbox Field", Basic),
    template!("RadioGroupField", RadioGroupField, "Radio Group", Basic),
    template!("DatePickerField", DatePickerField, "Date Picker", Basic),
    template!("TimeField", TimeField, "Time Picker", Basic),
    template!("DateTimeField", DateTimeField, "Date Time Picker", Basic),
    template!("SectionBreak", SectionBreak, "Section Break", Layout),
    template!("GroupField", GroupField, "Container (Grid)", Layout),
    template!("PageBreak", PageBreak, "Page Break", Layout),
    template!("TabsField", TabsField, "Tabs", Layout),
    template!("ImageField", ImageField, "Image", Layout),
    template!("HtmlField", HtmlField, "HTML Embed", Layout),
    template!("FileUploadField", FileUploadField, "File Upload", Advanced),
    template!("SignatureField", SignatureField, "Signature", Advanced),
    template!("RatingField", RatingField, "Rating", Advanced),
    template!("CalculatedField", CalculatedField, "Calculated Field", Advanced),
    template!("MatrixField", MatrixField, "Matrix Table", Advanced),
    template!("LookupField", LookupField, "Lookup/Dynamic Dropdown", Advanced),
    template!("GeolocationField", GeolocationField, "Geolocation Picker", Advanced),
    template!("PaymentField", PaymentField, "Payment Information", Advanced),
    template!("SliderField", SliderField, "Slider", UxSmart),
    template!("ProgressTrackerField", ProgressTrackerField, "Progress Tracker", UxSmart),
    template!("RepeaterField", RepeaterField, "Replicating Group", UxSmart),
    template!("ABTestField", AbTestField, "A/B Test Variant", UxSmart),
];

/// Every palette template, in display order.
pub fn palette() -> &'static [ControlTemplate] {
    &PALETTE
}

/// Resolves the template for a type and optional text subtype.
///
/// An unmatched subtype falls back to the type's first template.
pub fn template_for(
    field_type: FieldType,
    subtype: Option<TextSubtype>,
) -> Option<&'static ControlTemplate> {
    PALETTE
        .iter()
        .find(|t| t.field_type == field_type && t.subtype == subtype)
        .or_else(|| PALETTE.iter().find(|t| t.field_type == field_type))
}
