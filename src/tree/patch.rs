use crate::error::TreeError;
use crate::field::{Field, FieldKind};
use crate::logic::LogicRule;
use crate::validation::Validation;
use crate::value::Value;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// A shallow merge applied to one field by [`FieldTree::update`](super::FieldTree::update).
///
/// Common properties are typed; type-specific keys (`placeholder`, `options`, `formula`,
/// `children`, ...) are held as JSON and merged into the field's [`FieldKind`]. Only the keys
/// present in the patch are replaced. `id` and `type` can never be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub default_value: Option<Option<Value>>,
    pub styles: Option<BTreeMap<String, Value>>,
    pub logic: Option<Vec<LogicRule>>,
    pub validation: Option<Option<Validation>>,
    pub read_only: Option<bool>,
    pub properties: Map<String, JsonValue>,
}

const PROTECTED_KEYS: [&str; 2] = ["id", "type"];

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a JSON object in the saved-form shape into typed and type-specific keys.
    pub fn from_json(object: Map<String, JsonValue>) -> Result<Self, TreeError> {
        let mut patch = FieldPatch::new();
        for (key, value) in object {
            match key.as_str() {
                "id" | "type" => return Err(TreeError::ProtectedKey(key.clone())),
                "label" => patch.label = Some(typed(&key, value)?),
                "defaultValue" => patch.default_value = Some(Some(typed(&key, value)?)),
                "styles" => patch.styles = Some(typed(&key, value)?),
                "logic" => patch.logic = Some(typed(&key, value)?),
                "validation" => patch.validation = Some(typed(&key, value)?),
                "readOnly" => patch.read_only = Some(typed(&key, value)?),
                _ => {
                    patch.properties.insert(key.clone(), value);
                }
            }
        }
        Ok(patch)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn default_value(mut self, value: Option<Value>) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn styles(mut self, styles: BTreeMap<String, Value>) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn logic(mut self, rules: Vec<LogicRule>) -> Self {
        self.logic = Some(rules);
        self
    }

    pub fn validation(mut self, validation: Option<Validation>) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }

    /// Sets a type-specific key, in the camelCase spelling of the saved-form JSON.
    pub fn property(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == FieldPatch::default()
    }

    /// Applies the patch. On error the field is left untouched.
    pub(crate) fn apply(&self, field: &mut Field) -> Result<(), TreeError> {
        let kind = if self.properties.is_empty() {
            None
        } else {
            Some(self.merged_kind(field)?)
        };

        if let Some(kind) = kind {
            field.kind = kind;
        }
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(default_value) = &self.default_value {
            field.default_value = default_value.clone();
        }
        if let Some(styles) = &self.styles {
            field.styles = styles.clone();
        }
        if let Some(logic) = &self.logic {
            field.logic = logic.clone();
        }
        if let Some(validation) = &self.validation {
            field.validation = validation.clone();
        }
        if let Some(read_only) = self.read_only {
            field.read_only = read_only;
        }
        Ok(())
    }

    fn merged_kind(&self, field: &Field) -> Result<FieldKind, TreeError> {
        let invalid = |e: serde_json::Error| TreeError::InvalidPatch {
            field_id: field.id.clone(),
            message: e.to_string(),
        };

        if let Some(key) = self
            .properties
            .keys()
            .find(|key| PROTECTED_KEYS.contains(&key.as_str()))
        {
            return Err(TreeError::ProtectedKey(key.clone()));
        }

        let mut object = match serde_json::to_value(&field.kind).map_err(invalid)? {
            JsonValue::Object(object) => object,
            _ => Map::new(),
        };
        for (key, value) in &self.properties {
            object.insert(key.clone(), value.clone());
        }
        serde_json::from_value(JsonValue::Object(object)).map_err(invalid)
    }
}

fn typed<T: DeserializeOwned>(key: &str, value: JsonValue) -> Result<T, TreeError> {
    serde_json::from_value(value).map_err(|e| TreeError::InvalidPatchValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}
