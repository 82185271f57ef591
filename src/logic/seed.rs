use crate::form::FormSettings;
use crate::tree::FieldTree;
use crate::value::{InputValues, Value};

/// Query-string parameters of the page that opened a form, in their original order.
///
/// Decoding the URL is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Builds the initial input values: every field's default value, then each complete URL
/// parameter mapping (in list order) whose parameter is present.
pub fn seed_values(tree: &FieldTree, settings: &FormSettings, params: &QueryParams) -> InputValues {
    let mut values = InputValues::new();
    for field in tree.flatten() {
        if let Some(default) = &field.default_value {
            values.insert(field.id.clone(), default.clone());
        }
    }
    for mapping in &settings.url_parameter_mapping {
        if mapping.param_name.is_empty() || mapping.target_field_id.is_empty() {
            continue;
        }
        if let Some(value) = params.get(&mapping.param_name) {
            log::debug!(
                "Seeding '{}' from URL parameter '{}'",
                mapping.target_field_id,
                mapping.param_name
            );
            values.insert(mapping.target_field_id.clone(), Value::Text(value.to_string()));
        }
    }
    values
}
