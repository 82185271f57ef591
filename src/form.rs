use crate::field::{FieldId, fresh_id};
use crate::tree::FieldTree;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seeds a field from a query-string parameter when a form is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlParameterMapping {
    pub id: String,
    pub param_name: String,
    pub target_field_id: FieldId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    pub name: String,
    #[serde(default)]
    pub url_parameter_mapping: Vec<UrlParameterMapping>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            name: SavedForm::UNTITLED.to_string(),
            url_parameter_mapping: Vec::new(),
        }
    }
}

impl FormSettings {
    /// Adds a mapping and returns its id.
    pub fn add_mapping(
        &mut self,
        param_name: impl Into<String>,
        target_field_id: impl Into<FieldId>,
    ) -> String {
        let id = fresh_id();
        self.url_parameter_mapping.push(UrlParameterMapping {
            id: id.clone(),
            param_name: param_name.into(),
            target_field_id: target_field_id.into(),
        });
        id
    }

    pub fn remove_mapping(&mut self, id: &str) -> bool {
        let before = self.url_parameter_mapping.len();
        self.url_parameter_mapping.retain(|mapping| mapping.id != id);
        self.url_parameter_mapping.len() != before
    }
}

/// A persisted form document, owned by one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedForm {
    pub id: String,
    pub organization_id: String,
    pub fields: FieldTree,
    pub form_settings: FormSettings,
    pub saved_at: DateTime<Utc>,
}

impl SavedForm {
    pub const UNTITLED: &'static str = "Untitled Form";

    /// An empty "Untitled Form" for `organization_id`.
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            organization_id: organization_id.into(),
            fields: FieldTree::default(),
            form_settings: FormSettings::default(),
            saved_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.form_settings.name
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
