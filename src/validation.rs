//! Required-field and pattern checks on respondent input.

use crate::field::{Field, FieldId, FieldType};
use crate::render::FieldView;
use crate::value::Value;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PATTERN_MESSAGE: &str = "Invalid value";

/// Pattern constraint attached to a field. An empty `regex` disables the check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Validation {
    pub regex: String,
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    Required {
        field_id: FieldId,
    },
    Pattern {
        field_id: FieldId,
        message: String,
    },
    /// The field's pattern is not a valid regular expression.
    InvalidPattern {
        field_id: FieldId,
        pattern: String,
        reason: String,
    },
}

impl ValidationIssue {
    pub fn field_id(&self) -> &str {
        match self {
            ValidationIssue::Required { field_id }
            | ValidationIssue::Pattern { field_id, .. }
            | ValidationIssue::InvalidPattern { field_id, .. } => field_id,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Required { field_id } => write!(f, "{}: This field is required", field_id),
            ValidationIssue::Pattern { field_id, message } => write!(f, "{}: {}", field_id, message),
            ValidationIssue::InvalidPattern {
                field_id,
                pattern,
                reason,
            } => write!(f, "{}: invalid pattern '{}': {}", field_id, pattern, reason),
        }
    }
}

fn is_blank(field: &Field, value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Text(s)) => s.is_empty(),
        Some(Value::List(items)) => items.is_empty(),
        Some(Value::Bool(checked)) => field.field_type() == FieldType::CheckboxField && !checked,
        Some(_) => false,
    }
}

/// Checks one field's value. Patterns only apply to text and textarea fields with a value.
pub fn validate_field(field: &Field, value: Option<&Value>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let blank = is_blank(field, value);

    if field.is_required() && blank {
        issues.push(ValidationIssue::Required {
            field_id: field.id.clone(),
        });
    }

    let pattern_applies = matches!(
        field.field_type(),
        FieldType::TextField | FieldType::TextareaField
    );
    let Some(validation) = field.validation.as_ref().filter(|v| !v.regex.is_empty()) else {
        return issues;
    };
    if !pattern_applies || blank {
        return issues;
    }

    match Regex::new(&validation.regex) {
        Ok(pattern) => {
            let text = value.map(Value::to_string).unwrap_or_default();
            if !pattern.is_match(&text) {
                let message = if validation.error_message.is_empty() {
                    DEFAULT_PATTERN_MESSAGE.to_string()
                } else {
                    validation.error_message.clone()
                };
                issues.push(ValidationIssue::Pattern {
                    field_id: field.id.clone(),
                    message,
                });
            }
        }
        Err(e) => {
            log::warn!("Field '{}' has an invalid pattern: {}", field.id, e);
            issues.push(ValidationIssue::InvalidPattern {
                field_id: field.id.clone(),
                pattern: validation.regex.clone(),
                reason: e.to_string(),
            });
        }
    }
    issues
}

/// Checks the rendered fields of a page and, recursively, the rendered fields of their
/// child slots. Hidden fields are never validated.
pub fn validate_page(views: &[FieldView<'_>]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for view in views {
        issues.extend(validate_field(view.field, view.value()));
        for slot in view.children() {
            issues.extend(validate_page(&slot.views));
        }
    }
    issues
}
