//! Declarative field rules and their evaluation.
//!
//! A [`LogicRule`] is stored on one field but may reference and target any field of the form.
//! Evaluation is global: see [`evaluate`].

mod evaluator;
mod seed;

pub use evaluator::{
    FieldState, FormState, LogicEvaluator, evaluate, evaluate_condition, evaluate_condition_group,
};
pub use seed::{QueryParams, seed_values};

use crate::field::FieldId;
use crate::value::{Value, deserialize_present};
use serde::{Deserialize, Serialize};

// Generates a string-backed enum whose unknown spellings survive a round trip in `Other`.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Other(text) => text,
                }
            }
        }

        impl From<String> for $name {
            fn from(text: String) -> Self {
                match text.as_str() {
                    $($text => $name::$variant,)+
                    _ => $name::Other(text),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(text) => text,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

string_enum!(
    /// Comparison applied by a [`Condition`]. Unknown operators never match.
    Operator {
        Eq => "eq",
        Neq => "neq",
        Gt => "gt",
        Lt => "lt",
        Contains => "contains",
        NotContains => "not_contains",
        IsEmpty => "is_empty",
        IsNotEmpty => "is_not_empty",
    }
);

string_enum!(
    /// Effect of a [`LogicAction`]. Unknown actions are ignored.
    ActionType {
        Show => "show",
        Hide => "hide",
        Enable => "enable",
        Disable => "disable",
        SetValue => "setValue",
    }
);

string_enum!(
    /// How the conditions of a group combine. Anything but `and` combines like `or`.
    Conjunction {
        And => "and",
        Or => "or",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: String,
    pub source_field: FieldId,
    pub operator: Operator,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub conjunction: Conjunction,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Default for ConditionGroup {
    fn default() -> Self {
        Self {
            conjunction: Conjunction::And,
            conditions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicAction {
    pub id: String,
    pub action_type: ActionType,
    pub target_field_id: FieldId,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

/// When every (`and`) or any (`or`) condition holds, all actions apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicRule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub conditions: ConditionGroup,
    #[serde(default)]
    pub actions: Vec<LogicAction>,
}

impl Condition {
    pub fn new(source_field: impl Into<FieldId>, operator: Operator, value: Option<Value>) -> Self {
        Self {
            id: crate::field::fresh_id(),
            source_field: source_field.into(),
            operator,
            value,
        }
    }
}

impl LogicAction {
    pub fn new(action_type: ActionType, target_field_id: impl Into<FieldId>) -> Self {
        Self {
            id: crate::field::fresh_id(),
            action_type,
            target_field_id: target_field_id.into(),
            value: None,
        }
    }

    /// A `setValue` action.
    pub fn set_value(target_field_id: impl Into<FieldId>, value: Value) -> Self {
        Self {
            value: Some(value),
            ..Self::new(ActionType::SetValue, target_field_id)
        }
    }
}

impl LogicRule {
    pub fn new(
        name: impl Into<String>,
        conjunction: Conjunction,
        conditions: Vec<Condition>,
        actions: Vec<LogicAction>,
    ) -> Self {
        Self {
            id: crate::field::fresh_id(),
            name: name.into(),
            conditions: ConditionGroup {
                conjunction,
                conditions,
            },
            actions,
        }
    }
}
