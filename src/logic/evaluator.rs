use super::{ActionType, Condition, ConditionGroup, Conjunction, LogicRule, Operator};
use crate::field::{Field, FieldId};
use crate::formula;
use crate::tree::FieldTree;
use crate::value::{InputValues, Value, is_empty, loose_eq};
use indexmap::IndexMap;
use serde::Serialize;

/// Derived runtime state of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub is_visible: bool,
    pub is_read_only: bool,
    /// `None` when the input is unset.
    pub value: Option<Value>,
}

/// Derived state of every field, iterated in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormState {
    states: IndexMap<FieldId, FieldState>,
}

impl FormState {
    pub fn get(&self, id: &str) -> Option<&FieldState> {
        self.states.get(id)
    }

    /// `false` for ids not present in the form.
    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).is_some_and(|state| state.is_visible)
    }

    pub fn is_read_only(&self, id: &str) -> bool {
        self.get(id).is_some_and(|state| state.is_read_only)
    }

    pub fn value(&self, id: &str) -> Option<&Value> {
        self.get(id).and_then(|state| state.value.as_ref())
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.states
            .iter()
            .filter(|(_, state)| state.is_visible)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldState)> {
        self.states.iter().map(|(id, state)| (id.as_str(), state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Evaluates one condition against the input values.
pub fn evaluate_condition(condition: &Condition, values: &InputValues) -> bool {
    let source = values.get(&condition.source_field);
    let expected = condition.value.as_ref();
    match &condition.operator {
        Operator::Eq => loose_eq(source, expected),
        Operator::Neq => !loose_eq(source, expected),
        Operator::Gt => numeric(source) > numeric(expected),
        Operator::Lt => numeric(source) < numeric(expected),
        Operator::Contains => text(source).contains(&text(expected)),
        Operator::NotContains => !text(source).contains(&text(expected)),
        Operator::IsEmpty => is_empty(source),
        Operator::IsNotEmpty => !is_empty(source),
        Operator::Other(name) => {
            log::debug!("Unknown operator '{}' evaluates to false", name);
            false
        }
    }
}

/// An empty group holds vacuously.
pub fn evaluate_condition_group(group: &ConditionGroup, values: &InputValues) -> bool {
    if group.conditions.is_empty() {
        return true;
    }
    let mut results = group
        .conditions
        .iter()
        .map(|condition| evaluate_condition(condition, values));
    match group.conjunction {
        Conjunction::And => results.all(|holds| holds),
        _ => results.any(|holds| holds),
    }
}

fn numeric(value: Option<&Value>) -> f64 {
    value.map_or(f64::NAN, Value::to_number)
}

/// String form used by `contains`. An absent operand reads as `undefined`.
fn text(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), Value::to_string)
}

/// Rule evaluation over one field tree.
///
/// Construction flattens the tree and collects its rules once; [`LogicEvaluator::eval`] can
/// then run against any number of value sets.
pub struct LogicEvaluator<'a> {
    fields: Vec<&'a Field>,
    rules: Vec<&'a LogicRule>,
}

impl<'a> LogicEvaluator<'a> {
    pub fn new(tree: &'a FieldTree) -> Self {
        let fields = tree.flatten();
        let rules = fields.iter().flat_map(|field| field.logic.iter()).collect();
        Self { fields, rules }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Computes the derived state of every field. Pure: equal inputs give equal outputs.
    pub fn eval(&self, values: &InputValues) -> FormState {
        let mut states: IndexMap<FieldId, FieldState> = IndexMap::with_capacity(self.fields.len());
        for field in &self.fields {
            states.entry(field.id.clone()).or_insert_with(|| FieldState {
                is_visible: true,
                is_read_only: field.read_only,
                value: values.get(&field.id).cloned(),
            });
        }

        for rule in &self.rules {
            if !evaluate_condition_group(&rule.conditions, values) {
                continue;
            }
            for action in &rule.actions {
                let Some(state) = states.get_mut(&action.target_field_id) else {
                    continue;
                };
                match &action.action_type {
                    ActionType::Show => state.is_visible = true,
                    ActionType::Hide => state.is_visible = false,
                    ActionType::Enable => state.is_read_only = false,
                    ActionType::Disable => state.is_read_only = true,
                    ActionType::SetValue => state.value = action.value.clone(),
                    ActionType::Other(name) => {
                        log::debug!("Ignoring unknown action '{}' in rule '{}'", name, rule.name);
                    }
                }
            }
        }

        for field in &self.fields {
            let Some(config) = field.calculation() else {
                continue;
            };
            if config.formula.is_empty() {
                continue;
            }
            if let Some(state) = states.get_mut(&field.id) {
                state.value = Some(Value::Text(formula::calculate(config, values)));
            }
        }

        FormState { states }
    }
}

/// Computes the derived state of `tree` for one set of input values.
pub fn evaluate(tree: &FieldTree, values: &InputValues) -> FormState {
    LogicEvaluator::new(tree).eval(values)
}
