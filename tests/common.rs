//! Common test utilities for building field trees and input values.
use formsculptor::field::Tab;
use formsculptor::prelude::*;

#[allow(dead_code)]
pub fn text(id: &str) -> Field {
    Field::new(id, FieldType::TextField, None)
}

#[allow(dead_code)]
pub fn labelled(id: &str, field_type: FieldType, label: &str) -> Field {
    let mut field = Field::new(id, field_type, None);
    field.label = label.to_string();
    field
}

#[allow(dead_code)]
pub fn calculated(id: &str, formula: &str) -> Field {
    let mut field = Field::new(id, FieldType::CalculatedField, None);
    if let FieldKind::CalculatedField(config) = &mut field.kind {
        config.formula = formula.to_string();
    }
    field
}

#[allow(dead_code)]
pub fn page_break(id: &str, label: &str) -> Field {
    labelled(id, FieldType::PageBreak, label)
}

#[allow(dead_code)]
pub fn group(id: &str, children: Vec<Field>) -> Field {
    let mut field = Field::new(id, FieldType::GroupField, None);
    if let FieldKind::GroupField(config) = &mut field.kind {
        config.children = children;
    }
    field
}

/// A tabs field whose tabs have predictable ids.
#[allow(dead_code)]
pub fn tabs(id: &str, tabs: Vec<(&str, Vec<Field>)>) -> Field {
    let mut field = Field::new(id, FieldType::TabsField, None);
    if let FieldKind::TabsField(config) = &mut field.kind {
        config.tabs = tabs
            .into_iter()
            .map(|(tab_id, children)| Tab {
                id: tab_id.to_string(),
                label: tab_id.to_uppercase(),
                children,
            })
            .collect();
    }
    field
}

#[allow(dead_code)]
pub fn ab_test(id: &str, variant_a: Vec<Field>, variant_b: Vec<Field>) -> Field {
    let mut field = Field::new(id, FieldType::AbTestField, None);
    if let FieldKind::AbTestField(config) = &mut field.kind {
        config.variant_a = variant_a;
        config.variant_b = variant_b;
    }
    field
}

#[allow(dead_code)]
pub fn required(mut field: Field) -> Field {
    match &mut field.kind {
        FieldKind::TextField(config) => config.required = true,
        FieldKind::TextareaField(config) => config.required = true,
        FieldKind::CheckboxField(config) => config.required = true,
        _ => panic!("fixture does not support required on {}", field.field_type()),
    }
    field
}

/// Tree used across the suites:
///
/// ```text
/// name
/// g1 (group)
///   email
///   t1 (tabs)
///     tab_a: phone
///     tab_b: -
/// ab1 (A/B)
///   A: va
///   B: vb
/// total (calculated)
/// ```
#[allow(dead_code)]
pub fn sample_tree() -> FieldTree {
    FieldTree::new(vec![
        text("name"),
        group(
            "g1",
            vec![
                text("email"),
                tabs("t1", vec![("tab_a", vec![text("phone")]), ("tab_b", vec![])]),
            ],
        ),
        ab_test("ab1", vec![text("va")], vec![text("vb")]),
        calculated("total", "{name} + 1"),
    ])
}

#[allow(dead_code)]
pub fn ids(tree: &FieldTree) -> Vec<String> {
    tree.flatten().iter().map(|field| field.id.clone()).collect()
}

#[allow(dead_code)]
pub fn values<const N: usize>(pairs: [(&str, Value); N]) -> InputValues {
    pairs
        .into_iter()
        .map(|(id, value)| (id.to_string(), value))
        .collect()
}

#[allow(dead_code)]
pub fn rule_on(
    conjunction: Conjunction,
    conditions: Vec<Condition>,
    actions: Vec<LogicAction>,
) -> LogicRule {
    LogicRule::new("test rule", conjunction, conditions, actions)
}
