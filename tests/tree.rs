//! Tests for lookup, insertion, removal and patching across the recursive field tree.
mod common;
use common::*;
use formsculptor::prelude::*;
use serde_json::json;

fn tab_slot(container: &str, tab: &str) -> SlotLocator {
    SlotLocator::Tab {
        container: container.to_string(),
        tab: tab.to_string(),
    }
}

#[test]
fn test_flatten_is_pre_order() {
    let tree = sample_tree();
    assert_eq!(
        ids(&tree),
        vec!["name", "g1", "email", "t1", "phone", "ab1", "va", "vb", "total"]
    );
    assert_eq!(tree.len(), 9);
    assert!(!tree.is_empty());
}

#[test]
fn test_find_at_every_depth() {
    let tree = sample_tree();
    assert_eq!(tree.find("phone").unwrap().id, "phone");
    assert_eq!(tree.find("vb").unwrap().id, "vb");
    assert!(tree.find("missing").is_none());
    assert!(tree.contains("t1"));
}

#[test]
fn test_locate_reports_owning_slot() {
    let tree = sample_tree();
    assert_eq!(tree.locate("name"), Some((SlotLocator::Root, 0)));
    assert_eq!(
        tree.locate("t1"),
        Some((
            SlotLocator::Children {
                container: "g1".to_string()
            },
            1
        ))
    );
    assert_eq!(tree.locate("phone"), Some((tab_slot("t1", "tab_a"), 0)));
    assert_eq!(
        tree.locate("vb"),
        Some((
            SlotLocator::Variant {
                container: "ab1".to_string(),
                variant: Variant::B
            },
            0
        ))
    );
}

#[test]
fn test_insert_into_nested_slot() {
    let mut tree = sample_tree();
    tree.insert(&tab_slot("t1", "tab_b"), text("fax"), APPEND).unwrap();
    assert_eq!(tree.locate("fax"), Some((tab_slot("t1", "tab_b"), 0)));

    tree.insert(&tab_slot("t1", "tab_a"), text("mobile"), 0).unwrap();
    assert_eq!(tree.locate("mobile"), Some((tab_slot("t1", "tab_a"), 0)));
    assert_eq!(tree.locate("phone"), Some((tab_slot("t1", "tab_a"), 1)));
}

#[test]
fn test_insert_position_is_clamped() {
    let mut tree = sample_tree();
    tree.insert(&SlotLocator::Root, text("last"), 99).unwrap();
    assert_eq!(tree.locate("last"), Some((SlotLocator::Root, 4)));
}

#[test]
fn test_insert_into_missing_slot_fails_without_change() {
    let mut tree = sample_tree();
    let before = tree.clone();

    let err = tree
        .insert(&tab_slot("t1", "no_such_tab"), text("x"), APPEND)
        .unwrap_err();
    assert!(matches!(err, TreeError::SlotNotFound { .. }));

    // A leaf has no slot at all.
    let leaf = SlotLocator::Children {
        container: "name".to_string(),
    };
    assert!(tree.insert(&leaf, text("x"), APPEND).is_err());
    assert_eq!(tree, before);
}

#[test]
fn test_remove_detaches_subtree() {
    let mut tree = sample_tree();
    let removed = tree.remove("g1").unwrap();
    assert_eq!(removed.id, "g1");
    assert!(!tree.contains("email"));
    assert!(!tree.contains("phone"));
    assert_eq!(ids(&tree), vec!["name", "ab1", "va", "vb", "total"]);

    assert!(tree.remove("g1").is_none());
}

#[test]
fn test_remove_nested_leaf() {
    let mut tree = sample_tree();
    assert_eq!(tree.remove("va").unwrap().id, "va");
    assert_eq!(tree.len(), 8);
}

#[test]
fn test_update_shallow_merges_common_properties() {
    let mut tree = sample_tree();
    let patch = FieldPatch::new()
        .label("Full name")
        .read_only(true)
        .default_value(Some(Value::from("Ada")));
    assert!(tree.update("name", &patch).unwrap());

    let field = tree.find("name").unwrap();
    assert_eq!(field.label, "Full name");
    assert!(field.read_only);
    assert_eq!(field.default_value, Some(Value::from("Ada")));
    // Untouched keys keep their values.
    assert_eq!(field.placeholder(), Some("Value here..."));
}

#[test]
fn test_update_type_specific_properties() {
    let mut tree = sample_tree();
    let patch = FieldPatch::new()
        .property("placeholder", json!("you@example.com"))
        .property("required", json!(true));
    assert!(tree.update("email", &patch).unwrap());

    let email = tree.find("email").unwrap();
    assert_eq!(email.placeholder(), Some("you@example.com"));
    assert!(email.is_required());
    assert_eq!(email.helper_text(), Some("Helper text"));
}

#[test]
fn test_update_unknown_id_reports_false() {
    let mut tree = sample_tree();
    let patch = FieldPatch::new().label("x");
    assert!(!tree.update("missing", &patch).unwrap());
}

#[test]
fn test_update_rejects_protected_keys() {
    let mut object = serde_json::Map::new();
    object.insert("type".to_string(), json!("SelectField"));
    assert_eq!(
        FieldPatch::from_json(object).unwrap_err(),
        TreeError::ProtectedKey("type".to_string())
    );

    let mut tree = sample_tree();
    let before = tree.clone();
    let patch = FieldPatch::new().label("renamed").property("id", json!("other"));
    assert!(matches!(
        tree.update("name", &patch),
        Err(TreeError::ProtectedKey(_))
    ));
    assert_eq!(tree, before);
}

#[test]
fn test_invalid_patch_leaves_field_untouched() {
    let mut tree = sample_tree();
    let before = tree.clone();
    let patch = FieldPatch::new()
        .label("renamed")
        .property("required", json!("not a bool"));
    assert!(matches!(
        tree.update("email", &patch),
        Err(TreeError::InvalidPatch { .. })
    ));
    assert_eq!(tree, before);
}

#[test]
fn test_patch_from_json_names_the_bad_key() {
    let mut object = serde_json::Map::new();
    object.insert("readOnly".to_string(), json!("yes"));
    let err = FieldPatch::from_json(object).unwrap_err();
    assert!(matches!(&err, TreeError::InvalidPatchValue { key, .. } if key == "readOnly"));
    assert!(err.to_string().starts_with("Patch key 'readOnly' has an invalid value"));
}

#[test]
fn test_patch_from_saved_shape() {
    let object = json!({
        "label": "Notes",
        "readOnly": true,
        "rows": 6,
        "validation": {"regex": "^a", "errorMessage": "Start with a"}
    });
    let serde_json::Value::Object(object) = object else {
        unreachable!()
    };
    let patch = FieldPatch::from_json(object).unwrap();
    assert_eq!(patch.label.as_deref(), Some("Notes"));
    assert_eq!(patch.read_only, Some(true));
    assert!(patch.properties.contains_key("rows"));

    let mut tree = FieldTree::new(vec![Field::new("notes", FieldType::TextareaField, None)]);
    tree.update("notes", &patch).unwrap();
    let notes = tree.find("notes").unwrap();
    match &notes.kind {
        FieldKind::TextareaField(config) => assert_eq!(config.rows, 6),
        other => panic!("unexpected kind {:?}", other),
    }
    assert_eq!(notes.validation.as_ref().unwrap().error_message, "Start with a");
}

#[test]
fn test_patch_can_replace_children() {
    let mut tree = sample_tree();
    let children = serde_json::to_value(vec![text("replacement")]).unwrap();
    let patch = FieldPatch::new().property("children", children);
    tree.update("g1", &patch).unwrap();
    assert!(tree.contains("replacement"));
    assert!(!tree.contains("email"));
}

#[test]
fn test_modify_runs_once_on_first_match() {
    let mut tree = sample_tree();
    let result = tree.modify("phone", |field| {
        field.label = "Phone number".to_string();
        field.id.clone()
    });
    assert_eq!(result.as_deref(), Some("phone"));
    assert_eq!(tree.find("phone").unwrap().label, "Phone number");
    assert!(tree.modify("missing", |_| ()).is_none());
}

#[test]
fn test_duplicate_ids_resolve_to_first_match() {
    let tree = FieldTree::new(vec![
        labelled("dup", FieldType::TextField, "first"),
        group("g", vec![labelled("dup", FieldType::TextField, "second")]),
        text("dup"),
    ]);
    assert_eq!(tree.duplicate_ids(), vec!["dup"]);
    assert_eq!(tree.find("dup").unwrap().label, "first");
    assert_eq!(tree.locate("dup"), Some((SlotLocator::Root, 0)));
}

#[test]
fn test_clone_is_an_independent_snapshot() {
    let tree = sample_tree();
    let mut copy = tree.clone();
    copy.remove("phone");
    assert!(tree.contains("phone"));
    assert!(!copy.contains("phone"));
}

#[test]
fn test_tree_json_is_a_plain_array() {
    let tree = FieldTree::new(vec![text("a")]);
    let json = serde_json::to_value(&tree).unwrap();
    assert!(json.is_array());
    let back: FieldTree = serde_json::from_value(json).unwrap();
    assert_eq!(back, tree);
}
