//! End-to-end tests: build a form in an editing session, save it, and run it as a respondent.
mod common;
use common::*;
use formsculptor::prelude::*;
use formsculptor::workspace::DEFAULT_USER_ID;
use serde_json::json;

/// Contact form over two pages with a conditional field and a calculated total.
fn build_order_form(builder: &mut FormBuilder) -> (String, String, String, String) {
    let email = builder
        .add_field(&SlotLocator::Root, FieldType::TextField, Some(TextSubtype::Email), APPEND)
        .unwrap();
    builder
        .update_field(&email, &FieldPatch::new().property("required", json!(true)))
        .unwrap();

    let wants_gift = builder
        .add_field(&SlotLocator::Root, FieldType::CheckboxField, None, APPEND)
        .unwrap();
    let message = builder
        .add_field(&SlotLocator::Root, FieldType::TextareaField, None, APPEND)
        .unwrap();
    let rule = LogicRule::new(
        "Show gift message",
        Conjunction::And,
        vec![Condition::new(wants_gift.clone(), Operator::Neq, Some(Value::from(true)))],
        vec![LogicAction::new(ActionType::Hide, message.clone())],
    );
    builder
        .update_field(&wants_gift, &FieldPatch::new().logic(vec![rule]))
        .unwrap();

    let page_break = builder
        .add_field(&SlotLocator::Root, FieldType::PageBreak, None, APPEND)
        .unwrap();
    builder
        .update_field(&page_break, &FieldPatch::new().label("Payment"))
        .unwrap();

    let quantity = builder
        .add_field(&SlotLocator::Root, FieldType::SliderField, None, APPEND)
        .unwrap();
    let total = builder
        .add_field(&SlotLocator::Root, FieldType::CalculatedField, None, APPEND)
        .unwrap();
    let formula = format!("{{{}}} * 12.5", quantity);
    builder
        .update_field(
            &total,
            &FieldPatch::new()
                .property("formula", json!(formula))
                .property("formatting", json!("currency_usd")),
        )
        .unwrap();

    (email, message, quantity, total)
}

#[test]
fn test_builder_to_preview_round_trip() {
    let mut library = FormLibrary::open(Box::new(MemoryRepository::new())).unwrap();
    let who = library.identity(DEFAULT_USER_ID).unwrap();

    let mut builder = FormBuilder::new(library.create(&who).unwrap());
    let (email, message, quantity, total) = build_order_form(&mut builder);
    let mut settings = builder.settings().clone();
    settings.name = "Gift order".to_string();
    settings.add_mapping("email", email.clone());
    builder.set_settings(settings);
    builder.save(&mut library, &who).unwrap();

    let form_id = builder.form().id.clone();
    let stored = library.load(&who, &form_id).unwrap();
    assert_eq!(stored.name(), "Gift order");
    assert_eq!(stored.fields, *builder.fields());

    let params: QueryParams = [("email", "ada@example.com")].into_iter().collect();
    let mut run = FormRun::new(&stored, &params);

    // Page one: the message is hidden until the checkbox is ticked.
    assert_eq!(run.pagination().page_count(), 2);
    assert_eq!(run.state().value(&email), Some(&Value::from("ada@example.com")));
    assert!(!run.state().is_visible(&message));
    assert_eq!(run.current_page_views().len(), 2);

    let gift_id = run.current_page_views()[1].field.id.clone();
    run.apply(ValueChange::new(gift_id, true));
    assert!(run.state().is_visible(&message));
    assert_eq!(run.current_page_views().len(), 3);

    // Page two: the slider default feeds the total.
    assert!(run.next_page_validated().unwrap());
    assert!(run.is_last_page());
    assert_eq!(run.state().value(&total), Some(&Value::from("$625.00")));
    run.set_value(quantity.clone(), Value::from(2));
    assert_eq!(run.state().value(&total), Some(&Value::from("$25.00")));

    assert!(run.previous_page());
    assert_eq!(run.current_page(), 0);
}

#[test]
fn test_required_field_blocks_next_page() {
    let mut builder = FormBuilder::new(SavedForm::new("org_default"));
    let (email, ..) = build_order_form(&mut builder);

    let mut run = builder.preview(&QueryParams::new());
    let issues = run.next_page_validated().unwrap_err();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field_id(), email);
    assert_eq!(run.current_page(), 0);

    run.set_value(email, Value::from("someone@example.com"));
    assert!(run.validate_current_page().is_empty());
    assert_eq!(run.next_page_validated(), Ok(true));
}

#[test]
fn test_session_selection_follows_edits() {
    let mut builder = FormBuilder::new(SavedForm::new("org_default"));
    let tabs = builder
        .add_field(&SlotLocator::Root, FieldType::TabsField, None, APPEND)
        .unwrap();
    assert_eq!(builder.selected_id(), Some(tabs.as_str()));

    let tab = builder.add_tab(&tabs, "Extra").unwrap();
    let slot = SlotLocator::Tab {
        container: tabs.clone(),
        tab: tab.clone(),
    };
    let inner = builder
        .add_field(&slot, FieldType::SelectField, None, APPEND)
        .unwrap();
    assert_eq!(builder.selected().unwrap().id, inner);

    let option = builder.add_option(&inner, "Large Box").unwrap();
    assert!(builder.rename_option(&inner, &option, "Small Box").unwrap());
    assert_eq!(builder.selected().unwrap().options()[1].value, "small_box");
    assert!(builder.remove_option(&inner, &option).unwrap());
    assert!(matches!(
        builder.add_option("missing", "x"),
        Err(TreeError::FieldNotFound(_))
    ));

    // Removing the tab takes the selected field with it.
    assert!(builder.remove_tab(&tabs, &tab).unwrap().is_some());
    assert!(builder.selected_id().is_none());
    assert!(!builder.fields().contains(&inner));

    builder.select(Some(&tabs));
    assert!(builder.remove_field(&tabs).is_some());
    assert!(builder.selected().is_none());
    assert!(builder.fields().is_empty());
}

#[test]
fn test_session_drag_and_drop() {
    let mut builder = FormBuilder::new(SavedForm::new("org_default"));
    let group = builder
        .add_field(&SlotLocator::Root, FieldType::GroupField, None, APPEND)
        .unwrap();
    let name = builder
        .add_field(&SlotLocator::Root, FieldType::TextField, None, APPEND)
        .unwrap();

    assert!(builder.begin_drag(DragSource::Control {
        field_type: FieldType::DatePickerField,
        subtype: None,
    }));
    assert!(builder.drag_payload().is_some());
    let target = DropTarget::Slot(SlotLocator::Children {
        container: group.clone(),
    });
    let DropOutcome::Inserted { field_id, .. } = builder.drop(Some(target)) else {
        panic!("expected an insertion");
    };
    assert_eq!(builder.selected_id(), Some(field_id.as_str()));

    assert!(builder.begin_drag(DragSource::Field {
        field_id: name.clone()
    }));
    assert_eq!(builder.selected_id(), Some(name.as_str()));
    let outcome = builder.drop(Some(DropTarget::Field {
        field_id: field_id.clone(),
    }));
    assert!(matches!(outcome, DropOutcome::Moved { .. }));
    assert_eq!(
        builder.fields().locate(&name),
        Some((SlotLocator::Children { container: group }, 0))
    );

    assert!(builder.begin_drag(DragSource::Field { field_id: name }));
    builder.cancel_drag();
    assert!(builder.drag_payload().is_none());
    assert!(!builder.begin_drag(DragSource::Field {
        field_id: "missing".to_string()
    }));
}

#[test]
fn test_preview_reload_keeps_values() {
    let mut builder = FormBuilder::new(SavedForm::new("org_default"));
    let name = builder
        .add_field(&SlotLocator::Root, FieldType::TextField, None, APPEND)
        .unwrap();
    builder
        .add_field(&SlotLocator::Root, FieldType::PageBreak, None, APPEND)
        .unwrap();
    builder
        .add_field(&SlotLocator::Root, FieldType::TextField, None, APPEND)
        .unwrap();

    let mut run = builder.preview(&QueryParams::new());
    run.set_value(name.clone(), Value::from("kept"));
    assert!(run.next_page());

    let mut edited = builder.fields().clone();
    edited.insert(&SlotLocator::Root, text("late"), APPEND).unwrap();
    run.reload(edited.clone());
    assert_eq!(run.current_page(), 1);
    assert_eq!(run.state().value(&name), Some(&Value::from("kept")));

    let first_break = edited
        .flatten()
        .iter()
        .find(|f| f.field_type() == FieldType::PageBreak)
        .map(|f| f.id.clone())
        .unwrap();
    edited.remove(&first_break);
    run.reload(edited);
    assert_eq!(run.current_page(), 0);
    assert!(run.is_last_page());
    assert!(run.values().contains_key(&name));
}

#[test]
fn test_generated_style_form_loads_from_json() {
    let json = json!({
        "id": "form-1",
        "organizationId": "org_default",
        "savedAt": "2024-05-01T12:00:00Z",
        "formSettings": {"name": "Survey", "urlParameterMapping": []},
        "fields": [
            {"id": "progress", "type": "ProgressTrackerField", "label": "Progress Tracker"},
            {"id": "q1", "type": "RadioGroupField", "label": "Happy?",
             "options": [{"id": "o1", "label": "Yes", "value": "yes"}]},
            {"id": "pb", "type": "PageBreak", "label": "Details"},
            {"id": "ab", "type": "ABTestField", "label": "Variant",
             "variantA": [{"id": "why", "type": "TextareaField", "label": "Why?"}],
             "variantB": [{"id": "why_b", "type": "TextareaField", "label": "Why (B)?"}]}
        ]
    });
    let form = SavedForm::from_json(&json.to_string()).unwrap();
    assert_eq!(form.fields.len(), 6);

    let mut run = FormRun::new(&form, &QueryParams::new());
    let progress = run.progress().unwrap();
    assert_eq!(progress.title(), "Step 1 of 2");
    assert_eq!(progress.label, "Start");

    run.next_page();
    assert_eq!(run.progress().unwrap().label, "Details");
    let views = run.current_page_views();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].children()[0].views[0].field.id, "why");
    // Variant B is evaluated even though only A renders.
    assert!(run.state().get("why_b").is_some());
}
