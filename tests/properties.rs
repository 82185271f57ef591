//! Property tests over randomly shaped field trees.
mod common;
use common::*;
use formsculptor::prelude::*;
use proptest::prelude::*;
use proptest::sample::Index;

#[derive(Debug, Clone)]
enum Shape {
    Leaf(FieldType),
    Group(Vec<Shape>),
    Tabs(Vec<Vec<Shape>>),
    AbTest(Vec<Shape>, Vec<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf_types: Vec<FieldType> = FieldType::ALL
        .into_iter()
        .filter(|field_type| !field_type.is_container())
        .collect();
    let leaf = prop::sample::select(leaf_types).prop_map(Shape::Leaf);
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Shape::Group),
            prop::collection::vec(prop::collection::vec(inner.clone(), 0..3), 1..3)
                .prop_map(Shape::Tabs),
            (
                prop::collection::vec(inner.clone(), 0..3),
                prop::collection::vec(inner, 0..3)
            )
                .prop_map(|(a, b)| Shape::AbTest(a, b)),
        ]
    })
}

/// Ids are handed out in the order fields are created, parents before children.
fn build(shape: &Shape, next: &mut usize) -> Field {
    let id = format!("f{}", *next);
    *next += 1;
    match shape {
        Shape::Leaf(field_type) => Field::new(id, *field_type, None),
        Shape::Group(children) => group(&id, build_all(children, next)),
        Shape::Tabs(slots) => {
            let tab_ids: Vec<String> = (0..slots.len()).map(|n| format!("{}-tab{}", id, n)).collect();
            let built: Vec<Vec<Field>> = slots.iter().map(|slot| build_all(slot, next)).collect();
            tabs(&id, tab_ids.iter().map(String::as_str).zip(built).collect())
        }
        Shape::AbTest(a, b) => {
            let variant_a = build_all(a, next);
            let variant_b = build_all(b, next);
            ab_test(&id, variant_a, variant_b)
        }
    }
}

fn build_all(shapes: &[Shape], next: &mut usize) -> Vec<Field> {
    shapes.iter().map(|shape| build(shape, next)).collect()
}

fn tree() -> impl Strategy<Value = FieldTree> {
    prop::collection::vec(shape(), 0..6).prop_map(|shapes| {
        let mut next = 0;
        FieldTree::new(build_all(&shapes, &mut next))
    })
}

/// The root slot followed by every container slot, in traversal order.
fn slot_locators(tree: &FieldTree) -> Vec<SlotLocator> {
    let mut slots = vec![SlotLocator::Root];
    for field in tree.flatten() {
        slots.extend(field.slots().into_iter().map(|(locator, _)| locator));
    }
    slots
}

fn sorted_ids(tree: &FieldTree) -> Vec<String> {
    let mut ids = ids(tree);
    ids.sort();
    ids
}

proptest! {
    #[test]
    fn test_flatten_is_pre_order(tree in tree()) {
        let expected: Vec<String> = (0..tree.len()).map(|n| format!("f{}", n)).collect();
        prop_assert_eq!(ids(&tree), expected);
        prop_assert!(tree.duplicate_ids().is_empty());
    }

    #[test]
    fn test_json_round_trip(tree in tree()) {
        let json = serde_json::to_string(&tree).unwrap();
        let back: FieldTree = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, tree);
    }

    #[test]
    fn test_insert_then_remove_restores_tree(
        tree in tree(),
        slot in any::<Index>(),
        position in 0usize..8,
    ) {
        let slots = slot_locators(&tree);
        let target = slot.get(&slots);
        let mut edited = tree.clone();
        edited.insert(target, text("inserted"), position).unwrap();
        prop_assert_eq!(edited.locate("inserted").map(|(locator, _)| locator), Some(target.clone()));
        prop_assert_eq!(edited.len(), tree.len() + 1);
        prop_assert!(edited.remove("inserted").is_some());
        prop_assert_eq!(edited, tree);
    }

    #[test]
    fn test_moves_keep_every_field(tree in tree(), source in any::<Index>(), target in any::<Index>()) {
        prop_assume!(tree.len() >= 2);
        let all = ids(&tree);
        let source = source.get(&all).clone();
        let target = target.get(&all).clone();

        let mut edited = tree.clone();
        let mut controller = DragController::new();
        let started = controller
            .begin(DragSource::Field { field_id: source.clone() }, &edited)
            .is_some();
        prop_assert!(started, "drag did not start on '{}'", source);
        let outcome = controller.drop(Some(DropTarget::Field { field_id: target }), &mut edited);

        prop_assert_eq!(sorted_ids(&edited), sorted_ids(&tree));
        match outcome {
            DropOutcome::Moved { .. } => prop_assert!(edited.contains(&source)),
            DropOutcome::Unchanged => prop_assert_eq!(edited, tree),
            other => prop_assert!(false, "unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_evaluation_is_pure(tree in tree()) {
        let values = seed_values(&tree, &FormSettings::default(), &QueryParams::new());
        let first = evaluate(&tree, &values);
        prop_assert_eq!(&first, &evaluate(&tree, &values));
        prop_assert_eq!(first.len(), tree.len());
        prop_assert_eq!(first.visible_ids().len(), tree.len());
    }

    #[test]
    fn test_page_count_follows_root_breaks(tree in tree()) {
        let breaks = tree
            .fields()
            .iter()
            .filter(|field| field.field_type() == FieldType::PageBreak)
            .count();
        prop_assert_eq!(paginate(tree.fields()).page_count(), breaks + 1);
    }
}
