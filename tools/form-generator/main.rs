use clap::Parser;
use formsculptor::field::{Formatting, fresh_id};
use formsculptor::prelude::*;
use formsculptor::workspace::DEFAULT_ORG_ID;
use rand::{Rng, rngs::ThreadRng, seq::IndexedRandom};
use std::fs;

/// A CLI tool to generate random nested forms for the FormSculptor engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated form JSON to
    #[arg(short, long, default_value = "generated_form.json")]
    output: String,

    /// Number of top-level fields to generate (page breaks not included)
    #[arg(long, default_value_t = 12)]
    fields: usize,

    /// Maximum nesting depth of container fields
    #[arg(long, default_value_t = 2)]
    depth: usize,

    /// Number of pages; more than one adds page breaks and a progress tracker
    #[arg(long, default_value_t = 1)]
    pages: usize,

    /// Number of logic rules to attach
    #[arg(long, default_value_t = 4)]
    rules: usize,

    /// Organization owning the generated form
    #[arg(long, default_value = DEFAULT_ORG_ID)]
    organization: String,
}

const LEAF_TYPES: [FieldType; 16] = [
    FieldType::TextField,
    FieldType::TextareaField,
    FieldType::SelectField,
    FieldType::CheckboxField,
    FieldType::RadioGroupField,
    FieldType::DatePickerField,
    FieldType::TimeField,
    FieldType::RatingField,
    FieldType::SliderField,
    FieldType::SectionBreak,
    FieldType::ImageField,
    FieldType::HtmlField,
    FieldType::MatrixField,
    FieldType::LookupField,
    FieldType::FileUploadField,
    FieldType::SignatureField,
];

const CONTAINER_TYPES: [FieldType; 4] = [
    FieldType::GroupField,
    FieldType::RepeaterField,
    FieldType::TabsField,
    FieldType::AbTestField,
];

const OPERATORS: [Operator; 6] = [
    Operator::Eq,
    Operator::Neq,
    Operator::Gt,
    Operator::Lt,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.pages == 0 {
        eprintln!("Error: --pages must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating a new form ({} top-level fields, depth {}, {} page(s))...",
        cli.fields, cli.depth, cli.pages
    );

    let mut fields = generate_fields(&mut rng, cli.fields, cli.depth);
    println!("-> Generated {} top-level field(s).", fields.len());

    fields.extend(generate_order_total());
    println!("-> Added an order total calculated from quantity and unit price.");

    if cli.pages > 1 {
        insert_page_breaks(&mut rng, &mut fields, cli.pages);
        fields.insert(0, Field::new(fresh_id(), FieldType::ProgressTrackerField, None));
        println!("-> Split the form into {} pages.", cli.pages);
    }

    let mut form = SavedForm::new(cli.organization);
    form.fields = FieldTree::new(fields);
    form.form_settings.name = format!("Generated Form {}", rng.random_range(1000..10000));

    let attached = attach_rules(&mut rng, &mut form.fields, cli.rules);
    println!("-> Attached {} logic rule(s).", attached);

    if let Some(email) = form
        .fields
        .flatten()
        .into_iter()
        .find(|field| field.label == TextSubtype::Email.default_label())
    {
        let target = email.id.clone();
        form.form_settings.add_mapping("email", target);
        println!("-> Mapped the 'email' URL parameter.");
    }

    fs::write(&cli.output, form.to_json()?)?;

    println!(
        "Successfully generated '{}' ({} fields) and saved it to '{}'",
        form.name(),
        form.fields.len(),
        cli.output
    );

    Ok(())
}

/// Generates `count` fields; containers are filled recursively while `depth` allows.
fn generate_fields(rng: &mut ThreadRng, count: usize, depth: usize) -> Vec<Field> {
    (0..count)
        .map(|_| {
            if depth > 0 && rng.random_bool(0.2) {
                generate_container(rng, depth)
            } else {
                generate_leaf(rng)
            }
        })
        .collect()
}

fn generate_leaf(rng: &mut ThreadRng) -> Field {
    let field_type = *LEAF_TYPES.choose(rng).unwrap_or(&FieldType::TextField);
    let subtype = if field_type == FieldType::TextField {
        TextSubtype::ALL.choose(rng).copied()
    } else {
        None
    };
    let mut field = Field::new(fresh_id(), field_type, subtype);

    if field.as_options().is_some() {
        for label in ["Yes", "No", "Maybe"] {
            // Select and radio fields always accept options.
            let _ = field.add_option(label);
        }
    }
    if let FieldKind::TextField(config) = &mut field.kind {
        config.required = rng.random_bool(0.3);
    }
    field
}

fn generate_container(rng: &mut ThreadRng, depth: usize) -> Field {
    let field_type = *CONTAINER_TYPES.choose(rng).unwrap_or(&FieldType::GroupField);
    let mut field = Field::new(fresh_id(), field_type, None);
    for (_, slot) in field.slots_mut() {
        let count = rng.random_range(1..=3);
        slot.extend(generate_fields(rng, count, depth - 1));
    }
    field
}

/// Quantity and unit price sliders plus a currency-formatted total.
fn generate_order_total() -> [Field; 3] {
    let mut quantity = Field::new(fresh_id(), FieldType::SliderField, None);
    quantity.label = "Quantity".to_string();
    let mut price = Field::new(fresh_id(), FieldType::SliderField, None);
    price.label = "Unit Price".to_string();

    let mut total = Field::new(fresh_id(), FieldType::CalculatedField, None);
    total.label = "Order Total".to_string();
    if let FieldKind::CalculatedField(config) = &mut total.kind {
        config.formula = format!("{{{}}} * {{{}}}", quantity.id, price.id);
        config.formatting = Formatting::CurrencyUsd;
    }
    [quantity, price, total]
}

fn insert_page_breaks(rng: &mut ThreadRng, fields: &mut Vec<Field>, pages: usize) {
    let mut positions: Vec<usize> = (0..pages - 1)
        .map(|_| rng.random_range(1..=fields.len().max(1)))
        .collect();
    // Insert from the back so earlier positions stay valid.
    positions.sort_unstable_by(|a, b| b.cmp(a));
    for (index, position) in positions.into_iter().enumerate() {
        let mut page_break = Field::new(fresh_id(), FieldType::PageBreak, None);
        page_break.label = format!("Page {}", pages - index);
        fields.insert(position.min(fields.len()), page_break);
    }
}

/// Attaches up to `count` rules, each stored on its source field and targeting another field.
fn attach_rules(rng: &mut ThreadRng, tree: &mut FieldTree, count: usize) -> usize {
    let inputs: Vec<String> = tree
        .flatten()
        .into_iter()
        .filter(|field| RenderKind::of(field.field_type()) == RenderKind::Input)
        .map(|field| field.id.clone())
        .collect();
    let targets: Vec<String> = tree
        .flatten()
        .into_iter()
        .filter(|field| RenderKind::of(field.field_type()) != RenderKind::Structural)
        .map(|field| field.id.clone())
        .collect();
    if inputs.is_empty() || targets.len() < 2 {
        return 0;
    }

    let mut attached = 0;
    for index in 0..count {
        let (Some(source), Some(target)) = (inputs.choose(rng), targets.choose(rng)) else {
            break;
        };
        if source == target {
            continue;
        }
        let rule = generate_rule(rng, index + 1, source, target);
        if tree.modify(source, |field| field.logic.push(rule)).is_some() {
            attached += 1;
        }
    }
    attached
}

fn generate_rule(rng: &mut ThreadRng, number: usize, source: &str, target: &str) -> LogicRule {
    let operator = OPERATORS.choose(rng).cloned().unwrap_or(Operator::IsNotEmpty);
    let value = match operator {
        Operator::Gt | Operator::Lt => Some(Value::from(rng.random_range(0..100_i32))),
        Operator::Eq | Operator::Neq => Some(Value::from("yes")),
        _ => None,
    };
    let action = match rng.random_range(0..4) {
        0 => LogicAction::new(ActionType::Show, target),
        1 => LogicAction::new(ActionType::Hide, target),
        2 => LogicAction::new(ActionType::Disable, target),
        _ => LogicAction::set_value(target, Value::from("auto")),
    };
    LogicRule::new(
        format!("Rule {}", number),
        Conjunction::And,
        vec![Condition::new(source, operator, value)],
        vec![action],
    )
}
