use clap::{Parser, Subcommand};
use formsculptor::formula::format_currency_usd;
use formsculptor::prelude::*;
use formsculptor::value::format_number;
use formsculptor::workspace::DEFAULT_USER_ID;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Inspect, evaluate and preview FormSculptor forms from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the palette templates grouped by category
    Palette,

    /// Evaluate a saved form against input values and print the derived state
    Evaluate {
        /// Path to a saved form (or a bare field array) in JSON
        form_path: String,

        /// Path to a JSON object of field id -> value, applied after seeding
        #[arg(long)]
        values: Option<String>,

        /// URL parameter used for seeding, as NAME=VALUE (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Page to show, zero-based
        #[arg(long, default_value_t = 0)]
        page: usize,
    },

    /// Parse a formula, print its normalized form and evaluate it
    Formula {
        /// The formula source, e.g. "{price} * {quantity}"
        expression: String,

        /// Path to a JSON object of field id -> value
        #[arg(long)]
        values: Option<String>,

        /// Format the result as US dollars
        #[arg(long)]
        currency: bool,
    },

    /// List the forms stored in a workspace snapshot
    Forms {
        /// Directory holding the snapshot (defaults to $FORMSCULPTOR_DATA_DIR or ".")
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Snapshot file name without the .json extension
        #[arg(long)]
        storage_key: Option<String>,

        /// User whose organization's forms are listed
        #[arg(long, default_value = DEFAULT_USER_ID)]
        user: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Palette => print_palette(),
        Command::Evaluate {
            form_path,
            values,
            params,
            page,
        } => run_evaluation(&form_path, values.as_deref(), params, page),
        Command::Formula {
            expression,
            values,
            currency,
        } => run_formula(&expression, values.as_deref(), currency),
        Command::Forms {
            data_dir,
            storage_key,
            user,
        } => list_forms(data_dir, storage_key, &user),
    }
}

fn print_palette() {
    let mut current = None;
    for template in palette() {
        if current != Some(template.category) {
            println!("\n{}", template.category);
            current = Some(template.category);
        }
        println!("  {:<22} {}", template.key, template.label);
    }
    println!();
}

fn run_evaluation(
    form_path: &str,
    values_path: Option<&str>,
    params: Vec<(String, String)>,
    page: usize,
) {
    let total_start = Instant::now();

    let form = load_form(form_path);
    let duplicates = form.fields.duplicate_ids();
    if !duplicates.is_empty() {
        eprintln!("Warning: duplicate field ids: {}", duplicates.join(", "));
    }

    let params: QueryParams = params.into_iter().collect();
    let mut run = FormRun::new(&form, &params);
    for (id, value) in load_values(values_path) {
        run.set_value(id, value);
    }
    for _ in 0..page {
        if !run.next_page() {
            break;
        }
    }

    println!("\nForm: {} ({})", form.name(), form.id);
    println!(
        "Fields: {} ({} at top level)",
        form.fields.len(),
        form.fields.fields().len()
    );

    println!("\n--- Field State ---");
    println!(
        "{:<38} {:<22} {:<8} {:<10} Value",
        "Id", "Type", "Visible", "Read-only"
    );
    for field in form.fields.flatten() {
        let Some(state) = run.state().get(&field.id) else {
            continue;
        };
        let value = state
            .value
            .as_ref()
            .map_or_else(|| "<unset>".to_string(), |v| format!("{:?}", v));
        println!(
            "{:<38} {:<22} {:<8} {:<10} {}",
            field.id,
            field.field_type().as_str(),
            state.is_visible,
            state.is_read_only,
            value
        );
    }

    let pagination = run.pagination();
    println!("\n--- Pagination ---");
    println!("Pages: {}", pagination.page_count());
    println!("Steps: {}", pagination.step_labels.join(" -> "));
    if let Some(progress) = run.progress() {
        println!("{}: {}", progress.title(), progress.label);
    }

    println!(
        "\n--- Page {} of {} ---",
        run.current_page() + 1,
        pagination.page_count()
    );
    for view in run.current_page_views() {
        println!("  [{:?}] {}", view.kind(), view.field.label);
    }

    let issues = run.validate_current_page();
    if issues.is_empty() {
        println!("\nCurrent page validates.");
    } else {
        println!("\n--- Validation Issues ---");
        for issue in issues {
            println!("  -> {}", issue);
        }
    }

    println!("\nTotal Execution: {:?}\n", total_start.elapsed());
}

fn run_formula(expression: &str, values_path: Option<&str>, currency: bool) {
    let formula = Formula::parse(expression)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse formula: {}", e)));
    let values = load_values(values_path);

    println!("Normalized: {}", formula);
    let references = formula.references();
    if !references.is_empty() {
        println!("References: {}", references.join(", "));
    }

    let result = formula.evaluate(&values);
    let display = if currency {
        format_currency_usd(result)
    } else {
        format_number(result)
    };
    println!("Result:     {}", display);
}

fn list_forms(data_dir: Option<PathBuf>, storage_key: Option<String>, user: &str) {
    let mut config = StoreConfig::from_env();
    if let Some(directory) = data_dir {
        config = config.with_directory(directory);
    }
    if let Some(key) = storage_key {
        config = config.with_storage_key(key);
    }
    println!("Snapshot: {}", config.snapshot_path().display());

    let library = FormLibrary::open(Box::new(JsonFileRepository::new(config)))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to open workspace: {}", e)));
    let who = library
        .identity(user)
        .unwrap_or_else(|| exit_with_error(&format!("Unknown user '{}'", user)));
    let forms = library
        .list(&who)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to list forms: {}", e)));

    println!("Organization: {}", who.organization_id);
    if forms.is_empty() {
        println!("  -> No forms saved");
    }
    for form in forms {
        println!(
            "  -> {} ({}) - {} fields, saved {}",
            form.name(),
            form.id,
            form.fields.len(),
            form.saved_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

/// Reads a saved form, or wraps a bare field array in a new form of the default organization.
fn load_form(path: &str) -> SavedForm {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    if let Ok(form) = SavedForm::from_json(&json) {
        return form;
    }
    let fields: FieldTree = serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse form JSON: {}", e)));
    let mut form = SavedForm::new(formsculptor::workspace::DEFAULT_ORG_ID);
    form.fields = fields;
    form
}

fn load_values(path: Option<&str>) -> InputValues {
    let Some(path) = path else {
        return InputValues::new();
    };
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse values JSON: {}", e)))
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
