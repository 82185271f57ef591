//! Tests for the formula lexer, parser and evaluator.
mod common;
use common::*;
use formsculptor::field::{CalculatedConfig, Formatting};
use formsculptor::formula::parser::MAX_DEPTH;
use formsculptor::formula::{ERROR_SENTINEL, Expression, calculate, format_currency_usd};
use formsculptor::prelude::*;

fn eval(source: &str) -> f64 {
    Formula::parse(source).unwrap().evaluate(&InputValues::new())
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(eval("1 + 2 * 3"), 7.0);
    assert_eq!(eval("(1 + 2) * 3"), 9.0);
    assert_eq!(eval("10 - 4 - 3"), 3.0);
    assert_eq!(eval("16 / 4 / 2"), 2.0);
    assert_eq!(eval("-3 * -2"), 6.0);
    assert_eq!(eval("+5 - -5"), 10.0);
    assert_eq!(eval("1.5e2 + .5"), 150.5);
}

#[test]
fn test_ieee_division() {
    assert_eq!(eval("1 / 0"), f64::INFINITY);
    assert!(eval("0 / 0").is_nan());
}

#[test]
fn test_field_references() {
    let formula = Formula::parse("({price} * {qty}) - {discount} + {price}").unwrap();
    assert_eq!(formula.references(), vec!["price", "qty", "discount"]);

    let input = values([
        ("price", Value::from("2.5")),
        ("qty", Value::from(4)),
        ("discount", Value::from(true)),
    ]);
    assert_eq!(formula.evaluate(&input), 11.5);
}

#[test]
fn test_unusable_references_count_as_zero() {
    let formula = Formula::parse("{a} + {b} + {c} + 1").unwrap();
    let input = values([("a", Value::from("")), ("b", Value::from("n/a"))]);
    assert_eq!(formula.evaluate(&input), 1.0);
}

#[test]
fn test_references_may_contain_any_character() {
    let formula = Formula::parse("{field-1 (copy)} * 2").unwrap();
    assert_eq!(
        formula.expression(),
        &Expression::Multiply(
            Box::new(Expression::FieldRef("field-1 (copy)".to_string())),
            Box::new(Expression::Number(2.0)),
        )
    );
}

#[test]
fn test_parse_errors() {
    assert_eq!(Formula::parse("").unwrap_err(), FormulaError::Empty);
    assert_eq!(Formula::parse("   ").unwrap_err(), FormulaError::Empty);
    assert_eq!(
        Formula::parse("1 + x").unwrap_err(),
        FormulaError::UnexpectedCharacter {
            character: 'x',
            position: 4
        }
    );
    assert_eq!(
        Formula::parse("{a + 1").unwrap_err(),
        FormulaError::UnterminatedReference(0)
    );
    assert_eq!(Formula::parse("2 * {}").unwrap_err(), FormulaError::EmptyReference(4));
    assert!(matches!(
        Formula::parse("(1 + 2").unwrap_err(),
        FormulaError::UnexpectedEnd { .. }
    ));
    assert!(matches!(
        Formula::parse("1 2").unwrap_err(),
        FormulaError::UnexpectedToken { position: 2, .. }
    ));
    assert!(matches!(
        Formula::parse("2{x}").unwrap_err(),
        FormulaError::UnexpectedToken { .. }
    ));
    assert!(matches!(
        Formula::parse("* 3").unwrap_err(),
        FormulaError::UnexpectedToken { .. }
    ));
    assert_eq!(
        Formula::parse(".").unwrap_err(),
        FormulaError::InvalidNumber(".".to_string())
    );
}

#[test]
fn test_display_normalizes_parentheses() {
    let formula: Formula = "((1 + 2)) * {x} - (3 - 4)".parse().unwrap();
    assert_eq!(formula.to_string(), "(1 + 2) * {x} - (3 - 4)");

    let formula: Formula = "-(1 + 2) / 4".parse().unwrap();
    assert_eq!(formula.to_string(), "-(1 + 2) / 4");

    let reparsed: Formula = formula.to_string().parse().unwrap();
    assert_eq!(reparsed, formula);
}

#[test]
fn test_currency_formatting() {
    assert_eq!(format_currency_usd(0.0), "$0.00");
    assert_eq!(format_currency_usd(1234.5), "$1,234.50");
    assert_eq!(format_currency_usd(-3.0), "-$3.00");
    assert_eq!(format_currency_usd(999999.999), "$1,000,000.00");
    assert_eq!(format_currency_usd(f64::INFINITY), "Infinity");
}

#[test]
fn test_currency_formatting_of_huge_amounts() {
    let huge = format_currency_usd(1e40);
    assert!(huge.starts_with("$10,000,000,000,000,000,"), "{}", huge);
    assert!(huge.ends_with(".00"), "{}", huge);
    assert_eq!(huge.len(), "$".len() + 41 + 13 + ".00".len());

    assert_eq!(format_currency_usd(-2e15), "-$2,000,000,000,000,000.00");
    assert_eq!(format_currency_usd(1e15 + 0.25), "$1,000,000,000,000,000.00");
}

#[test]
fn test_calculate_displayed_value() {
    let config = CalculatedConfig {
        formula: "{a} / 4".to_string(),
        formatting: Formatting::None,
        ..CalculatedConfig::default()
    };
    assert_eq!(calculate(&config, &values([("a", Value::from(10))])), "2.5");

    let config = CalculatedConfig {
        formatting: Formatting::CurrencyUsd,
        ..config
    };
    assert_eq!(calculate(&config, &values([("a", Value::from(10))])), "$2.50");

    let broken = CalculatedConfig {
        formula: "{a} *".to_string(),
        ..config
    };
    assert_eq!(calculate(&broken, &InputValues::new()), ERROR_SENTINEL);
}

#[test]
fn test_deep_formulas_are_rejected() {
    let too_deep = FormulaError::TooDeep { limit: MAX_DEPTH };

    let negations = format!("{}1", "-".repeat(200_000));
    assert_eq!(Formula::parse(&negations).unwrap_err(), too_deep);
    let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    assert_eq!(Formula::parse(&parens).unwrap_err(), too_deep);
    let chain = vec!["1"; 100_000].join("+");
    assert_eq!(Formula::parse(&chain).unwrap_err(), too_deep);

    let config = CalculatedConfig {
        formula: negations,
        ..CalculatedConfig::default()
    };
    assert_eq!(calculate(&config, &InputValues::new()), ERROR_SENTINEL);
}

#[test]
fn test_moderate_nesting_still_parses() {
    let parens = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(eval(&parens), 1.0);
    let chain = vec!["1"; 200].join(" + ");
    assert_eq!(eval(&chain), 200.0);
    assert_eq!(eval(&format!("{}5", "-".repeat(100))), 5.0);
}
