//! Arithmetic formulas of calculated fields.
//!
//! A formula is an arithmetic expression over numbers and `{field_id}` references, e.g.
//! `({price} * {quantity}) - {discount}`. Formulas are parsed into an [`Expression`] tree and
//! evaluated without executing any code.

mod engine;
pub mod expression;
pub mod lexer;
pub mod parser;

pub use expression::Expression;

use crate::error::FormulaError;
use crate::field::{CalculatedConfig, Formatting};
use crate::value::{InputValues, format_number};
use engine::FormulaEngine;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// Displayed by a calculated field whose formula cannot be parsed.
pub const ERROR_SENTINEL: &str = "Error";

/// A parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    expression: Expression,
}

impl Formula {
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let tokens = lexer::tokenize(source)?;
        let expression = parser::Parser::new(tokens).parse()?;
        Ok(Self { expression })
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Field ids referenced by the formula, in order of first appearance.
    pub fn references(&self) -> Vec<String> {
        let mut references = Vec::new();
        self.expression.collect_references(&mut references);
        references
    }

    pub fn evaluate(&self, values: &InputValues) -> f64 {
        FormulaEngine::new(&self.expression, values).evaluate()
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// Computes the displayed value of a calculated field.
///
/// A formula that fails to parse yields [`ERROR_SENTINEL`], which is never currency-formatted.
pub fn calculate(config: &CalculatedConfig, values: &InputValues) -> String {
    match Formula::parse(&config.formula) {
        Ok(formula) => {
            let result = formula.evaluate(values);
            match config.formatting {
                Formatting::CurrencyUsd => format_currency_usd(result),
                Formatting::None => format_number(result),
            }
        }
        Err(e) => {
            log::debug!("Formula '{}' failed: {}", config.formula, e);
            ERROR_SENTINEL.to_string()
        }
    }
}

/// Above this magnitude an `f64` carries no cents.
const EXACT_CENTS_LIMIT: f64 = 1e15;

/// Formats a number as US dollars with thousands separators and two decimals, e.g.
/// `$1,234.50` or `-$3.00`. Non-finite values keep their plain display.
pub fn format_currency_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format_number(amount);
    }
    let abs = amount.abs();
    let (digits, cents) = if abs < EXACT_CENTS_LIMIT {
        let cents = (abs * 100.0).round() as u64;
        ((cents / 100).to_string(), cents % 100)
    } else {
        (format!("{:.0}", abs), 0)
    };
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk))
        .join(",");
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents)
}
