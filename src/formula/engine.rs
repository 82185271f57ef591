use super::expression::Expression;
use crate::value::{InputValues, Value};

// This macro generates a match arm for a binary arithmetic operation.
macro_rules! eval_op {
    ($self:ident, $l:ident, $r:ident, $op_fn:expr) => {{
        let op: fn(f64, f64) -> f64 = $op_fn;
        op($self.evaluate_recursive($l), $self.evaluate_recursive($r))
    }};
}

/// Evaluates a formula AST against the current input values.
///
/// Arithmetic follows IEEE-754, so division by zero yields an infinity or `NaN` instead of
/// failing.
pub(super) struct FormulaEngine<'a> {
    expression: &'a Expression,
    values: &'a InputValues,
}

impl<'a> FormulaEngine<'a> {
    pub(super) fn new(expression: &'a Expression, values: &'a InputValues) -> Self {
        Self { expression, values }
    }

    pub(super) fn evaluate(&self) -> f64 {
        self.evaluate_recursive(self.expression)
    }

    fn evaluate_recursive(&self, expr: &Expression) -> f64 {
        match expr {
            Expression::Sum(l, r) => eval_op!(self, l, r, |a, b| a + b),
            Expression::Subtract(l, r) => eval_op!(self, l, r, |a, b| a - b),
            Expression::Multiply(l, r) => eval_op!(self, l, r, |a, b| a * b),
            Expression::Divide(l, r) => eval_op!(self, l, r, |a, b| a / b),
            Expression::Negate(v) => -self.evaluate_recursive(v),
            Expression::Number(n) => *n,
            Expression::FieldRef(id) => self.field_value(id),
        }
    }

    /// Numeric value of a referenced input: unset, empty and non-numeric inputs count as 0.
    fn field_value(&self, id: &str) -> f64 {
        let number = self.values.get(id).map_or(0.0, Value::to_number);
        if number.is_nan() { 0.0 } else { number }
    }
}
