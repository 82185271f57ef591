use crate::value::format_number;
use std::fmt;

/// The AST of a parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // Arithmetic
    Sum(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Negate(Box<Expression>),

    // Leaf nodes
    Number(f64),
    FieldRef(String),
}

impl Expression {
    /// Collects referenced field ids in source order, without duplicates.
    pub fn collect_references(&self, references: &mut Vec<String>) {
        match self {
            Expression::FieldRef(id) => {
                if !references.contains(id) {
                    references.push(id.clone());
                }
            }
            Expression::Sum(l, r)
            | Expression::Subtract(l, r)
            | Expression::Multiply(l, r)
            | Expression::Divide(l, r) => {
                l.collect_references(references);
                r.collect_references(references);
            }
            Expression::Negate(v) => v.collect_references(references),
            Expression::Number(_) => {}
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expression::Sum(..) | Expression::Subtract(..) => 1,
            Expression::Multiply(..) | Expression::Divide(..) => 2,
            Expression::Negate(_) => 3,
            Expression::Number(_) | Expression::FieldRef(_) => 4,
        }
    }

    /// Formats the expression, wrapping it in parentheses if its precedence is lower than
    /// the parent's.
    fn fmt_with_precedence(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        let own = self.precedence();
        if own < parent {
            write!(f, "(")?;
        }
        match self {
            Expression::Number(n) => write!(f, "{}", format_number(*n))?,
            Expression::FieldRef(id) => write!(f, "{{{}}}", id)?,
            Expression::Negate(v) => {
                write!(f, "-")?;
                v.fmt_with_precedence(f, own)?;
            }
            // Right operands of non-associative operators bind one level tighter.
            Expression::Sum(l, r) => self.fmt_binary(f, l, "+", r, own)?,
            Expression::Subtract(l, r) => self.fmt_binary(f, l, "-", r, own + 1)?,
            Expression::Multiply(l, r) => self.fmt_binary(f, l, "*", r, own)?,
            Expression::Divide(l, r) => self.fmt_binary(f, l, "/", r, own + 1)?,
        }
        if own < parent {
            write!(f, ")")?;
        }
        Ok(())
    }

    fn fmt_binary(
        &self,
        f: &mut fmt::Formatter<'_>,
        l: &Expression,
        op: &str,
        r: &Expression,
        right_precedence: u8,
    ) -> fmt::Result {
        l.fmt_with_precedence(f, self.precedence())?;
        write!(f, " {} ", op)?;
        r.fmt_with_precedence(f, right_precedence)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_precedence(f, 0)
    }
}
