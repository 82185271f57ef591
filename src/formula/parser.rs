//! Recursive-descent parser.
//!
//! ```text
//! expression := term (("+" | "-") term)*
//! term       := unary (("*" | "/") unary)*
//! unary      := ("+" | "-") unary | primary
//! primary    := number | "{" id "}" | "(" expression ")"
//! ```

use super::expression::Expression;
use super::lexer::{Spanned, Token};
use crate::error::FormulaError;

/// Deepest expression tree (and deepest nesting of `(` and unary signs) a formula may have.
pub const MAX_DEPTH: usize = 256;

/// A parsed subexpression and the height of its tree.
type Parsed = (Expression, usize);

pub struct Parser {
    tokens: Vec<Spanned>,
    cursor: usize,
    nesting: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Self {
            tokens,
            cursor: 0,
            nesting: 0,
        }
    }

    /// Parses the whole token stream as one expression.
    pub fn parse(mut self) -> Result<Expression, FormulaError> {
        if self.tokens.is_empty() {
            return Err(FormulaError::Empty);
        }
        let (expression, _) = self.expression()?;
        match self.tokens.get(self.cursor) {
            None => Ok(expression),
            Some(extra) => Err(unexpected(extra)),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|spanned| &spanned.token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let next = self.tokens.get(self.cursor).cloned();
        if next.is_some() {
            self.cursor += 1;
        }
        next
    }

    /// Runs `rule` one nesting level deeper.
    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<Parsed, FormulaError>,
    ) -> Result<Parsed, FormulaError> {
        if self.nesting >= MAX_DEPTH {
            return Err(FormulaError::TooDeep { limit: MAX_DEPTH });
        }
        self.nesting += 1;
        let parsed = rule(self);
        self.nesting -= 1;
        parsed
    }

    fn expression(&mut self) -> Result<Parsed, FormulaError> {
        let mut left = self.term()?;
        loop {
            let build: fn(Box<Expression>, Box<Expression>) -> Expression = match self.peek() {
                Some(Token::Plus) => Expression::Sum,
                Some(Token::Minus) => Expression::Subtract,
                _ => return Ok(left),
            };
            self.cursor += 1;
            let right = self.term()?;
            left = binary(build, left, right)?;
        }
    }

    fn term(&mut self) -> Result<Parsed, FormulaError> {
        let mut left = self.unary()?;
        loop {
            let build: fn(Box<Expression>, Box<Expression>) -> Expression = match self.peek() {
                Some(Token::Star) => Expression::Multiply,
                Some(Token::Slash) => Expression::Divide,
                _ => return Ok(left),
            };
            self.cursor += 1;
            let right = self.unary()?;
            left = binary(build, left, right)?;
        }
    }

    fn unary(&mut self) -> Result<Parsed, FormulaError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.cursor += 1;
                let (operand, height) = self.nested(Self::unary)?;
                Ok((Expression::Negate(Box::new(operand)), grow(height)?))
            }
            Some(Token::Plus) => {
                self.cursor += 1;
                self.nested(Self::unary)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Parsed, FormulaError> {
        let Some(spanned) = self.advance() else {
            return Err(FormulaError::UnexpectedEnd {
                expected: "a number, field reference or '('",
            });
        };
        match spanned.token {
            Token::Number(n) => Ok((Expression::Number(n), 1)),
            Token::FieldRef(id) => Ok((Expression::FieldRef(id), 1)),
            Token::LeftParen => {
                let inner = self.nested(Self::expression)?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RightParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(unexpected(&other)),
                    None => Err(FormulaError::UnexpectedEnd { expected: "')'" }),
                }
            }
            _ => Err(unexpected(&spanned)),
        }
    }
}

fn grow(height: usize) -> Result<usize, FormulaError> {
    if height >= MAX_DEPTH {
        Err(FormulaError::TooDeep { limit: MAX_DEPTH })
    } else {
        Ok(height + 1)
    }
}

fn binary(
    build: fn(Box<Expression>, Box<Expression>) -> Expression,
    (left, left_height): Parsed,
    (right, right_height): Parsed,
) -> Result<Parsed, FormulaError> {
    let height = grow(left_height.max(right_height))?;
    Ok((build(Box::new(left), Box::new(right)), height))
}

fn unexpected(spanned: &Spanned) -> FormulaError {
    FormulaError::UnexpectedToken {
        found: spanned.token.to_string(),
        position: spanned.position,
    }
}
