//! # Expression Evaluation
//!
//! Turns a token sequence into a number. The keypad hands over its token
//! history directly; typed input goes through [`lexer::lex`] first.
//!
//! ```text
//! "2+3×4" ──lex──► [2, +, 3, ×, 4] ──Parser──► Expr ──eval──► 14
//!                        ▲
//!          Keypad token history enters here
//! ```

pub mod lexer;
pub mod parser;
pub mod token;

use std::fmt;

use crate::core::functions::AngleMode;

pub use lexer::lex;
pub use parser::{Expr, Parser};
pub use token::{BinaryOp, Token};

/// Why an expression could not be reduced to a finite number.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A character the lexer does not understand.
    UnexpectedChar(char),
    /// A word that is neither a function nor a constant.
    UnknownIdentifier(String),
    /// Number literal that does not parse (e.g. `1.2.3`, a bare `-`).
    InvalidNumber(String),
    UnexpectedToken(String),
    /// Input ended where an operand was expected.
    UnexpectedEnd,
    UnbalancedParen,
    DivisionByZero,
    /// The result overflowed or left the real domain.
    NonFinite,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnexpectedChar(c) => write!(f, "unexpected character '{c}'"),
            EvalError::UnknownIdentifier(ident) => write!(f, "unknown identifier '{ident}'"),
            EvalError::InvalidNumber(text) => write!(f, "invalid number '{text}'"),
            EvalError::UnexpectedToken(token) => write!(f, "unexpected '{token}'"),
            EvalError::UnexpectedEnd => write!(f, "unexpected end of expression"),
            EvalError::UnbalancedParen => write!(f, "unbalanced parenthesis"),
            EvalError::DivisionByZero => write!(f, "division by zero"),
            EvalError::NonFinite => write!(f, "result is not a finite number"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Parse and evaluate a token sequence, rejecting non-finite results.
pub fn evaluate_tokens(tokens: &[Token], angle_mode: AngleMode) -> Result<f64, EvalError> {
    let expr = Parser::new(tokens).parse()?;
    let value = expr.eval(angle_mode)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

/// Lex, parse and evaluate typed input.
pub fn evaluate(input: &str, angle_mode: AngleMode) -> Result<f64, EvalError> {
    let tokens = lex(input)?;
    if tokens.is_empty() {
        return Err(EvalError::UnexpectedEnd);
    }
    evaluate_tokens(&tokens, angle_mode)
}
