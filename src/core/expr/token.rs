//! Tokens shared by the keypad's token history and the text lexer.

use std::fmt;

use crate::core::functions::{Constant, UnaryFunction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOp {
    /// Glyph used in the rendered expression.
    pub fn glyph(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '×',
            BinaryOp::Divide => '÷',
            BinaryOp::Modulo => '%',
            BinaryOp::Power => '^',
        }
    }

    /// True for the four operators that have their own keypad button.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Number literal exactly as it was typed or displayed.
    Number(String),
    Operator(BinaryOp),
    OpenParen,
    CloseParen,
    Function(UnaryFunction),
    Constant(Constant),
    /// Postfix `!`.
    Factorial,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => f.write_str(text),
            Token::Operator(op) => write!(f, "{}", op.glyph()),
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
            Token::Function(func) => f.write_str(func.name()),
            Token::Constant(constant) => f.write_str(constant.symbol()),
            Token::Factorial => f.write_str("!"),
        }
    }
}

/// Concatenate tokens into display text.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}
