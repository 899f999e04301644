//! Text lexer for typed expressions (`--eval` and tests).
//!
//! Accepts both ASCII operators and the keypad glyphs, so anything the
//! display shows can be pasted back in.

use std::iter::Peekable;
use std::str::Chars;

use super::EvalError;
use super::token::{BinaryOp, Token};
use crate::core::functions::{Constant, UnaryFunction};

pub fn lex(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c.is_ascii_digit() || c == '.' {
            tokens.push(lex_number(&mut chars)?);
            continue;
        }
        if c.is_alphabetic() && c != 'π' {
            tokens.push(lex_identifier(&mut chars)?);
            continue;
        }

        let token = match c {
            '+' => Token::Operator(BinaryOp::Add),
            '-' | '−' => Token::Operator(BinaryOp::Subtract),
            '*' | '×' => Token::Operator(BinaryOp::Multiply),
            '/' | '÷' => Token::Operator(BinaryOp::Divide),
            '%' => Token::Operator(BinaryOp::Modulo),
            '^' => Token::Operator(BinaryOp::Power),
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '!' => Token::Factorial,
            'π' => Token::Constant(Constant::Pi),
            '√' => Token::Function(UnaryFunction::Sqrt),
            other => return Err(EvalError::UnexpectedChar(other)),
        };
        chars.next();
        tokens.push(token);
    }

    Ok(tokens)
}

fn lex_number(chars: &mut Peekable<Chars<'_>>) -> Result<Token, EvalError> {
    let mut text = String::new();
    while let Some(&c) = chars.peek() {
        if !(c.is_ascii_digit() || c == '.') {
            break;
        }
        text.push(c);
        chars.next();
    }
    if text == "." || text.matches('.').count() > 1 {
        return Err(EvalError::InvalidNumber(text));
    }
    Ok(Token::Number(text))
}

fn lex_identifier(chars: &mut Peekable<Chars<'_>>) -> Result<Token, EvalError> {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_alphabetic() || c == 'π' {
            break;
        }
        ident.push(c);
        chars.next();
    }
    let lowered = ident.to_lowercase();
    match lowered.as_str() {
        "pi" => Ok(Token::Constant(Constant::Pi)),
        "e" => Ok(Token::Constant(Constant::E)),
        _ => UnaryFunction::from_identifier(&lowered)
            .map(Token::Function)
            .ok_or(EvalError::UnknownIdentifier(ident)),
    }
}
