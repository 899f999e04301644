//! # Keypad Keys
//!
//! The closed set of buttons a keypad can emit, and the two button
//! layouts. Labels match what is printed on each button.

use crate::core::expr::BinaryOp;
use crate::core::functions::{Constant, UnaryFunction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Decimal,
    Percent,
    Clear,
    Backspace,
    /// Single `()` button: opens or closes depending on context.
    ParenToggle,
    OpenParen,
    CloseParen,
    Operator(BinaryOp),
    Equals,
    Function(UnaryFunction),
    Constant(Constant),
    /// `xʸ`
    Power,
    /// `ʸ√x`
    Root,
    AngleToggle,
}

/// Which calculator a keypad belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKind {
    Basic,
    Scientific,
}

const fn d(n: u8) -> Key {
    Key::Digit(n)
}

const fn func(f: UnaryFunction) -> Key {
    Key::Function(f)
}

const ADD: Key = Key::Operator(BinaryOp::Add);
const SUB: Key = Key::Operator(BinaryOp::Subtract);
const MUL: Key = Key::Operator(BinaryOp::Multiply);
const DIV: Key = Key::Operator(BinaryOp::Divide);
const PI: Key = Key::Constant(Constant::Pi);
const E: Key = Key::Constant(Constant::E);

pub const BASIC_LAYOUT: &[&[Key]] = &[
    &[Key::Clear, Key::ParenToggle, Key::Backspace, DIV],
    &[d(7), d(8), d(9), MUL],
    &[d(4), d(5), d(6), SUB],
    &[d(1), d(2), d(3), ADD],
    &[Key::Percent, d(0), Key::Decimal, Key::Equals],
];

pub const SCIENTIFIC_LAYOUT: &[&[Key]] = &[
    &[Key::AngleToggle, Key::Power, Key::Root, Key::Clear],
    &[
        func(UnaryFunction::Sin),
        Key::OpenParen,
        Key::CloseParen,
        func(UnaryFunction::Factorial),
        Key::Backspace,
    ],
    &[func(UnaryFunction::Cos), func(UnaryFunction::Reciprocal), PI, E, DIV],
    &[func(UnaryFunction::Tan), d(7), d(8), d(9), MUL],
    &[func(UnaryFunction::Cot), d(4), d(5), d(6), SUB],
    &[func(UnaryFunction::Ln), d(1), d(2), d(3), ADD],
    &[func(UnaryFunction::Lg), Key::Percent, d(0), Key::Decimal, Key::Equals],
];

impl KeypadKind {
    pub fn layout(self) -> &'static [&'static [Key]] {
        match self {
            KeypadKind::Basic => BASIC_LAYOUT,
            KeypadKind::Scientific => SCIENTIFIC_LAYOUT,
        }
    }

    /// Whether this keypad reacts to `key`. The basic keypad also accepts
    /// explicit parentheses so typed `(` and `)` work on both.
    pub fn supports(self, key: Key) -> bool {
        match self {
            KeypadKind::Scientific => true,
            KeypadKind::Basic => !matches!(
                key,
                Key::Function(_) | Key::Constant(_) | Key::Power | Key::Root | Key::AngleToggle
            ),
        }
    }
}

impl Key {
    pub fn label(self) -> String {
        match self {
            Key::Digit(n) => n.to_string(),
            Key::Decimal => ".".into(),
            Key::Percent => "%".into(),
            Key::Clear => "C".into(),
            Key::Backspace => "⌫".into(),
            Key::ParenToggle => "()".into(),
            Key::OpenParen => "(".into(),
            Key::CloseParen => ")".into(),
            Key::Operator(op) => op.glyph().to_string(),
            Key::Equals => "=".into(),
            Key::Function(f) => f.name().into(),
            Key::Constant(constant) => constant.symbol().into(),
            Key::Power => "xʸ".into(),
            Key::Root => "ʸ√x".into(),
            Key::AngleToggle => "DEG".into(),
        }
    }

    /// Map a typed character to a key. Used for keyboard input and for
    /// driving keypads from strings in tests.
    pub fn from_char(c: char) -> Option<Key> {
        let key = match c {
            '0'..='9' => Key::Digit(c as u8 - b'0'),
            '.' => Key::Decimal,
            '%' => Key::Percent,
            '+' => ADD,
            '-' | '−' => SUB,
            '*' | '×' | 'x' => MUL,
            '/' | '÷' => DIV,
            '^' => Key::Power,
            '(' => Key::OpenParen,
            ')' => Key::CloseParen,
            '=' => Key::Equals,
            'C' => Key::Clear,
            '⌫' => Key::Backspace,
            '!' => func(UnaryFunction::Factorial),
            'π' | 'p' => PI,
            'e' => E,
            _ => return None,
        };
        Some(key)
    }
}
