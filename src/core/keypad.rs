//! # Keypad State Machine
//!
//! Accumulates keypad presses into an expression and reduces it on `=`.
//!
//! ```text
//! Keypad
//! ├── operand: String               // what the big display line shows
//! ├── tokens: Vec<Token>            // committed expression, left to right
//! ├── paren_depth: usize            // unmatched '(' in tokens
//! ├── waiting_for_operand: bool     // next digit starts a fresh operand
//! ├── last_input_was_operator: bool // next operator replaces the last one
//! ├── value_pending: bool           // operand holds a computed value not yet committed
//! ├── angle_mode: AngleMode         // trig argument unit (scientific)
//! └── errored: bool                 // operand shows the error token
//! ```
//!
//! Two states matter for most transitions: **Entering** (mid-digit entry,
//! `waiting_for_operand == false`) and **Pending** (the next digit starts
//! a new operand).
//!
//! The expression is kept as typed tokens, so backspace pops a token
//! instead of pattern-matching the rendered text. The rendered string is
//! derived on demand by [`Keypad::expression`].

use log::{debug, info};

use crate::core::expr::{self, BinaryOp, EvalError, Token};
use crate::core::functions::{AngleMode, Constant, UnaryFunction};
use crate::core::key::{Key, KeypadKind};
use crate::core::number::{
    FUNCTION_DECIMAL_PLACES, RESULT_SIGNIFICANT_DIGITS, format_number, parse_operand,
    round_decimals, round_significant,
};

/// Shown in place of the operand when evaluation fails.
pub const ERROR_TOKEN: &str = "Error";

/// A successful `=`: what was evaluated and what it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub expression: String,
    pub result: String,
}

/// What a key press did, for callers that care (history, status line).
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Updated,
    /// Key not available on this keypad.
    Ignored,
    Evaluated(Evaluation),
    Failed(EvalError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keypad {
    kind: KeypadKind,
    operand: String,
    tokens: Vec<Token>,
    paren_depth: usize,
    waiting_for_operand: bool,
    last_input_was_operator: bool,
    /// Set by constants, functions, percent and recall: the operand is a
    /// value that `=` and parentheses must commit, although the next digit
    /// still replaces it.
    value_pending: bool,
    angle_mode: AngleMode,
    errored: bool,
}

impl Keypad {
    pub fn new(kind: KeypadKind) -> Self {
        Self {
            kind,
            operand: String::from("0"),
            tokens: Vec::new(),
            paren_depth: 0,
            waiting_for_operand: true,
            last_input_was_operator: false,
            value_pending: false,
            angle_mode: AngleMode::default(),
            errored: false,
        }
    }

    pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    pub fn kind(&self) -> KeypadKind {
        self.kind
    }

    pub fn operand(&self) -> &str {
        &self.operand
    }

    /// The committed expression as display text.
    pub fn expression(&self) -> String {
        expr::token::render(&self.tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn paren_depth(&self) -> usize {
        self.paren_depth
    }

    pub fn is_waiting_for_operand(&self) -> bool {
        self.waiting_for_operand
    }

    pub fn last_input_was_operator(&self) -> bool {
        self.last_input_was_operator
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn is_errored(&self) -> bool {
        self.errored
    }

    /// Dispatch one key press.
    pub fn press(&mut self, key: Key) -> Outcome {
        if !self.kind.supports(key) {
            debug!("{:?} keypad ignoring {:?}", self.kind, key);
            return Outcome::Ignored;
        }

        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Decimal => self.input_decimal(),
            Key::Percent => self.input_percent(),
            Key::Clear => self.clear(),
            Key::Backspace => self.backspace(),
            Key::ParenToggle => self.toggle_parenthesis(),
            Key::OpenParen => self.open_parenthesis(),
            Key::CloseParen => self.close_parenthesis(),
            Key::Operator(op) if op.is_arithmetic() => self.perform_operation(op),
            Key::Operator(_) => return Outcome::Ignored,
            Key::Equals => return self.evaluate(),
            Key::Function(func) => self.apply_function(func),
            Key::Constant(constant) => self.input_constant(constant),
            Key::Power => self.power(),
            Key::Root => self.root(),
            Key::AngleToggle => self.toggle_angle_mode(),
        }
        Outcome::Updated
    }

    // ── Operand entry ───────────────────────────────────────────────────────

    pub fn input_digit(&mut self, digit: u8) {
        self.recover_from_error();
        let digit = char::from(b'0' + digit.min(9));
        if self.waiting_for_operand {
            self.operand = digit.to_string();
            self.waiting_for_operand = false;
        } else if self.operand == "0" {
            self.operand = digit.to_string();
        } else {
            self.operand.push(digit);
        }
        self.last_input_was_operator = false;
        self.value_pending = false;
    }

    pub fn input_decimal(&mut self) {
        self.recover_from_error();
        if self.waiting_for_operand {
            self.operand = String::from("0.");
            self.waiting_for_operand = false;
        } else if !self.operand.contains('.') {
            self.operand.push('.');
        }
        self.last_input_was_operator = false;
        self.value_pending = false;
    }

    pub fn input_percent(&mut self) {
        self.recover_from_error();
        let value = parse_operand(&self.operand) / 100.0;
        self.operand = format_number(value);
        self.set_pending_value();
    }

    pub fn input_constant(&mut self, constant: Constant) {
        self.recover_from_error();
        self.operand = format_number(constant.value());
        self.set_pending_value();
    }

    /// Put a previously computed value into the operand (history recall).
    pub fn recall(&mut self, value: &str) {
        self.recover_from_error();
        self.operand = value.to_string();
        self.set_pending_value();
    }

    /// Full reset of entry state. The angle mode is a setting and survives.
    pub fn clear(&mut self) {
        *self = Keypad::new(self.kind).with_angle_mode(self.angle_mode);
    }

    pub fn backspace(&mut self) {
        if self.recover_from_error() {
            return;
        }

        if self.waiting_for_operand && !self.tokens.is_empty() {
            self.value_pending = false;
            match self.tokens.pop() {
                Some(Token::Operator(_)) => {
                    self.last_input_was_operator = false;
                    if let Some(Token::Number(_)) = self.tokens.last()
                        && let Some(Token::Number(previous)) = self.tokens.pop()
                    {
                        self.operand = previous;
                        self.waiting_for_operand = false;
                    }
                }
                Some(Token::OpenParen) => {
                    self.paren_depth = self.paren_depth.saturating_sub(1);
                }
                Some(Token::CloseParen) => {
                    self.paren_depth += 1;
                }
                Some(Token::Number(previous)) => {
                    self.operand = previous;
                    self.waiting_for_operand = false;
                }
                _ => {}
            }
            return;
        }

        if self.operand.chars().count() > 1 {
            self.operand.pop();
        } else {
            self.operand = String::from("0");
            self.waiting_for_operand = true;
            self.last_input_was_operator = matches!(self.tokens.last(), Some(Token::Operator(_)));
        }
    }

    // ── Parentheses ─────────────────────────────────────────────────────────

    /// Single-button parentheses: opens after an operator, at the start, or
    /// right after another `(`; closes otherwise.
    pub fn toggle_parenthesis(&mut self) {
        self.recover_from_error();
        let opens = self.last_input_was_operator
            || self.tokens.is_empty()
            || matches!(self.tokens.last(), Some(Token::OpenParen));

        if opens {
            self.open_parenthesis();
        } else {
            self.close_parenthesis();
        }
    }

    /// Open a group. A half-typed operand becomes an implicit factor.
    pub fn open_parenthesis(&mut self) {
        self.recover_from_error();
        if self.has_pending_operand() {
            self.commit_operand();
            self.tokens.push(Token::Operator(BinaryOp::Multiply));
        }
        self.tokens.push(Token::OpenParen);
        self.paren_depth += 1;
        self.waiting_for_operand = true;
        self.last_input_was_operator = false;
    }

    /// Close the innermost group. No-op when nothing is open.
    pub fn close_parenthesis(&mut self) {
        self.recover_from_error();
        if self.paren_depth > 0 {
            if self.has_pending_operand() {
                self.commit_operand();
            }
            self.tokens.push(Token::CloseParen);
            self.paren_depth -= 1;
            self.waiting_for_operand = true;
        }
        // Unmatched `)` is dropped and leaves a half-typed operand editable
        self.last_input_was_operator = false;
    }

    // ── Operators ───────────────────────────────────────────────────────────

    /// Commit the operand and a binary operator. Pressing another operator
    /// straight after replaces it.
    pub fn perform_operation(&mut self, op: BinaryOp) {
        self.recover_from_error();
        if self.waiting_for_operand && self.last_input_was_operator {
            if let Some(last) = self.tokens.last_mut() {
                *last = Token::Operator(op);
            }
        } else {
            self.commit_operand();
            self.tokens.push(Token::Operator(op));
        }
        self.waiting_for_operand = true;
        self.last_input_was_operator = true;
    }

    /// `xʸ`: the exponent is whatever gets entered next.
    pub fn power(&mut self) {
        self.recover_from_error();
        if !self.waiting_for_operand || !self.last_input_was_operator {
            self.commit_operand();
            self.tokens.push(Token::Operator(BinaryOp::Power));
        }
        self.waiting_for_operand = true;
        self.last_input_was_operator = true;
    }

    /// `ʸ√x`: raises the operand to `1/y`, leaving the group open for `y`.
    pub fn root(&mut self) {
        self.recover_from_error();
        if self.waiting_for_operand && self.last_input_was_operator {
            return;
        }
        self.commit_operand();
        self.tokens.extend([
            Token::Operator(BinaryOp::Power),
            Token::OpenParen,
            Token::Number(String::from("1")),
            Token::Operator(BinaryOp::Divide),
        ]);
        self.paren_depth += 1;
        self.waiting_for_operand = true;
        self.last_input_was_operator = true;
    }

    /// True when the operand is something the user entered or computed
    /// since the last commit.
    fn has_pending_operand(&self) -> bool {
        !self.waiting_for_operand || self.value_pending
    }

    /// Push the operand as a number token. Right after `)` the group itself
    /// is the left operand: a stale operand is not repeated, and a fresh
    /// one becomes an implicit factor.
    fn commit_operand(&mut self) {
        let after_group = matches!(self.tokens.last(), Some(Token::CloseParen));
        if after_group {
            if !self.has_pending_operand() {
                return;
            }
            self.tokens.push(Token::Operator(BinaryOp::Multiply));
        }
        self.tokens.push(Token::Number(self.operand.clone()));
        self.value_pending = false;
    }

    fn set_pending_value(&mut self) {
        self.waiting_for_operand = true;
        self.last_input_was_operator = false;
        self.value_pending = true;
    }

    // ── Scientific ──────────────────────────────────────────────────────────

    /// Apply a unary function to the operand only. Domain errors show up
    /// as `NaN` or `Infinity` in the operand.
    pub fn apply_function(&mut self, func: UnaryFunction) {
        self.recover_from_error();
        let value = parse_operand(&self.operand);
        let result = func.apply(value, self.angle_mode);
        self.operand = format_number(round_decimals(result, FUNCTION_DECIMAL_PLACES));
        self.set_pending_value();
    }

    pub fn toggle_angle_mode(&mut self) {
        self.angle_mode = self.angle_mode.toggled();
        debug!("Angle mode is now {}", self.angle_mode.label());
    }

    // ── Evaluation ──────────────────────────────────────────────────────────

    /// Reduce the expression. On failure the operand shows [`ERROR_TOKEN`]
    /// and the expression is left as it was.
    pub fn evaluate(&mut self) -> Outcome {
        self.recover_from_error();
        if self.tokens.is_empty() && self.waiting_for_operand {
            return Outcome::Updated;
        }

        let mut tokens = self.tokens.clone();
        if self.has_pending_operand() || self.tokens.is_empty() {
            if matches!(tokens.last(), Some(Token::CloseParen)) {
                tokens.push(Token::Operator(BinaryOp::Multiply));
            }
            tokens.push(Token::Number(self.operand.clone()));
        }
        tokens.extend(std::iter::repeat_n(Token::CloseParen, self.paren_depth));

        let expression = expr::token::render(&tokens);
        let outcome = match expr::evaluate_tokens(&tokens, self.angle_mode) {
            Ok(value) => {
                let result = format_number(round_significant(value, RESULT_SIGNIFICANT_DIGITS));
                info!("Evaluated {} = {}", expression, result);
                self.operand = result.clone();
                self.tokens.clear();
                self.paren_depth = 0;
                Outcome::Evaluated(Evaluation { expression, result })
            }
            Err(e) => {
                info!("Evaluation of {} failed: {}", expression, e);
                self.operand = String::from(ERROR_TOKEN);
                self.errored = true;
                Outcome::Failed(e)
            }
        };
        self.waiting_for_operand = true;
        self.last_input_was_operator = false;
        self.value_pending = false;
        outcome
    }

    /// Reset after a failed evaluation. Returns true if a reset happened.
    fn recover_from_error(&mut self) -> bool {
        if self.errored {
            self.clear();
            return true;
        }
        false
    }
}
