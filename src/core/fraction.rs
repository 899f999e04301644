//! # Fraction Calculator
//!
//! Two mixed fractions, one operator, one result. Input is field by
//! field: each fraction has a whole part, a numerator and a denominator,
//! and digits go into whichever field is active.
//!
//! Arithmetic runs on improper fractions and the result is reduced back
//! to mixed form. A negative value carries its sign on the whole part, or
//! on the numerator when the whole part is zero.

use std::fmt;

use log::debug;

use crate::core::expr::BinaryOp;

/// Largest value a single field accepts from the keypad.
pub const MAX_FIELD_VALUE: i64 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedFraction {
    pub whole: i64,
    pub numerator: i64,
    pub denominator: i64,
}

impl Default for MixedFraction {
    fn default() -> Self {
        Self {
            whole: 0,
            numerator: 0,
            denominator: 1,
        }
    }
}

impl MixedFraction {
    pub fn new(whole: i64, numerator: i64, denominator: i64) -> Self {
        Self {
            whole,
            numerator,
            denominator,
        }
    }

    /// `(numerator, denominator)` of the equivalent improper fraction.
    pub fn to_improper(&self) -> (i64, i64) {
        if self.whole == 0 {
            return (self.numerator, self.denominator);
        }
        let sign = self.whole.signum();
        let magnitude = self.whole.abs() * self.denominator + self.numerator.abs();
        (sign * magnitude, self.denominator)
    }

    /// Reduce an improper fraction to mixed form. A zero denominator
    /// collapses to `0`.
    pub fn from_improper(numerator: i64, denominator: i64) -> Self {
        if denominator == 0 {
            return Self::default();
        }
        let divisor = gcd(numerator, denominator).max(1);
        let (mut num, mut den) = (numerator / divisor, denominator / divisor);
        if den < 0 {
            num = -num;
            den = -den;
        }

        let sign = num.signum();
        let whole = num.abs() / den;
        let remainder = num.abs() % den;
        if whole == 0 {
            Self::new(0, sign * remainder, den)
        } else {
            Self::new(sign * whole, remainder, den)
        }
    }

    /// Decimal value with at most six places, trailing zeros trimmed.
    pub fn to_decimal(&self) -> String {
        let (num, den) = self.to_improper();
        if den == 0 {
            return "0".to_string();
        }
        let text = format!("{:.6}", num as f64 / den as f64);
        let trimmed = text.trim_end_matches('0').trim_end_matches('.');
        match trimmed {
            "-0" | "" => "0".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for MixedFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.whole, self.numerator) {
            (0, 0) => write!(f, "0"),
            (whole, 0) => write!(f, "{whole}"),
            (0, numerator) => write!(f, "{numerator}/{}", self.denominator),
            (whole, numerator) => write!(f, "{whole} {numerator}/{}", self.denominator),
        }
    }
}

pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FractionOp {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl FractionOp {
    /// The fraction calculator only has the four arithmetic operators.
    pub fn from_binary(op: BinaryOp) -> Option<Self> {
        match op {
            BinaryOp::Add => Some(FractionOp::Add),
            BinaryOp::Subtract => Some(FractionOp::Subtract),
            BinaryOp::Multiply => Some(FractionOp::Multiply),
            BinaryOp::Divide => Some(FractionOp::Divide),
            BinaryOp::Modulo | BinaryOp::Power => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            FractionOp::Add => '+',
            FractionOp::Subtract => '-',
            FractionOp::Multiply => '×',
            FractionOp::Divide => '÷',
        }
    }
}

/// Exact arithmetic on two mixed fractions. Zero denominators and
/// division by zero give `0`.
pub fn calculate(lhs: MixedFraction, op: FractionOp, rhs: MixedFraction) -> MixedFraction {
    let (n1, d1) = lhs.to_improper();
    let (n2, d2) = rhs.to_improper();
    if d1 == 0 || d2 == 0 {
        return MixedFraction::default();
    }

    let (num, den) = match op {
        FractionOp::Add => (n1 * d2 + n2 * d1, d1 * d2),
        FractionOp::Subtract => (n1 * d2 - n2 * d1, d1 * d2),
        FractionOp::Multiply => (n1 * n2, d1 * d2),
        FractionOp::Divide => {
            if n2 == 0 {
                return MixedFraction::default();
            }
            (n1 * d2, d1 * n2)
        }
    };
    MixedFraction::from_improper(num, den)
}

/// Which input field digits go into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionField {
    Whole1,
    Numerator1,
    Denominator1,
    Whole2,
    Numerator2,
    Denominator2,
}

impl FractionField {
    const ORDER: [FractionField; 6] = [
        FractionField::Whole1,
        FractionField::Numerator1,
        FractionField::Denominator1,
        FractionField::Whole2,
        FractionField::Numerator2,
        FractionField::Denominator2,
    ];

    pub fn is_first(self) -> bool {
        matches!(
            self,
            FractionField::Whole1 | FractionField::Numerator1 | FractionField::Denominator1
        )
    }

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FractionPad {
    pub first: MixedFraction,
    pub second: MixedFraction,
    pub result: MixedFraction,
    pub operator: FractionOp,
    pub active: FractionField,
    pub has_calculated: bool,
}

impl Default for FractionPad {
    fn default() -> Self {
        Self::new()
    }
}

impl FractionPad {
    pub fn new() -> Self {
        Self {
            first: MixedFraction::default(),
            second: MixedFraction::default(),
            result: MixedFraction::default(),
            operator: FractionOp::default(),
            active: FractionField::Numerator1,
            has_calculated: false,
        }
    }

    fn active_value_mut(&mut self) -> &mut i64 {
        match self.active {
            FractionField::Whole1 => &mut self.first.whole,
            FractionField::Numerator1 => &mut self.first.numerator,
            FractionField::Denominator1 => &mut self.first.denominator,
            FractionField::Whole2 => &mut self.second.whole,
            FractionField::Numerator2 => &mut self.second.numerator,
            FractionField::Denominator2 => &mut self.second.denominator,
        }
    }

    /// Append a digit to the active field, keeping its sign. Values past
    /// [`MAX_FIELD_VALUE`] are refused.
    pub fn input_digit(&mut self, digit: u8) {
        let field = self.active_value_mut();
        let next = field.abs() * 10 + i64::from(digit.min(9));
        if next <= MAX_FIELD_VALUE {
            *field = if *field < 0 { -next } else { next };
        }
        self.has_calculated = false;
    }

    /// Drop the last digit of the active field.
    pub fn backspace(&mut self) {
        let field = self.active_value_mut();
        *field /= 10;
        self.has_calculated = false;
    }

    /// Negate the fraction the active field belongs to.
    pub fn toggle_sign(&mut self) {
        let fraction = if self.active.is_first() {
            &mut self.first
        } else {
            &mut self.second
        };
        if fraction.whole != 0 {
            fraction.whole = -fraction.whole;
        } else {
            fraction.numerator = -fraction.numerator;
        }
        self.has_calculated = false;
    }

    pub fn set_operator(&mut self, op: FractionOp) {
        self.operator = op;
        self.has_calculated = false;
    }

    pub fn select_field(&mut self, field: FractionField) {
        self.active = field;
    }

    pub fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub fn prev_field(&mut self) {
        self.active = self.active.prev();
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn calculate(&mut self) -> MixedFraction {
        self.result = calculate(self.first, self.operator, self.second);
        self.has_calculated = true;
        debug!(
            "Fraction {} {} {} = {}",
            self.first,
            self.operator.glyph(),
            self.second,
            self.result
        );
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
    }

    #[test]
    fn test_to_improper() {
        assert_eq!(MixedFraction::new(1, 1, 2).to_improper(), (3, 2));
        assert_eq!(MixedFraction::new(-1, 1, 2).to_improper(), (-3, 2));
        assert_eq!(MixedFraction::new(0, -1, 2).to_improper(), (-1, 2));
    }

    #[test]
    fn test_from_improper_reduces() {
        assert_eq!(MixedFraction::from_improper(6, 4), MixedFraction::new(1, 1, 2));
        assert_eq!(MixedFraction::from_improper(-6, 4), MixedFraction::new(-1, 1, 2));
        assert_eq!(MixedFraction::from_improper(1, -2), MixedFraction::new(0, -1, 2));
        assert_eq!(MixedFraction::from_improper(4, 2), MixedFraction::new(2, 0, 1));
        assert_eq!(MixedFraction::from_improper(3, 0), MixedFraction::default());
    }

    #[test]
    fn test_calculate_operations() {
        let half = MixedFraction::new(0, 1, 2);
        let third = MixedFraction::new(0, 1, 3);
        assert_eq!(calculate(half, FractionOp::Add, third), MixedFraction::new(0, 5, 6));
        assert_eq!(calculate(half, FractionOp::Subtract, third), MixedFraction::new(0, 1, 6));
        assert_eq!(calculate(third, FractionOp::Subtract, half), MixedFraction::new(0, -1, 6));
        assert_eq!(calculate(half, FractionOp::Multiply, third), MixedFraction::new(0, 1, 6));
        assert_eq!(calculate(half, FractionOp::Divide, third), MixedFraction::new(1, 1, 2));
    }

    #[test]
    fn test_calculate_degenerate_inputs() {
        let half = MixedFraction::new(0, 1, 2);
        let zero = MixedFraction::default();
        let bad = MixedFraction::new(0, 1, 0);
        assert_eq!(calculate(half, FractionOp::Divide, zero), MixedFraction::default());
        assert_eq!(calculate(half, FractionOp::Add, bad), MixedFraction::default());
    }

    #[test]
    fn test_display_and_decimal() {
        assert_eq!(MixedFraction::new(1, 1, 2).to_string(), "1 1/2");
        assert_eq!(MixedFraction::new(0, -3, 4).to_string(), "-3/4");
        assert_eq!(MixedFraction::new(3, 0, 1).to_string(), "3");
        assert_eq!(MixedFraction::default().to_string(), "0");
        assert_eq!(MixedFraction::new(1, 1, 2).to_decimal(), "1.5");
        assert_eq!(MixedFraction::new(0, 1, 3).to_decimal(), "0.333333");
        assert_eq!(MixedFraction::new(0, -1, 4).to_decimal(), "-0.25");
        assert_eq!(MixedFraction::default().to_decimal(), "0");
    }

    #[test]
    fn test_pad_digit_entry() {
        let mut pad = FractionPad::new();
        assert_eq!(pad.active, FractionField::Numerator1);
        pad.input_digit(3);
        pad.next_field();
        pad.backspace();
        pad.input_digit(4);
        assert_eq!(pad.first, MixedFraction::new(0, 3, 4));
    }

    #[test]
    fn test_pad_field_limit() {
        let mut pad = FractionPad::new();
        for _ in 0..5 {
            pad.input_digit(9);
        }
        assert_eq!(pad.first.numerator, 9999);
    }

    #[test]
    fn test_pad_sign_toggle_and_calculate() {
        let mut pad = FractionPad::new();
        pad.select_field(FractionField::Whole1);
        pad.input_digit(1);
        pad.toggle_sign();
        pad.select_field(FractionField::Numerator2);
        pad.input_digit(1);
        pad.select_field(FractionField::Denominator2);
        pad.backspace();
        pad.input_digit(2);
        pad.set_operator(FractionOp::Add);

        let result = pad.calculate();
        assert!(pad.has_calculated);
        assert_eq!(result, MixedFraction::new(0, -1, 2));

        pad.input_digit(1);
        assert!(!pad.has_calculated);
    }

    #[test]
    fn test_field_cycling_wraps() {
        assert_eq!(FractionField::Denominator2.next(), FractionField::Whole1);
        assert_eq!(FractionField::Whole1.prev(), FractionField::Denominator2);
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut pad = FractionPad::new();
        pad.input_digit(5);
        pad.set_operator(FractionOp::Divide);
        pad.clear();
        assert_eq!(pad, FractionPad::new());
    }
}
