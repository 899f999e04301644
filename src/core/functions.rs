//! # Scientific Functions
//!
//! Unary functions and constants for the scientific keypad and the
//! expression evaluator. Domain errors are not errors here: they come back
//! as `NaN` or an infinity, and the caller decides how to show them.

use serde::{Deserialize, Serialize};
use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

/// Largest integer whose factorial is finite in an `f64`.
const MAX_FINITE_FACTORIAL: f64 = 170.0;

/// How trigonometric functions interpret their argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    #[serde(alias = "deg")]
    Degrees,
    #[serde(alias = "rad")]
    Radians,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }

    /// Short indicator shown on the keypad and in the title bar.
    pub fn label(self) -> &'static str {
        match self {
            AngleMode::Degrees => "DEG",
            AngleMode::Radians => "RAD",
        }
    }

    fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleMode::Degrees => value * PI / 180.0,
            AngleMode::Radians => value,
        }
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radians" => Ok(AngleMode::Radians),
            other => Err(format!("unknown angle mode '{other}' (expected deg or rad)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFunction {
    Sin,
    Cos,
    Tan,
    /// Reciprocal of the tangent; infinite where the tangent is zero.
    Cot,
    Ln,
    Lg,
    Sqrt,
    Reciprocal,
    Factorial,
}

impl UnaryFunction {
    pub fn apply(self, value: f64, angle_mode: AngleMode) -> f64 {
        match self {
            UnaryFunction::Sin => angle_mode.to_radians(value).sin(),
            UnaryFunction::Cos => angle_mode.to_radians(value).cos(),
            UnaryFunction::Tan => angle_mode.to_radians(value).tan(),
            UnaryFunction::Cot => 1.0 / angle_mode.to_radians(value).tan(),
            UnaryFunction::Ln => value.ln(),
            UnaryFunction::Lg => value.log10(),
            UnaryFunction::Sqrt => value.sqrt(),
            UnaryFunction::Reciprocal => 1.0 / value,
            UnaryFunction::Factorial => factorial(value),
        }
    }

    /// Name as typed in an expression, or as printed on the key.
    pub fn name(self) -> &'static str {
        match self {
            UnaryFunction::Sin => "sin",
            UnaryFunction::Cos => "cos",
            UnaryFunction::Tan => "tan",
            UnaryFunction::Cot => "cot",
            UnaryFunction::Ln => "ln",
            UnaryFunction::Lg => "lg",
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Reciprocal => "1/x",
            UnaryFunction::Factorial => "n!",
        }
    }

    /// Look up a function by the identifier used in typed expressions.
    pub fn from_identifier(ident: &str) -> Option<Self> {
        match ident {
            "sin" => Some(UnaryFunction::Sin),
            "cos" => Some(UnaryFunction::Cos),
            "tan" => Some(UnaryFunction::Tan),
            "cot" => Some(UnaryFunction::Cot),
            "ln" => Some(UnaryFunction::Ln),
            "lg" | "log" => Some(UnaryFunction::Lg),
            "sqrt" => Some(UnaryFunction::Sqrt),
            _ => None,
        }
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => PI,
            Constant::E => E,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Constant::Pi => "π",
            Constant::E => "e",
        }
    }
}

/// `n!` for non-negative integers, `NaN` otherwise.
pub fn factorial(n: f64) -> f64 {
    if n < 0.0 || n.fract() != 0.0 || n.is_nan() {
        return f64::NAN;
    }
    if n > MAX_FINITE_FACTORIAL {
        return f64::INFINITY;
    }
    (2..=n as u32).fold(1.0, |acc, i| acc * f64::from(i))
}
