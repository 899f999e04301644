//! Recursive-descent parser and AST evaluation.
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('×' | '÷' | '%') unary)*
//! unary      := ('-' | '+') unary | power
//! power      := postfix ('^' unary)?          right-associative
//! postfix    := primary '!'*
//! primary    := number | constant | function '(' expression ')' | '(' expression ')'
//! ```

use super::EvalError;
use super::token::{BinaryOp, Token};
use crate::core::functions::{AngleMode, UnaryFunction};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Negate(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call(UnaryFunction, Box<Expr>),
}

impl Expr {
    pub fn eval(&self, angle_mode: AngleMode) -> Result<f64, EvalError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Negate(inner) => Ok(-inner.eval(angle_mode)?),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.eval(angle_mode)?;
                let rhs = rhs.eval(angle_mode)?;
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Subtract => Ok(lhs - rhs),
                    BinaryOp::Multiply => Ok(lhs * rhs),
                    BinaryOp::Divide | BinaryOp::Modulo if rhs == 0.0 => {
                        Err(EvalError::DivisionByZero)
                    }
                    BinaryOp::Divide => Ok(lhs / rhs),
                    BinaryOp::Modulo => Ok(lhs % rhs),
                    BinaryOp::Power => Ok(lhs.powf(rhs)),
                }
            }
            Expr::Call(func, arg) => Ok(func.apply(arg.eval(angle_mode)?, angle_mode)),
        }
    }
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the whole token slice into one expression.
    pub fn parse(mut self) -> Result<Expr, EvalError> {
        let expr = self.expression()?;
        match self.peek() {
            None => Ok(expr),
            Some(Token::CloseParen) => Err(EvalError::UnbalancedParen),
            Some(token) => Err(EvalError::UnexpectedToken(token.to_string())),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it is one of `ops`.
    fn eat_operator(&mut self, ops: &[BinaryOp]) -> Option<BinaryOp> {
        match self.peek() {
            Some(Token::Operator(op)) if ops.contains(op) => {
                self.pos += 1;
                Some(*op)
            }
            _ => None,
        }
    }

    fn expression(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.eat_operator(&[BinaryOp::Add, BinaryOp::Subtract]) {
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.unary()?;
        while let Some(op) =
            self.eat_operator(&[BinaryOp::Multiply, BinaryOp::Divide, BinaryOp::Modulo])
        {
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        match self.eat_operator(&[BinaryOp::Subtract, BinaryOp::Add]) {
            Some(BinaryOp::Subtract) => Ok(Expr::Negate(Box::new(self.unary()?))),
            Some(_) => self.unary(),
            None => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.postfix()?;
        if self.eat_operator(&[BinaryOp::Power]).is_some() {
            let exponent = self.unary()?;
            return Ok(binary(BinaryOp::Power, base, exponent));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<Expr, EvalError> {
        let mut expr = self.primary()?;
        while matches!(self.peek(), Some(Token::Factorial)) {
            self.pos += 1;
            expr = Expr::Call(UnaryFunction::Factorial, Box::new(expr));
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        match self.advance() {
            Some(Token::Number(text)) => text
                .parse()
                .map(Expr::Number)
                .map_err(|_| EvalError::InvalidNumber(text.clone())),
            Some(Token::Constant(constant)) => Ok(Expr::Number(constant.value())),
            Some(Token::Function(func)) => {
                match self.advance() {
                    Some(Token::OpenParen) => {}
                    Some(token) => return Err(EvalError::UnexpectedToken(token.to_string())),
                    None => return Err(EvalError::UnexpectedEnd),
                }
                let arg = self.parenthesized()?;
                Ok(Expr::Call(*func, Box::new(arg)))
            }
            Some(Token::OpenParen) => self.parenthesized(),
            Some(token) => Err(EvalError::UnexpectedToken(token.to_string())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    /// Parse an expression followed by its closing paren (the `(` is already consumed).
    fn parenthesized(&mut self) -> Result<Expr, EvalError> {
        let inner = self.expression()?;
        match self.advance() {
            Some(Token::CloseParen) => Ok(inner),
            Some(token) => Err(EvalError::UnexpectedToken(token.to_string())),
            None => Err(EvalError::UnbalancedParen),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
