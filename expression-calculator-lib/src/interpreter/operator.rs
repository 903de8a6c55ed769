use crate::interpreter::error::EvaluationError;
use crate::interpreter::token::Token;
use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
}

/// A unary function applied to a parenthesised argument given in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryFunction {
    Sine,
    Cosine,
}

/// Postfix factorial binds tighter than every binary operator.
pub(crate) const FACTORIAL_PRECEDENCE: u8 = 3;

impl UnaryFunction {
    pub fn token(&self) -> Token {
        match self {
            UnaryFunction::Sine => Token::Sin,
            UnaryFunction::Cosine => Token::Cos,
        }
    }

    pub fn from_token(token: &Token) -> Option<UnaryFunction> {
        match token {
            Token::Sin => Some(UnaryFunction::Sine),
            Token::Cos => Some(UnaryFunction::Cosine),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnaryFunction::Sine => "sin",
            UnaryFunction::Cosine => "cos",
        }
    }

    pub fn evaluate(&self, degrees: f64) -> f64 {
        let radians = degrees.to_radians();
        match self {
            UnaryFunction::Sine => radians.sin(),
            UnaryFunction::Cosine => radians.cos(),
        }
    }
}

impl BinaryOperator {
    pub fn token(&self) -> Token {
        match self {
            BinaryOperator::Add => Token::Plus,
            BinaryOperator::Subtract => Token::Dash,
            BinaryOperator::Multiply => Token::Asterisk,
            BinaryOperator::Divide => Token::ForwardSlash,
            BinaryOperator::Exponentiate => Token::Caret,
        }
    }

    pub fn from_token(token: &Token) -> Option<BinaryOperator> {
        match token {
            Token::Plus => Some(BinaryOperator::Add),
            Token::Dash => Some(BinaryOperator::Subtract),
            Token::Asterisk => Some(BinaryOperator::Multiply),
            Token::ForwardSlash => Some(BinaryOperator::Divide),
            Token::Caret => Some(BinaryOperator::Exponentiate),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Exponentiate => '^',
        }
    }

    pub(crate) fn associativity(&self) -> Associativity {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide => Associativity::Left,
            BinaryOperator::Exponentiate => Associativity::Right,
        }
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 0,
            BinaryOperator::Multiply | BinaryOperator::Divide => 1,
            BinaryOperator::Exponentiate => 2,
        }
    }

    pub fn evaluate(&self, a: f64, b: f64) -> Result<f64, EvaluationError> {
        match self {
            BinaryOperator::Add => Ok(a + b),
            BinaryOperator::Subtract => Ok(a - b),
            BinaryOperator::Multiply => Ok(a * b),
            BinaryOperator::Divide if b == 0.0 => Err(EvaluationError::DivideByZero),
            BinaryOperator::Divide => Ok(a / b),
            BinaryOperator::Exponentiate => Ok(a.powf(b)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl TryFrom<char> for BinaryOperator {
    type Error = EvaluationError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Token::from_symbol(symbol)
            .as_ref()
            .and_then(BinaryOperator::from_token)
            .ok_or_else(|| EvaluationError::UnknownOperator {
                symbol: symbol.to_string(),
            })
    }
}

impl FromStr for UnaryFunction {
    type Err = EvaluationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "sin" => Ok(UnaryFunction::Sine),
            "cos" => Ok(UnaryFunction::Cosine),
            unknown => Err(EvaluationError::UnknownOperator {
                symbol: unknown.to_string(),
            }),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
