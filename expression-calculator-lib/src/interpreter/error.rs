//! Error types for each phase of a calculation.
//!
//! Scanning is best-effort, so [`LexError`] is collected rather than returned
//! directly. Parsing and evaluation abort on their first failure with a
//! [`ParseError`] or an [`EvaluationError`], and [`CalculatorError`] bundles
//! the two for callers that run the whole pipeline.
use crate::interpreter::token::Token;
use thiserror::Error;

/// An illegal character met by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal character '{character}' at position {position}")]
pub struct LexError {
    pub character: char,
    /// Zero-based character offset into the scanned input.
    pub position: usize,
}

/// Failure to match the token stream against the grammar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The grammar accepted the tokens, but the scanner had to skip characters to get there.
    #[error("lexical error: {0}")]
    Lexical(#[from] LexError),

    #[error("syntax error at '{token}' (position {position})")]
    UnexpectedToken { token: Token, position: usize },

    #[error("syntax error at end of input")]
    UnexpectedEnd,

    /// Groups, calls and exponents opened past the nesting limit, or a tree grown taller than it.
    #[error("expression nested too deeply at position {position}")]
    TooDeeplyNested { position: usize },
}

/// Failure while walking a syntax tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("division by zero")]
    DivideByZero,

    /// Factorial is only defined for finite, non-negative operands.
    #[error("factorial is undefined for {operand}")]
    FactorialDomain { operand: f64 },

    #[error("unknown operator '{symbol}'")]
    UnknownOperator { symbol: String },
}

/// Any failure of the scan, parse and evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculatorError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
