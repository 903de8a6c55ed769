pub mod derivation;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

use crate::interpreter::derivation::Derivation;
use crate::interpreter::error::{CalculatorError, ParseError};
use crate::interpreter::evaluator::evaluate;
use crate::interpreter::token::Token;
use anyhow::{Context, Result};
use string_builder::Builder;
use syntax::expression_tree::Node;

/// The outcome of a successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub tree: Node,
    pub value: f64,
    pub derivation: Derivation,
}

/// Parses and evaluates the given expression.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The expression tree, its value and the productions used to parse it.
///
/// # Examples
///
/// ```
/// use expression_calculator::interpreter::calculate;
///
/// let calculation = calculate("2 ^ 3 ^ 2").unwrap();
/// assert_eq!(calculation.value, 512.0);
/// ```
pub fn calculate(expression: &str) -> Result<Calculation, CalculatorError> {
    let (tree, derivation) = convert(expression)?;
    let value = evaluate(&tree)?;
    log::debug!("Evaluated {:?} to {}", expression, value);
    Ok(Calculation {
        tree,
        value,
        derivation,
    })
}

/// Converts the given input string into an equivalent expression tree,
/// along with the derivation that produced it.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent expression tree and its derivation.
///
/// # Examples
///
/// ```
/// use expression_calculator::interpreter::convert;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let expression = "5!";
/// let (tree, derivation) = convert(expression)?;
/// let regenerated_tokens = tree.to_infix();
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn convert(expression: &str) -> Result<(Node, Derivation), ParseError> {
    let mut derivation = Derivation::new();
    let tree = parser::parse(expression, &mut derivation)?;
    Ok((tree, derivation))
}

/// Pretty-prints the given vector of tokens with added whitespace.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use expression_calculator::interpreter::tokens_to_string;
/// use expression_calculator::interpreter::token::Token;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = vec![
///     Token::Number(2.0),
///     Token::Caret,
///     Token::Number(3.0),
///     Token::Plus,
///     Token::Number(1.5),
/// ];
/// let pretty_printed_tokens = tokens_to_string(tokens)?;
/// assert_eq!(pretty_printed_tokens, "2^3 + 1.5");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: Vec<Token>) -> Result<String> {
    let mut builder = Builder::new(tokens.len());

    for token in tokens {
        match token {
            Token::Plus | Token::Dash | Token::Asterisk | Token::ForwardSlash => {
                builder.append(" ");
                builder.append(token.to_string());
                builder.append(" ");
            }
            Token::End => {}
            _ => builder.append(token.to_string()),
        }
    }

    builder.string().context("Failed to build token string")
}
