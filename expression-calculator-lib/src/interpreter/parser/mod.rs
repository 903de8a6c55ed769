mod recursive_descent;

use crate::interpreter::derivation::Derivation;
use crate::interpreter::error::{LexError, ParseError};
use crate::interpreter::lexer::Lexer;
use crate::interpreter::parser::recursive_descent::RecursiveDescent;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::PositionedToken;

/// How many groups, function calls and exponents may be open at once, and how
/// many nodes the longest branch of a parsed tree may hold.
pub const MAX_DEPTH: usize = 256;

/// Parses the given expression into an equivalent expression tree, recording
/// every grammar production applied along the way.
///
/// The grammar, from loosest to tightest binding:
///
/// ```text
/// expression := expression '+' term | expression '-' term | term
/// term       := term '*' factor | term '/' factor | factor
/// factor     := factor '^' factor | factor '!' | NUMBER
///             | '(' expression ')' | 'sin' '(' expression ')' | 'cos' '(' expression ')'
/// ```
///
/// `!` binds tighter than `^`, and `^` is right-associative.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
/// * `derivation`: Receives the applied productions. Cleared before parsing starts.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use expression_calculator::interpreter::derivation::Derivation;
/// use expression_calculator::interpreter::parser::parse;
///
/// let mut derivation = Derivation::new();
/// let tree = parse("2 ^ 3 ^ 2", &mut derivation)?;
/// let regenerated_tokens = tree.to_infix();
/// assert_eq!(derivation.len(), 7);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn parse(expression: &str, derivation: &mut Derivation) -> Result<Node, ParseError> {
    parse_tokens(Lexer::new(expression), derivation)
}

/// Parses an already scanned token stream. See [`parse`].
///
/// The stream may contain scanner errors; they are skipped, and reported only
/// if the remaining tokens form a valid expression.
pub fn parse_tokens(
    tokens: impl IntoIterator<Item = Result<PositionedToken, LexError>>,
    derivation: &mut Derivation,
) -> Result<Node, ParseError> {
    derivation.reset();
    let tree = RecursiveDescent::new(tokens.into_iter(), derivation).parse()?;
    log::debug!("Parsed {:?}", tree);
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::derivation::DerivationStep;
    use crate::interpreter::operator::{BinaryOperator, UnaryFunction};
    use crate::interpreter::token::Token;
    use pretty_assertions::assert_eq;

    fn number(value: f64) -> Node {
        Node::new_number(value)
    }

    fn binary(operator: BinaryOperator, left: Node, right: Node) -> Node {
        Node::new_binary_operation(operator, left, right)
    }

    fn parse_fresh(expression: &str) -> Result<Node, ParseError> {
        parse(expression, &mut Derivation::new())
    }

    fn trace(expression: &str) -> Vec<String> {
        let mut derivation = Derivation::new();
        parse(expression, &mut derivation).unwrap();
        derivation.iter().map(DerivationStep::to_string).collect()
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expected = binary(
            BinaryOperator::Subtract,
            binary(BinaryOperator::Subtract, number(2.0), number(3.0)),
            number(4.0),
        );

        assert_eq!(parse_fresh("2 - 3 - 4").unwrap(), expected);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expected = binary(
            BinaryOperator::Add,
            number(2.0),
            binary(BinaryOperator::Multiply, number(3.0), number(4.0)),
        );

        assert_eq!(parse_fresh("2 + 3 * 4").unwrap(), expected);
    }

    #[test]
    fn power_is_right_associative() {
        let expected = Node::new_power(
            number(2.0),
            Node::new_power(number(3.0), number(2.0)),
        );

        assert_eq!(parse_fresh("2 ^ 3 ^ 2").unwrap(), expected);
    }

    #[test]
    fn factorial_binds_tighter_than_power() {
        let expected = Node::new_power(number(2.0), Node::new_factorial(number(3.0)));
        assert_eq!(parse_fresh("2^3!").unwrap(), expected);

        let expected = Node::new_power(Node::new_factorial(number(2.0)), number(3.0));
        assert_eq!(parse_fresh("2!^3").unwrap(), expected);
    }

    #[test]
    fn power_binds_tighter_than_division() {
        let expected = binary(
            BinaryOperator::Divide,
            number(8.0),
            Node::new_power(number(2.0), number(2.0)),
        );

        assert_eq!(parse_fresh("8 / 2 ^ 2").unwrap(), expected);
    }

    #[test]
    fn factorial_can_be_repeated() {
        let expected = Node::new_factorial(Node::new_factorial(number(3.0)));

        assert_eq!(parse_fresh("3!!").unwrap(), expected);
    }

    #[test]
    fn parentheses_group_without_a_node_of_their_own() {
        let expected = binary(
            BinaryOperator::Multiply,
            binary(BinaryOperator::Add, number(1.0), number(2.0)),
            number(3.0),
        );

        assert_eq!(parse_fresh("((1 + 2)) * 3").unwrap(), expected);
    }

    #[test]
    fn function_call_is_an_atom() {
        let expected = Node::new_power(
            Node::new_function_call(
                UnaryFunction::Sine,
                binary(BinaryOperator::Add, number(45.0), number(45.0)),
            ),
            number(2.0),
        );

        assert_eq!(parse_fresh("sin(45 + 45)^2").unwrap(), expected);
    }

    #[test]
    fn addition_derivation_is_most_recent_first() {
        assert_eq!(
            trace("2+3"),
            [
                "expression → expression + term",
                "term → factor",
                "factor → NUMBER",
                "expression → term",
                "term → factor",
                "factor → NUMBER",
            ]
        );
    }

    #[test]
    fn product_derivation_reduces_term_before_expression() {
        assert_eq!(
            trace("2 * 3"),
            [
                "expression → term",
                "term → term * factor",
                "factor → NUMBER",
                "term → factor",
                "factor → NUMBER",
            ]
        );
    }

    #[test]
    fn factor_level_derivation_covers_power_factorial_and_groups() {
        assert_eq!(
            trace("cos(1)^(2)!"),
            [
                "expression → term",
                "term → factor",
                "factor → factor ^ factor",
                "factor → factor !",
                "factor → ( expression )",
                "expression → term",
                "term → factor",
                "factor → NUMBER",
                "factor → cos ( expression )",
                "expression → term",
                "term → factor",
                "factor → NUMBER",
            ]
        );
    }

    #[test]
    fn derivation_is_reset_between_parses() {
        let mut derivation = Derivation::new();
        parse("(1 + 2) * sin(3)!", &mut derivation).unwrap();
        parse("4 - 5", &mut derivation).unwrap();
        let reused = derivation.snapshot();

        let mut fresh = Derivation::new();
        parse("4 - 5", &mut fresh).unwrap();

        assert_eq!(reused, fresh.snapshot());
    }

    #[test]
    fn trailing_token_is_a_syntax_error() {
        assert_eq!(
            parse_fresh("2 3"),
            Err(ParseError::UnexpectedToken {
                token: Token::Number(3.0),
                position: 2
            })
        );
        assert_eq!(
            parse_fresh("(1))"),
            Err(ParseError::UnexpectedToken {
                token: Token::RightParentheses,
                position: 3
            })
        );
    }

    #[test]
    fn missing_operand_at_end_is_an_end_of_input_error() {
        assert_eq!(parse_fresh("2 +"), Err(ParseError::UnexpectedEnd));
        assert_eq!(parse_fresh("(2 + 3"), Err(ParseError::UnexpectedEnd));
        assert_eq!(parse_fresh("sin"), Err(ParseError::UnexpectedEnd));
        assert_eq!(parse_fresh(""), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn unary_minus_is_not_part_of_the_grammar() {
        assert_eq!(
            parse_fresh("(-1)!"),
            Err(ParseError::UnexpectedToken {
                token: Token::Dash,
                position: 1
            })
        );
    }

    #[test]
    fn function_requires_parentheses() {
        assert_eq!(
            parse_fresh("sin 90"),
            Err(ParseError::UnexpectedToken {
                token: Token::Number(90.0),
                position: 4
            })
        );
    }

    #[test]
    fn illegal_character_between_operands_is_a_syntax_error() {
        assert_eq!(
            parse_fresh("2 $ 3"),
            Err(ParseError::UnexpectedToken {
                token: Token::Number(3.0),
                position: 4
            })
        );
    }

    #[test]
    fn illegal_character_is_reported_when_grammar_accepts() {
        assert_eq!(
            parse_fresh("2 + 3 $"),
            Err(ParseError::Lexical(LexError {
                character: '$',
                position: 6
            }))
        );
    }

    #[test]
    fn nesting_up_to_the_limit_is_accepted() {
        let groups = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        let factorials = format!("1{}", "!".repeat(MAX_DEPTH - 1));

        assert_eq!(parse_fresh(&groups), Ok(number(1.0)));
        assert!(parse_fresh(&factorials).is_ok());
    }

    #[test]
    fn groups_nested_past_the_limit_are_rejected() {
        let groups = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));

        assert_eq!(
            parse_fresh(&groups),
            Err(ParseError::TooDeeplyNested {
                position: MAX_DEPTH
            })
        );
    }

    #[test]
    fn function_calls_nested_past_the_limit_are_rejected() {
        let calls = format!("{}1{}", "sin(".repeat(10_000), ")".repeat(10_000));

        assert_eq!(
            parse_fresh(&calls),
            Err(ParseError::TooDeeplyNested {
                position: 4 * MAX_DEPTH
            })
        );
    }

    #[test]
    fn exponent_chain_past_the_limit_is_rejected() {
        let powers = format!("{}2", "2^".repeat(10_000));

        assert_eq!(
            parse_fresh(&powers),
            Err(ParseError::TooDeeplyNested {
                position: 2 * MAX_DEPTH + 1
            })
        );
    }

    #[test]
    fn factorial_chain_past_the_limit_is_rejected() {
        let factorials = format!("1{}", "!".repeat(1_000_000));

        assert_eq!(
            parse_fresh(&factorials),
            Err(ParseError::TooDeeplyNested {
                position: MAX_DEPTH
            })
        );
    }

    #[test]
    fn operator_chain_past_the_limit_is_rejected() {
        let sum = format!("1{}", "+1".repeat(10_000));

        assert_eq!(
            parse_fresh(&sum),
            Err(ParseError::TooDeeplyNested {
                position: 2 * MAX_DEPTH - 1
            })
        );
    }

    #[test]
    fn scanned_tokens_can_be_parsed_directly() {
        let tokens = [Token::Number(5.0), Token::Bang, Token::End]
            .into_iter()
            .enumerate()
            .map(|(position, token)| Ok(PositionedToken::new(token, position)));

        let tree = parse_tokens(tokens, &mut Derivation::new()).unwrap();

        assert_eq!(tree, Node::new_factorial(number(5.0)));
    }

    #[test]
    fn token_stream_without_end_marker_is_still_terminated() {
        let tokens = vec![Ok(PositionedToken::new(Token::Number(1.0), 0))];

        let tree = parse_tokens(tokens, &mut Derivation::new()).unwrap();

        assert_eq!(tree, number(1.0));
    }
}
