use crate::interpreter::error::EvaluationError;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::expression_tree::Node;

/// The largest operand whose factorial is still finite as an `f64`.
const LARGEST_FINITE_FACTORIAL: f64 = 170.0;

/// Evaluates the given expression tree to a number.
///
/// # Arguments
///
/// * `node`: The root of the expression tree to evaluate.
///
/// returns: The value of the expression, or the first evaluation error met.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use expression_calculator::interpreter::convert;
/// use expression_calculator::interpreter::evaluator::evaluate;
///
/// let (tree, _) = convert("2 + 3 * 4")?;
/// assert_eq!(evaluate(&tree)?, 14.0);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn evaluate(node: &Node) -> Result<f64, EvaluationError> {
    match node {
        Node::Number(value) => Ok(*value),
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            let left = evaluate(left_operand)?;
            let right = evaluate(right_operand)?;
            operator.evaluate(left, right)
        }
        Node::Power { base, exponent } => {
            let base = evaluate(base)?;
            let exponent = evaluate(exponent)?;
            BinaryOperator::Exponentiate.evaluate(base, exponent)
        }
        Node::Factorial { operand } => factorial(evaluate(operand)?),
        Node::FunctionCall { function, argument } => Ok(function.evaluate(evaluate(argument)?)),
    }
}

/// Factorial of `operand` truncated toward zero.
fn factorial(operand: f64) -> Result<f64, EvaluationError> {
    let truncated = operand.trunc();
    if !truncated.is_finite() || truncated < 0.0 {
        return Err(EvaluationError::FactorialDomain { operand });
    }
    if truncated > LARGEST_FINITE_FACTORIAL {
        return Ok(f64::INFINITY);
    }

    Ok((2..=truncated as u32).map(f64::from).product())
}
