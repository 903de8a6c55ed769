use crate::interpreter::error::EvaluationError;
use crate::interpreter::operator::{
    Associativity, BinaryOperator, UnaryFunction, FACTORIAL_PRECEDENCE,
};
use crate::interpreter::syntax::syntax_visitor::{walk_operand, walk_operands, SyntaxVisitor};
use crate::interpreter::token::Token;
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// Numbers and function calls never need parentheses around them.
const ATOM_PRECEDENCE: u8 = FACTORIAL_PRECEDENCE + 1;

#[derive(Clone, PartialEq)]
pub enum Node {
    // Terminal symbols (leaves)
    Number(f64),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
    Factorial {
        operand: Box<Node>,
    },
    /// Exponentiation produced by the `factor ^ factor` production.
    Power {
        base: Box<Node>,
        exponent: Box<Node>,
    },
    FunctionCall {
        function: UnaryFunction,
        argument: Box<Node>,
    },
}

impl Node {
    pub fn new_number(value: f64) -> Node {
        Node::Number(value)
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    /// Builds a binary operation from its operator symbol, one of `+ - * / ^`.
    pub fn new_from_symbol(
        symbol: char,
        left_operand: Node,
        right_operand: Node,
    ) -> Result<Node, EvaluationError> {
        let operator = BinaryOperator::try_from(symbol)?;
        Ok(Self::new_binary_operation(
            operator,
            left_operand,
            right_operand,
        ))
    }

    pub fn new_factorial(operand: Node) -> Node {
        Node::Factorial {
            operand: Box::new(operand),
        }
    }

    pub fn new_power(base: Node, exponent: Node) -> Node {
        Node::Power {
            base: Box::new(base),
            exponent: Box::new(exponent),
        }
    }

    pub fn new_function_call(function: UnaryFunction, argument: Node) -> Node {
        Node::FunctionCall {
            function,
            argument: Box::new(argument),
        }
    }

    /// How tightly the node binds when written out in infix form.
    fn precedence(&self) -> u8 {
        match self {
            Node::Number(_) | Node::FunctionCall { .. } => ATOM_PRECEDENCE,
            Node::Factorial { .. } => FACTORIAL_PRECEDENCE,
            Node::Power { .. } => BinaryOperator::Exponentiate.precedence(),
            Node::BinaryOperation { operator, .. } => operator.precedence(),
        }
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::Number(value) => visitor.visit_number(*value),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Node::Factorial { operand } => visitor.visit_factorial(operand),
            Node::Power { base, exponent } => visitor.visit_power(base, exponent),
            Node::FunctionCall { function, argument } => {
                visitor.visit_function_call(function, argument)
            }
        }
    }

    /// Regenerates infix tokens, with only the parentheses that precedence requires.
    pub fn to_infix(&self) -> Vec<Token> {
        self.build_expression(0)
    }

    fn build_expression(&self, minimum_precedence: u8) -> Vec<Token> {
        let mut tokens = Vec::new();

        parenthesize_if(
            &mut tokens,
            || self.precedence() < minimum_precedence,
            |tokens| match self {
                Node::Number(value) => tokens.push(Token::Number(*value)),
                Node::BinaryOperation {
                    operator,
                    left_operand,
                    right_operand,
                } => build_binary_tokens(tokens, *operator, left_operand, right_operand),
                Node::Power { base, exponent } => {
                    build_binary_tokens(tokens, BinaryOperator::Exponentiate, base, exponent)
                }
                Node::Factorial { operand } => {
                    tokens.append(&mut operand.build_expression(FACTORIAL_PRECEDENCE));
                    tokens.push(Token::Bang);
                }
                Node::FunctionCall { function, argument } => {
                    tokens.push(function.token());
                    tokens.push(Token::LeftParentheses);
                    tokens.append(&mut argument.build_expression(0));
                    tokens.push(Token::RightParentheses);
                }
            },
        );

        tokens
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => f.debug_tuple("Number").field(value).finish(),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => f
                .debug_tuple("BinaryOperation")
                .field(&operator.symbol())
                .field(left_operand)
                .field(right_operand)
                .finish(),
            Node::Factorial { operand } => f.debug_tuple("Factorial").field(operand).finish(),
            Node::Power { base, exponent } => {
                f.debug_tuple("Power").field(base).field(exponent).finish()
            }
            Node::FunctionCall { function, argument } => f
                .debug_tuple("FunctionCall")
                .field(&function.name())
                .field(argument)
                .finish(),
        }
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_number(&mut self, value: f64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_operands(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_power(&mut self, base: &Node, exponent: &Node) {
        self.builder.begin_child("power".into());
        walk_operands(self, base, exponent);
        self.builder.end_child();
    }
    fn visit_factorial(&mut self, operand: &Node) {
        self.builder.begin_child("factorial".into());
        walk_operand(self, operand);
        self.builder.end_child();
    }
    fn visit_function_call(&mut self, function: &UnaryFunction, argument: &Node) {
        self.builder.begin_child(function.name().into());
        walk_operand(self, argument);
        self.builder.end_child();
    }
}

/// The minimum precedences the left and right operands need to avoid parentheses.
fn operand_precedences(operator: BinaryOperator) -> (u8, u8) {
    let precedence = operator.precedence();
    match operator.associativity() {
        Associativity::Left => (precedence, precedence + 1),
        Associativity::Right => (precedence + 1, precedence),
    }
}

fn build_binary_tokens(
    tokens: &mut Vec<Token>,
    operator: BinaryOperator,
    left_operand: &Node,
    right_operand: &Node,
) {
    let (left_precedence, right_precedence) = operand_precedences(operator);
    tokens.append(&mut left_operand.build_expression(left_precedence));
    tokens.push(operator.token());
    tokens.append(&mut right_operand.build_expression(right_precedence));
}

fn parenthesize_if(
    tokens: &mut Vec<Token>,
    predicate: impl Fn() -> bool,
    mut build_interior: impl FnMut(&mut Vec<Token>),
) {
    let mut close_parentheses = false;

    if predicate() {
        tokens.push(Token::LeftParentheses);
        close_parentheses = true;
    }

    build_interior(tokens);

    if close_parentheses {
        tokens.push(Token::RightParentheses);
    }
}
