use super::MAX_DEPTH;
use crate::interpreter::derivation::Derivation;
use crate::interpreter::error::{LexError, ParseError};
use crate::interpreter::operator::{
    Associativity, BinaryOperator, UnaryFunction, FACTORIAL_PRECEDENCE,
};
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::{PositionedToken, Token};
use std::mem;

/// The left-associative levels of the grammar, each one a loop over its operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Level {
    Expression,
    Term,
}

impl Level {
    fn symbol(&self) -> &'static str {
        match self {
            Level::Expression => "expression",
            Level::Term => "term",
        }
    }

    fn operand_symbol(&self) -> &'static str {
        match self {
            Level::Expression => "term",
            Level::Term => "factor",
        }
    }

    /// Precedence shared by every operator reduced at this level.
    fn precedence(&self) -> u8 {
        match self {
            Level::Expression => BinaryOperator::Add.precedence(),
            Level::Term => BinaryOperator::Multiply.precedence(),
        }
    }
}

/// A parsed subtree and the number of nodes on its longest branch.
struct Subtree {
    node: Node,
    height: usize,
}

impl Subtree {
    fn leaf(node: Node) -> Subtree {
        Subtree { node, height: 1 }
    }
}

/// Parses `expression` and `term` by recursive descent and `factor` by
/// precedence climbing, pulling one token of lookahead at a time.
///
/// Both the number of groups, calls and exponents open at once and the height
/// of the resulting tree are capped at [`MAX_DEPTH`], so neither parsing nor
/// walking the tree afterwards can exhaust the stack.
pub(super) struct RecursiveDescent<'a, I> {
    tokens: I,
    lookahead: PositionedToken,
    last_position: usize,
    nesting: usize,
    lexical_errors: Vec<LexError>,
    derivation: &'a mut Derivation,
}

impl<'a, I> RecursiveDescent<'a, I>
where
    I: Iterator<Item = Result<PositionedToken, LexError>>,
{
    pub(super) fn new(tokens: I, derivation: &'a mut Derivation) -> Self {
        let mut parser = RecursiveDescent {
            tokens,
            lookahead: PositionedToken::new(Token::End, 0),
            last_position: 0,
            nesting: 0,
            lexical_errors: Vec::new(),
            derivation,
        };
        parser.lookahead = parser.fetch();
        parser
    }

    /// Parses a complete expression, which must be followed by the end of input.
    pub(super) fn parse(mut self) -> Result<Node, ParseError> {
        let tree = self.parse_level(Level::Expression)?;

        let trailing = self.lookahead;
        if !trailing.token.is_end() {
            return Err(unexpected(trailing));
        }
        if let Some(error) = self.lexical_errors.first() {
            return Err(ParseError::Lexical(*error));
        }

        Ok(tree.node)
    }

    /// Pulls the next token, setting scanner errors aside.
    fn fetch(&mut self) -> PositionedToken {
        loop {
            match self.tokens.next() {
                Some(Ok(token)) => {
                    self.last_position = token.position;
                    return token;
                }
                Some(Err(error)) => {
                    self.last_position = error.position + 1;
                    self.lexical_errors.push(error);
                }
                None => return PositionedToken::new(Token::End, self.last_position),
            }
        }
    }

    fn advance(&mut self) -> PositionedToken {
        let next = self.fetch();
        mem::replace(&mut self.lookahead, next)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        let current = self.advance();
        if current.token == expected {
            Ok(())
        } else {
            Err(unexpected(current))
        }
    }

    /// Runs `parse` one nesting level deeper, opened by the token at `position`.
    fn nested<T>(
        &mut self,
        position: usize,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.nesting >= MAX_DEPTH {
            return Err(ParseError::TooDeeplyNested { position });
        }
        self.nesting += 1;
        let parsed = parse(self);
        self.nesting -= 1;
        parsed
    }

    fn parse_level(&mut self, level: Level) -> Result<Subtree, ParseError> {
        let mut left_operand = self.parse_operand(level)?;
        self.derivation
            .record(level.symbol(), level.operand_symbol());

        while let Some(operator) = self.operator_at(level) {
            let position = self.advance().position;
            let right_operand = self.parse_operand(level)?;
            self.derivation.record(
                level.symbol(),
                format!("{} {} {}", level.symbol(), operator, level.operand_symbol()),
            );
            let child_height = left_operand.height.max(right_operand.height);
            left_operand = grow(
                Node::new_binary_operation(operator, left_operand.node, right_operand.node),
                child_height,
                position,
            )?;
        }

        Ok(left_operand)
    }

    fn parse_operand(&mut self, level: Level) -> Result<Subtree, ParseError> {
        match level {
            Level::Expression => self.parse_level(Level::Term),
            Level::Term => self.parse_factor(BinaryOperator::Exponentiate.precedence()),
        }
    }

    fn operator_at(&self, level: Level) -> Option<BinaryOperator> {
        BinaryOperator::from_token(&self.lookahead.token)
            .filter(|operator| operator.precedence() == level.precedence())
    }

    fn parse_factor(&mut self, minimum_precedence: u8) -> Result<Subtree, ParseError> {
        let mut factor = self.parse_primary()?;

        loop {
            match self.lookahead.token {
                Token::Bang if FACTORIAL_PRECEDENCE >= minimum_precedence => {
                    let position = self.advance().position;
                    self.derivation.record("factor", "factor !");
                    factor = grow(Node::new_factorial(factor.node), factor.height, position)?;
                }
                Token::Caret if BinaryOperator::Exponentiate.precedence() >= minimum_precedence => {
                    let position = self.advance().position;
                    let exponent = self.nested(position, |parser| {
                        parser.parse_factor(exponent_precedence())
                    })?;
                    self.derivation.record("factor", "factor ^ factor");
                    let child_height = factor.height.max(exponent.height);
                    factor = grow(
                        Node::new_power(factor.node, exponent.node),
                        child_height,
                        position,
                    )?;
                }
                _ => return Ok(factor),
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Subtree, ParseError> {
        let current = self.advance();
        match current.token {
            Token::Number(value) => {
                self.derivation.record("factor", "NUMBER");
                Ok(Subtree::leaf(Node::new_number(value)))
            }
            Token::LeftParentheses => {
                let inner = self.nested(current.position, |parser| {
                    parser.parse_level(Level::Expression)
                })?;
                self.expect(Token::RightParentheses)?;
                self.derivation.record("factor", "( expression )");
                Ok(inner)
            }
            token => match UnaryFunction::from_token(&token) {
                Some(function) => self.nested(current.position, |parser| {
                    parser.parse_function_call(function, current.position)
                }),
                None => Err(unexpected(current)),
            },
        }
    }

    fn parse_function_call(
        &mut self,
        function: UnaryFunction,
        position: usize,
    ) -> Result<Subtree, ParseError> {
        self.expect(Token::LeftParentheses)?;
        let argument = self.parse_level(Level::Expression)?;
        self.expect(Token::RightParentheses)?;
        self.derivation
            .record("factor", format!("{} ( expression )", function.name()));
        grow(
            Node::new_function_call(function, argument.node),
            argument.height,
            position,
        )
    }
}

/// Places `node` on top of children whose tallest branch is `child_height`.
fn grow(node: Node, child_height: usize, position: usize) -> Result<Subtree, ParseError> {
    let height = child_height + 1;
    if height > MAX_DEPTH {
        return Err(ParseError::TooDeeplyNested { position });
    }
    Ok(Subtree { node, height })
}

/// Minimum precedence for the right operand of `^`.
fn exponent_precedence() -> u8 {
    let precedence = BinaryOperator::Exponentiate.precedence();
    match BinaryOperator::Exponentiate.associativity() {
        Associativity::Right => precedence,
        Associativity::Left => precedence + 1,
    }
}

fn unexpected(found: PositionedToken) -> ParseError {
    match found.token {
        Token::End => ParseError::UnexpectedEnd,
        token => ParseError::UnexpectedToken {
            token,
            position: found.position,
        },
    }
}
