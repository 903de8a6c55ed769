use std::fmt;
use std::fmt::Formatter;

/// A discrete part of an expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Dash,
    Asterisk,
    ForwardSlash,
    Caret,
    Bang,
    LeftParentheses,
    RightParentheses,
    Sin,
    Cos,
    /// Marks the end of the input. Produced exactly once per scan.
    End,
}

pub static SYMBOLS: [char; 8] = ['+', '-', '*', '/', '^', '!', '(', ')'];

impl Token {
    /// The token for a single-character symbol, if the character is one.
    pub fn from_symbol(symbol: char) -> Option<Token> {
        match symbol {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Dash),
            '*' => Some(Token::Asterisk),
            '/' => Some(Token::ForwardSlash),
            '^' => Some(Token::Caret),
            '!' => Some(Token::Bang),
            '(' => Some(Token::LeftParentheses),
            ')' => Some(Token::RightParentheses),
            _ => None,
        }
    }

    /// Upper-case name of the token's kind, as used when listing tokens.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Number(_) => "NUMBER",
            Token::Plus => "PLUS",
            Token::Dash => "MINUS",
            Token::Asterisk => "TIMES",
            Token::ForwardSlash => "DIVIDE",
            Token::Caret => "POWER",
            Token::Bang => "FACTORIAL",
            Token::LeftParentheses => "LPAREN",
            Token::RightParentheses => "RPAREN",
            Token::Sin => "SIN",
            Token::Cos => "COS",
            Token::End => "END",
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Token::End)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Plus => write!(f, "+"),
            Token::Dash => write!(f, "-"),
            Token::Asterisk => write!(f, "*"),
            Token::ForwardSlash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::Bang => write!(f, "!"),
            Token::LeftParentheses => write!(f, "("),
            Token::RightParentheses => write!(f, ")"),
            Token::Sin => write!(f, "sin"),
            Token::Cos => write!(f, "cos"),
            Token::End => write!(f, "<end>"),
        }
    }
}

/// A token together with the zero-based character position it was scanned at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedToken {
    pub token: Token,
    pub position: usize,
}

impl PositionedToken {
    pub fn new(token: Token, position: usize) -> PositionedToken {
        PositionedToken { token, position }
    }
}

impl fmt::Display for PositionedToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.token {
            Token::Number(value) => {
                write!(f, "{}({}) @ {}", self.token.kind_name(), value, self.position)
            }
            token => write!(f, "{} @ {}", token.kind_name(), self.position),
        }
    }
}
