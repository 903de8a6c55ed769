use crate::interpreter::error::LexError;
use crate::interpreter::token::{PositionedToken, Token};
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;

static KEYWORDS: [(&str, Token); 2] = [("sin", Token::Sin), ("cos", Token::Cos)];

/// A pull-based scanner over an expression.
///
/// Yields one item per token, ending with a single [`Token::End`]. Illegal
/// characters are yielded as errors and skipped, so the scan always reaches the end.
pub struct Lexer {
    characters: Vec<char>,
    position: usize,
    finished: bool,
}

/// Everything a complete scan produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    pub tokens: Vec<PositionedToken>,
    pub errors: Vec<LexError>,
}

/// One token per line, in scan order. The end marker is left out.
impl fmt::Display for Scan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut listed = self.tokens.iter().filter(|scanned| !scanned.token.is_end());
        write!(f, "{}", listed.join("\n"))
    }
}

impl Lexer {
    pub fn new(expression: &str) -> Lexer {
        Lexer {
            characters: expression.chars().collect(),
            position: 0,
            finished: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.characters.get(self.position).copied()
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.position += 1;
        }
    }

    fn match_keyword(&mut self) -> Option<Token> {
        let rest = &self.characters[self.position..];
        for (keyword, token) in KEYWORDS {
            if rest.len() >= keyword.len() && rest.iter().zip(keyword.chars()).all(|(a, b)| *a == b)
            {
                self.position += keyword.len();
                return Some(token);
            }
        }
        None
    }

    fn consume_digits(&mut self) {
        while matches!(self.peek(), Some(digit) if digit.is_ascii_digit()) {
            self.position += 1;
        }
    }

    /// Scans `\d+(\.\d+)?` starting at the current position, which must hold a digit.
    fn scan_number(&mut self, start: usize) -> Token {
        self.consume_digits();
        let has_fraction = self.peek() == Some('.')
            && matches!(self.characters.get(self.position + 1), Some(digit) if digit.is_ascii_digit());
        if has_fraction {
            self.position += 1;
            self.consume_digits();
        }

        let text: String = self.characters[start..self.position].iter().collect();
        // Digits with an optional fraction always parse; overflow saturates to infinity.
        Token::Number(text.parse().unwrap_or(f64::INFINITY))
    }
}

impl Iterator for Lexer {
    type Item = Result<PositionedToken, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.skip_blanks();
        let start = self.position;

        let Some(character) = self.peek() else {
            self.finished = true;
            log::trace!("Scanned {} at {}", Token::End.kind_name(), start);
            return Some(Ok(PositionedToken::new(Token::End, start)));
        };

        let scanned = if let Some(keyword) = self.match_keyword() {
            Ok(keyword)
        } else if character.is_ascii_digit() {
            Ok(self.scan_number(start))
        } else {
            self.position += 1;
            Token::from_symbol(character).ok_or(LexError {
                character,
                position: start,
            })
        };

        match scanned {
            Ok(token) => {
                log::trace!("Scanned {} at {}", token.kind_name(), start);
                Some(Ok(PositionedToken::new(token, start)))
            }
            Err(error) => {
                log::warn!("Illegal character '{}' at position {}", error.character, error.position);
                Some(Err(error))
            }
        }
    }
}

/// Scans the whole expression, separating tokens from illegal characters.
///
/// # Arguments
///
/// * `expression`: The text to scan.
///
/// returns: Every token in scan order (ending with [`Token::End`]) and every illegal character.
///
/// # Examples
///
/// ```
/// use expression_calculator::interpreter::lexer::tokenize;
/// use expression_calculator::interpreter::token::Token;
///
/// let scan = tokenize("2 + 3");
/// let kinds: Vec<Token> = scan.tokens.iter().map(|scanned| scanned.token).collect();
/// assert_eq!(kinds, [Token::Number(2.0), Token::Plus, Token::Number(3.0), Token::End]);
/// assert!(scan.errors.is_empty());
/// ```
pub fn tokenize(expression: &str) -> Scan {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for scanned in Lexer::new(expression) {
        match scanned {
            Ok(token) => tokens.push(token),
            Err(error) => errors.push(error),
        }
    }

    Scan { tokens, errors }
}
