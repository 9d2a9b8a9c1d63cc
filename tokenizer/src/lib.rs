use std::fmt::{Display, Formatter};

use thiserror::Error;

pub use crate::iter::{Tokenize, TokenizeIterator};

mod iter;

pub const PUNCTUATORS: [char; 6] = ['(', ')', '+', '-', '*', '/'];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Integer(String),
    Punctuator(char),
    Whitespace,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Integer(lexeme) => f.write_str(lexeme),
            Token::Punctuator(c) => write!(f, "{}", c),
            Token::Whitespace => f.write_str(" "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character {character:?} at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },
}

/// Every token of `src` except whitespace. The first unexpected character fails the whole line.
pub fn lex_effective(src: &str) -> Result<Vec<Token>, LexError> {
    src.chars()
        .tokenize()
        .filter(|token| !matches!(token, Ok(Token::Whitespace)))
        .collect()
}
