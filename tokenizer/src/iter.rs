use std::iter::{FusedIterator, Peekable};

use crate::{LexError, Token, PUNCTUATORS};

/// Yields tokens until the input runs out or the first [`LexError`], after which it is exhausted.
pub struct TokenizeIterator<I: Iterator<Item=char>> {
    iter: Peekable<I>,
    offset: usize,
    failed: bool,
}

pub trait Tokenize: Sized + Iterator<Item=char> {
    fn tokenize(self) -> TokenizeIterator<Self>;
}

impl<I: Iterator<Item=char>> Tokenize for I {
    fn tokenize(self) -> TokenizeIterator<Self> {
        TokenizeIterator {
            iter: self.peekable(),
            offset: 0,
            failed: false,
        }
    }
}

impl<I: Iterator<Item=char>> TokenizeIterator<I> {
    fn consume_while(&mut self, accept: impl Fn(&char) -> bool, mut push: impl FnMut(char)) {
        while let Some(c) = self.iter.next_if(&accept) {
            self.offset += 1;
            push(c);
        }
    }
}

impl<I: Iterator<Item=char>> Iterator for TokenizeIterator<I> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let c = self.iter.next()?;
        let offset = self.offset;
        self.offset += 1;
        let token = if c.is_ascii_whitespace() {
            self.consume_while(char::is_ascii_whitespace, |_| {});
            Token::Whitespace
        } else if c.is_ascii_digit() {
            let mut lexeme = c.to_string();
            self.consume_while(char::is_ascii_digit, |c| lexeme.push(c));
            Token::Integer(lexeme)
        } else if PUNCTUATORS.contains(&c) {
            Token::Punctuator(c)
        } else {
            self.failed = true;
            return Some(Err(LexError::UnexpectedCharacter { character: c, offset }));
        };
        Some(Ok(token))
    }
}

impl<I: Iterator<Item=char>> FusedIterator for TokenizeIterator<I> {}
