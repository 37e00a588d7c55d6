//! Single-token-lookahead scanning and parsing driver.
//!
//! A grammar supplies a [`TokenSource`] (its lexer); the recursive-descent
//! rules of the grammar drive a [`Lookahead`] cursor built on top of it.

use std::marker::PhantomData;

use super::error::{Expected, LexError, ParseError, SyntaxError};
use super::rfc4512::TokenKind;
use super::token::Token;

/// Produces tokens on demand from a character source.
///
/// Once the end-of-input token has been produced, every further call returns
/// the end-of-input token again.
pub trait TokenSource<'a> {
    /// Produce the next token.
    fn next_token(&mut self) -> Result<Token<'a>, LexError>;

    /// Current position of the underlying character source.
    fn position(&self) -> usize;

    /// Consume the source as a finite token iterator.
    fn tokens(self) -> Tokens<'a, Self>
    where
        Self: Sized,
    {
        Tokens {
            source: self,
            done: false,
            _marker: PhantomData,
        }
    }
}

/// Lazy, finite, non-restartable token sequence.
///
/// Yields each token, then the single end-of-input token, then nothing. A
/// lexical failure is yielded once and also ends the sequence.
#[derive(Debug)]
pub struct Tokens<'a, L> {
    source: L,
    done: bool,
    _marker: PhantomData<Token<'a>>,
}

impl<'a, L: TokenSource<'a>> Iterator for Tokens<'a, L> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.source.next_token();
        match &item {
            Ok(tok) if !tok.is_eof() => {}
            _ => self.done = true,
        }
        Some(item)
    }
}

impl<'a, L: TokenSource<'a>> std::iter::FusedIterator for Tokens<'a, L> {}

/// Parser cursor: an owned token source plus one token of lookahead.
#[derive(Debug)]
pub struct Lookahead<'a, L> {
    lexer: L,
    current: Token<'a>,
}

impl<'a, L: TokenSource<'a>> Lookahead<'a, L> {
    /// Take ownership of `lexer` and read the first lookahead token.
    pub fn new(mut lexer: L) -> Result<Self, LexError> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// The lookahead token.
    pub fn peek(&self) -> &Token<'a> {
        &self.current
    }

    /// Kind of the lookahead token.
    pub fn kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Whether the lookahead has kind `kind`.
    pub fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Whether the lookahead is the end-of-input token.
    pub fn at_eof(&self) -> bool {
        self.current.is_eof()
    }

    /// Replace the lookahead with the next token, returning the one consumed.
    pub fn consume(&mut self) -> Result<Token<'a>, LexError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consume the lookahead if it has kind `kind`, otherwise fail naming
    /// `kind` and the lookahead token.
    pub fn match_kind(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.at(kind) {
            Ok(self.consume()?)
        } else {
            Err(self.expected(Expected::Kind(kind)))
        }
    }

    /// Syntax failure at the lookahead token.
    pub fn expected(&self, expected: Expected) -> ParseError {
        let err = SyntaxError::new(expected, &self.current);
        log::debug!("syntax error: {err}");
        err.into()
    }

    /// Position of the token source; one past the lookahead token.
    pub fn position(&self) -> usize {
        self.lexer.position()
    }
}
