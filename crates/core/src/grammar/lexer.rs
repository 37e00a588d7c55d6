use super::diag::Span;
use super::driver::TokenSource;
use super::error::LexError;
use super::rfc4512::{TokenKind, classify_ascii};
use super::source::{ByteSource, CharSource, CodePointSource, SourceMode};
use super::token::Token;
use super::utf8::{accepts_continuation, byte_class, sequence_len};

/// Filter lexer over the Unicode scalar values of a `&str`.
///
/// Every token's `text` borrows directly from the input. Scalar values at or
/// above U+0080 are single `UTFMB` tokens; a Rust `char` is always a
/// well-formed RFC 3629 sequence, so no byte checks are needed here.
#[derive(Debug, Clone)]
pub struct FilterLexer<'a> {
    source: CodePointSource<'a>,
}

impl<'a> FilterLexer<'a> {
    /// Create a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            source: CodePointSource::new(input),
        }
    }
}

impl<'a> TokenSource<'a> for FilterLexer<'a> {
    fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        let position = self.source.position();
        let start = self.source.byte_offset();
        let Some(ch) = self.source.current() else {
            return Ok(Token::eof(position, start));
        };
        let kind = if ch.is_ascii() {
            classify_ascii(ch as u8).ok_or(LexError::InvalidCharacter {
                ch,
                position,
                offset: start,
            })?
        } else {
            TokenKind::Utfmb
        };
        self.source.advance();
        let end = self.source.byte_offset();
        let tok = Token::new(
            kind,
            &self.source.input()[start..end],
            position,
            Span::new(start, end),
        );
        log::trace!("{tok} at {position}");
        Ok(tok)
    }

    fn position(&self) -> usize {
        self.source.position()
    }
}

/// Filter lexer over raw bytes.
///
/// Multi-byte characters are assembled here from the RFC 3629 byte classes:
/// a lead byte must be followed by exactly the continuation bytes its class
/// announces, within the narrowed second-byte ranges.
#[derive(Debug, Clone)]
pub struct ByteFilterLexer<'a> {
    source: ByteSource<'a>,
}

impl<'a> ByteFilterLexer<'a> {
    /// Create a lexer positioned at the first byte of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            source: ByteSource::new(input),
        }
    }

    /// Consume a lead byte and its continuation bytes.
    fn scan_multibyte(&mut self, lead: u8) -> Result<(), LexError> {
        let offset = self.source.position();
        let Some(len) = sequence_len(lead) else {
            return Err(LexError::InvalidByte { byte: lead, offset });
        };
        self.source.advance();
        for index in 1..len {
            match self.source.current() {
                Some(b) if accepts_continuation(lead, index, b) => self.source.advance(),
                _ => {
                    return Err(LexError::MalformedSequence {
                        lead,
                        offset,
                        len,
                        fault: self.source.position(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<'a> TokenSource<'a> for ByteFilterLexer<'a> {
    fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        let start = self.source.position();
        let Some(b) = self.source.current() else {
            return Ok(Token::eof(start, start));
        };
        let kind = match byte_class(b) {
            Some(TokenKind::Utf1) => {
                let kind = classify_ascii(b).ok_or(LexError::InvalidCharacter {
                    ch: char::from(b),
                    position: start,
                    offset: start,
                })?;
                self.source.advance();
                kind
            }
            Some(TokenKind::Utf2 | TokenKind::Utf3 | TokenKind::Utf4) => {
                self.scan_multibyte(b)?;
                TokenKind::Utfmb
            }
            _ => return Err(LexError::InvalidByte { byte: b, offset: start }),
        };
        let end = self.source.position();
        // Unreachable error: ASCII and scanned multi-byte sequences are valid UTF-8.
        let text = std::str::from_utf8(&self.source.input()[start..end]).map_err(|_| {
            LexError::MalformedSequence {
                lead: b,
                offset: start,
                len: end - start,
                fault: start,
            }
        })?;
        let tok = Token::new(kind, text, start, Span::new(start, end));
        log::trace!("{tok} at {start}");
        Ok(tok)
    }

    fn position(&self) -> usize {
        self.source.position()
    }
}

/// Either filter lexer, chosen at runtime by [`SourceMode`].
#[derive(Debug, Clone)]
pub enum ModeLexer<'a> {
    /// Code-point lexer.
    CodePoint(FilterLexer<'a>),
    /// Byte lexer.
    Byte(ByteFilterLexer<'a>),
}

impl<'a> ModeLexer<'a> {
    /// Create the lexer `mode` selects over `input`.
    pub fn new(input: &'a str, mode: SourceMode) -> Self {
        match mode {
            SourceMode::CodePoint => ModeLexer::CodePoint(FilterLexer::new(input)),
            SourceMode::Byte => ModeLexer::Byte(ByteFilterLexer::new(input.as_bytes())),
        }
    }
}

impl<'a> TokenSource<'a> for ModeLexer<'a> {
    fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        match self {
            ModeLexer::CodePoint(lexer) => lexer.next_token(),
            ModeLexer::Byte(lexer) => lexer.next_token(),
        }
    }

    fn position(&self) -> usize {
        match self {
            ModeLexer::CodePoint(lexer) => lexer.position(),
            ModeLexer::Byte(lexer) => lexer.position(),
        }
    }
}

/// Tokenize a filter string, including the trailing end-of-input token.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    FilterLexer::new(input).tokens().collect()
}

/// Tokenize raw filter bytes, including the trailing end-of-input token.
pub fn tokenize_bytes(input: &[u8]) -> Result<Vec<Token<'_>>, LexError> {
    ByteFilterLexer::new(input).tokens().collect()
}
