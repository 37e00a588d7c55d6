use super::diag::Span;
use super::rfc4512::TokenKind;
use serde::Serialize;

/// Literal text of the end-of-input token.
pub const EOF_TEXT: &str = "<EOF>";

/// A token that borrows its text directly from the source input.
///
/// `text` is the exact matched literal (`<EOF>` for end of input). `position`
/// is the index of the first unit in the source the token came from (scalar
/// values or bytes); `span` is always a byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// The classification of this token.
    pub kind: TokenKind,
    /// Borrowed slice of the source input for this token.
    pub text: &'a str,
    /// Source position of the first unit.
    pub position: usize,
    /// Byte range of the token in the input.
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Create a token.
    pub fn new(kind: TokenKind, text: &'a str, position: usize, span: Span) -> Self {
        Self {
            kind,
            text,
            position,
            span,
        }
    }

    /// The end-of-input token, zero width at `offset`.
    pub fn eof(position: usize, offset: usize) -> Self {
        Self::new(TokenKind::Eof, EOF_TEXT, position, Span::empty(offset))
    }

    /// Whether this is the end-of-input token.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Whether this is an ALPHA token spelling `letter`, ignoring ASCII case.
    pub fn is_letter(&self, letter: char) -> bool {
        self.kind == TokenKind::Alpha
            && self.text.len() == 1
            && self.text.starts_with(|c: char| c.eq_ignore_ascii_case(&letter))
    }

    /// Whether this is a hex digit: DIGIT, or ALPHA in `a`-`f` / `A`-`F`.
    pub fn is_hex_digit(&self) -> bool {
        match self.kind {
            TokenKind::Digit => true,
            TokenKind::Alpha => self.text.bytes().all(|b| b.is_ascii_hexdigit()),
            _ => false,
        }
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<'{}', {}>", self.text, self.kind)
    }
}
