//! Typed lexical and syntax failures.
//!
//! Each error knows its diagnostic code and byte span so callers can turn it
//! into a [`Diagnostic`] without re-inspecting the input.

use std::collections::BTreeMap;

use super::diag::{Diagnostic, Span, codes};
use super::rfc4512::TokenKind;
use super::token::Token;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// The lexer met a symbol it cannot classify. Fatal for the parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A character no terminal accepts (NUL).
    #[error("invalid character: {ch:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Source position of the character.
        position: usize,
        /// Byte offset of the character.
        offset: usize,
    },

    /// A byte that cannot start a UTF-8 sequence.
    #[error("invalid byte: 0x{byte:02X} at offset {offset}")]
    InvalidByte {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the byte.
        offset: usize,
    },

    /// A lead byte whose continuation bytes are missing or out of range.
    #[error("malformed UTF-8 sequence: lead byte 0x{lead:02X} at offset {offset} needs {len} bytes")]
    MalformedSequence {
        /// The lead byte of the sequence.
        lead: u8,
        /// Byte offset of the lead byte.
        offset: usize,
        /// Length the lead byte announces.
        len: usize,
        /// Byte offset of the first byte that broke the sequence.
        fault: usize,
    },
}

impl LexError {
    /// Source position of the failure (scalar index or byte offset).
    pub fn position(&self) -> usize {
        match self {
            LexError::InvalidCharacter { position, .. } => *position,
            LexError::InvalidByte { offset, .. } => *offset,
            LexError::MalformedSequence { fault, .. } => *fault,
        }
    }

    /// Byte span of the offending input.
    pub fn span(&self) -> Span {
        match self {
            LexError::InvalidCharacter { ch, offset, .. } => {
                Span::new(*offset, *offset + ch.len_utf8())
            }
            LexError::InvalidByte { offset, .. } => Span::new(*offset, *offset + 1),
            LexError::MalformedSequence { offset, fault, .. } => Span::new(*offset, *fault),
        }
    }

    /// Diagnostic code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            LexError::InvalidCharacter { .. } => codes::LEX_INVALID_CHARACTER,
            LexError::InvalidByte { .. } => codes::LEX_INVALID_BYTE,
            LexError::MalformedSequence { .. } => codes::LEX_MALFORMED_SEQUENCE,
        }
    }

    /// Convert into a diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let symbol = match self {
            LexError::InvalidCharacter { ch, .. } => format!("U+{:04X}", u32::from(*ch)),
            LexError::InvalidByte { byte, .. } => format!("0x{byte:02X}"),
            LexError::MalformedSequence { lead, .. } => format!("0x{lead:02X}"),
        };
        Diagnostic::error(self.code(), self.to_string(), Some(self.span())).with_context(ctx!(
            "symbol" => symbol,
            "position" => self.position().to_string(),
        ))
    }
}

/// The grammar construct a rule was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    /// A specific terminal.
    Kind(TokenKind),
    /// `filtertype = equal / approx / greaterorequal / lessorequal`, or the
    /// `:` of an extensible match.
    FilterType,
    /// `oid = descr / numericoid`
    Oid,
    /// `number = DIGIT / ( LDIGIT 1*DIGIT )`
    Number,
    /// `keychar = ALPHA / DIGIT / HYPHEN`
    KeyChar,
    /// `HEX = DIGIT / %x41-46 / %x61-66`
    HexDigit,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{kind}"),
            Expected::FilterType => f.write_str("filtertype (=, ~=, >=, <=) or ':'"),
            Expected::Oid => f.write_str("descr or numericoid"),
            Expected::Number => f.write_str("number"),
            Expected::KeyChar => f.write_str("ALPHA / DIGIT / HYPHEN"),
            Expected::HexDigit => f.write_str("HEX"),
        }
    }
}

/// The lookahead token does not fit the rule being recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expecting {expected}: found <'{text}', {found}> at position {position}")]
pub struct SyntaxError {
    /// What the rule required.
    pub expected: Expected,
    /// Kind of the lookahead token.
    pub found: TokenKind,
    /// Literal text of the lookahead token.
    pub text: String,
    /// Source position of the lookahead token.
    pub position: usize,
    /// Byte span of the lookahead token.
    pub span: Span,
}

impl SyntaxError {
    /// Build from the offending lookahead token.
    pub fn new(expected: Expected, found: &Token<'_>) -> Self {
        Self {
            expected,
            found: found.kind,
            text: found.text.to_string(),
            position: found.position,
            span: found.span,
        }
    }

    /// Convert into a diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(
            codes::SYNTAX_UNEXPECTED_TOKEN,
            self.to_string(),
            Some(self.span),
        )
        .with_context(ctx!(
            "expected" => self.expected.to_string(),
            "found" => self.found.name(),
            "text" => self.text.clone(),
            "position" => self.position.to_string(),
        ))
    }
}

/// Any failure of a filter parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Lexical failure.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Syntax failure.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Filters nest deeper than the configured limit.
    #[error("filter nesting exceeds {limit} levels at position {position}")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
        /// Source position of the `(` that crossed the limit.
        position: usize,
        /// Byte span of that `(`.
        span: Span,
    },

    /// A complete filter was recognized but input remains.
    #[error("filter does not match completely, rest <'{text}', {found}> at position {position}")]
    TrailingInput {
        /// Kind of the first unconsumed token.
        found: TokenKind,
        /// Literal text of the first unconsumed token.
        text: String,
        /// Source position of the first unconsumed token.
        position: usize,
        /// Byte span of the first unconsumed token.
        span: Span,
    },
}

impl ParseError {
    /// Source position of the failure.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::Syntax(e) => e.position,
            ParseError::NestingTooDeep { position, .. }
            | ParseError::TrailingInput { position, .. } => *position,
        }
    }

    /// Byte span of the offending input.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span(),
            ParseError::Syntax(e) => e.span,
            ParseError::NestingTooDeep { span, .. } | ParseError::TrailingInput { span, .. } => {
                *span
            }
        }
    }

    /// Whether this is a lexical failure.
    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lex(_))
    }

    /// Diagnostic code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Lex(e) => e.code(),
            ParseError::Syntax(_) => codes::SYNTAX_UNEXPECTED_TOKEN,
            ParseError::NestingTooDeep { .. } => codes::SYNTAX_NESTING_TOO_DEEP,
            ParseError::TrailingInput { .. } => codes::SYNTAX_TRAILING_INPUT,
        }
    }

    /// Convert into a diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Lex(e) => e.to_diagnostic(),
            ParseError::Syntax(e) => e.to_diagnostic(),
            ParseError::NestingTooDeep { limit, position, span } => {
                Diagnostic::error(self.code(), self.to_string(), Some(*span)).with_context(ctx!(
                    "limit" => limit.to_string(),
                    "position" => position.to_string(),
                ))
            }
            ParseError::TrailingInput {
                found,
                text,
                position,
                span,
            } => Diagnostic::error(self.code(), self.to_string(), Some(*span)).with_context(ctx!(
                "found" => found.name(),
                "text" => text.clone(),
                "position" => position.to_string(),
            )),
        }
    }
}
