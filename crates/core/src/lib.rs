//! LDAP search filter syntax toolkit.
//!
//! Recognizes RFC 4515 filter strings with a single-token-lookahead
//! recursive-descent parser over RFC 4512 terminals. The main entry points
//! are [`parse_str`] and [`parse_bytes`]; [`tokenize`] exposes the lexer and
//! [`hex_escape`] decodes `\XX` escapes in assertion values.

#![warn(missing_docs)]

/// Filter grammar: character sources, lexers, parser and error types.
pub mod grammar;
/// Escape processing for assertion values.
pub mod hex_escape;
/// Example filters from RFC 4515 and from the field.
pub mod samples;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Parser
pub use grammar::parser::{
    DEFAULT_MAX_DEPTH, FilterParser, ParseConfig, is_match, parse_bytes, parse_bytes_with_depth,
    parse_str, parse_with_config,
};

// Lexer
pub use grammar::driver::{Lookahead, TokenSource, Tokens};
pub use grammar::lexer::{ByteFilterLexer, FilterLexer, ModeLexer, tokenize, tokenize_bytes};
pub use grammar::rfc4512::TokenKind;
pub use grammar::source::SourceMode;
pub use grammar::token::Token;

// Errors
pub use grammar::error::{Expected, LexError, ParseError, SyntaxError};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{Diagnostic, Severity, Span, codes};
