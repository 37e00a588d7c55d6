/// Re-exports from the diagnostics crate.
pub mod diag;
/// Single-token-lookahead driver shared by every grammar.
pub mod driver;
/// Lexical and syntax error types.
pub mod error;
/// Filter lexers over code points and raw bytes.
pub mod lexer;
/// Recursive-descent recognizer for RFC 4515 filters.
pub mod parser;
/// RFC 4512 terminal kinds and ASCII classification.
pub mod rfc4512;
/// Character sources (code-point and byte cursors).
pub mod source;
/// The token type produced by the lexers.
pub mod token;
/// RFC 3629 byte classes.
pub mod utf8;
