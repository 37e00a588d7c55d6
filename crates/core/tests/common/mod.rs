//! Shared test helpers for `ldap_syntax_core` integration tests.

#![allow(unreachable_pub)]

use ldap_syntax_core::{
    Diagnostic, LexError, ParseError, SyntaxError, Token, TokenKind, parse_str,
};

// ─── Parse-result helpers ────────────────────────────────────────────────────

/// Parse `input`, panicking with the rendered error if it is rejected.
#[allow(dead_code)]
pub fn assert_accepts(input: &str) {
    if let Err(e) = parse_str(input) {
        panic!("expected {input:?} to parse, got: {e}");
    }
}

/// Parse `input` and return its syntax error.
#[allow(dead_code)]
pub fn syntax_error(input: &str) -> SyntaxError {
    match parse_str(input) {
        Err(ParseError::Syntax(e)) => e,
        other => panic!("expected syntax error for {input:?}, got {other:?}"),
    }
}

/// Parse `input` and return its lexical error.
#[allow(dead_code)]
pub fn lex_error(input: &str) -> LexError {
    match parse_str(input) {
        Err(ParseError::Lex(e)) => e,
        other => panic!("expected lexical error for {input:?}, got {other:?}"),
    }
}

// ─── Token helpers ───────────────────────────────────────────────────────────

/// Kinds of a token list.
#[allow(dead_code)]
pub fn kinds(tokens: &[Token<'_>]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

/// Concatenated token texts, excluding the end-of-input token.
#[allow(dead_code)]
pub fn rejoin(tokens: &[Token<'_>]) -> String {
    tokens
        .iter()
        .filter(|t| !t.is_eof())
        .map(|t| t.text)
        .collect()
}

// ─── Diagnostic helpers ──────────────────────────────────────────────────────

/// Assert a diagnostic's span lies within an input of `len` bytes.
#[allow(dead_code)]
pub fn assert_span_in_bounds(diag: &Diagnostic, len: usize) {
    if let Some(span) = diag.span {
        assert!(
            span.start <= span.end,
            "Diagnostic span start ({}) > end ({}): {:?}",
            span.start,
            span.end,
            diag
        );
        assert!(
            span.end <= len,
            "Diagnostic span end ({}) > input length ({}): {:?}",
            span.end,
            len,
            diag
        );
    }
}
