//! Diagnostics for the LDAP filter syntax toolkit.
//!
//! Provides [`Diagnostic`], [`Severity`] and [`Span`] types used to report
//! lexical and syntax failures from the filter lexer and parser. Diagnostic
//! codes are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error: the input is not a valid filter.
    Error,
}

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first byte (0-based).
    pub start: usize,
    /// Byte offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A diagnostic message produced by the lexer or parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"LDAP2001"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the source input that this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling (`expected`, `found`, `offset`, ...).
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity: Severity::Error,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Attach machine-readable context metadata (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    let text = match id {
        codes::LEX_INVALID_CHARACTER => {
            "The input contains a character that no filter terminal accepts. \
             NUL cannot appear in a filter; write it as the escape \\00."
        }
        codes::LEX_INVALID_BYTE => {
            "The input contains a byte that cannot begin a UTF-8 sequence \
             (0xC0, 0xC1, 0xF5-0xFF or a stray continuation byte 0x80-0xBF)."
        }
        codes::LEX_MALFORMED_SEQUENCE => {
            "A UTF-8 lead byte is not followed by the continuation bytes RFC 3629 \
             requires, or the sequence is overlong or encodes a surrogate."
        }
        codes::SYNTAX_UNEXPECTED_TOKEN => {
            "The filter does not follow the RFC 4515 grammar at this point. \
             The diagnostic names the construct the parser expected."
        }
        codes::SYNTAX_TRAILING_INPUT => {
            "A complete parenthesized filter was recognized but more input follows it. \
             A filter string holds exactly one top-level filter."
        }
        codes::SYNTAX_NESTING_TOO_DEEP => {
            "And, or and not filters are nested deeper than the parser allows. \
             Flatten the filter or raise the depth limit."
        }
        codes::ESCAPE_INVALID_HEX => {
            "An assertion value escape must be a backslash followed by two hex digits, \
             e.g. \\2a for an asterisk."
        }
        codes::ESCAPE_INCOMPLETE => {
            "The assertion value ends in the middle of a \\XX escape sequence."
        }
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Span ────────────────────────────────────────────────────────────

    #[test]
    fn span_new_valid() {
        let s = Span::new(5, 10);
        assert_eq!(s.start, 5);
        assert_eq!(s.end, 10);
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn span_empty() {
        let s = Span::empty(7);
        assert_eq!(s.start, 7);
        assert_eq!(s.end, 7);
        assert!(s.is_empty());
    }

    #[test]
    #[should_panic(expected = "Span end (3) < start (5)")]
    fn span_new_inverted_panics() {
        Span::new(5, 3);
    }

    // ── Display ─────────────────────────────────────────────────────────

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error(codes::SYNTAX_UNEXPECTED_TOKEN, "expected RPAREN", None);
        assert_eq!(format!("{}", d), "error[LDAP2001]: expected RPAREN");
        assert!(d.is_error());
    }

    // ── explain() ───────────────────────────────────────────────────────

    #[test]
    fn all_codes_have_explanations() {
        for code in codes::ALL {
            assert!(
                explain(code).is_some(),
                "diagnostic code {code} has no explain() entry"
            );
        }
    }

    #[test]
    fn codes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in codes::ALL {
            assert!(seen.insert(*code), "duplicate diagnostic code {code}");
        }
    }

    #[test]
    fn diagnostic_explain_unknown() {
        let d = Diagnostic::error("UNKNOWN_CODE", "test", None);
        assert!(d.explain().is_none());
    }

    // ── Serde ───────────────────────────────────────────────────────────

    #[test]
    fn diagnostic_serde_roundtrip_with_context() {
        let d = Diagnostic::error(
            codes::SYNTAX_UNEXPECTED_TOKEN,
            "expected RPAREN",
            Some(Span::new(4, 5)),
        )
        .with_context(BTreeMap::from([
            ("expected".into(), "RPAREN".into()),
            ("found".into(), "EOF".into()),
        ]));
        let json = serde_json::to_string(&d).unwrap();
        let d2: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(d, d2);
        let e = json.find("expected").unwrap();
        let f = json.find("found").unwrap();
        assert!(e < f, "context keys should serialize in order: {json}");
    }

    #[test]
    fn diagnostic_serde_omits_none_fields() {
        let d = Diagnostic::error(codes::LEX_INVALID_BYTE, "test", None);
        let json = serde_json::to_string(&d).unwrap();
        assert!(!json.contains("span"), "None span should be omitted: {json}");
        assert!(
            !json.contains("context"),
            "None context should be omitted: {json}"
        );
    }
}
