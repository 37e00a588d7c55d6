//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. `LDAP1xxx` are lexical, `LDAP2xxx` syntactic and
//! `LDAP3xxx` assertion-value escape diagnostics.

// ── Lexical ─────────────────────────────────────────────────────────────

/// A character that matches no terminal of the filter grammar.
pub const LEX_INVALID_CHARACTER: &str = "LDAP1001";

/// A byte that cannot start any RFC 3629 UTF-8 sequence.
pub const LEX_INVALID_BYTE: &str = "LDAP1002";

/// A UTF-8 lead byte without its required continuation bytes.
pub const LEX_MALFORMED_SEQUENCE: &str = "LDAP1003";

// ── Syntax ──────────────────────────────────────────────────────────────

/// The lookahead token does not fit the grammar rule being recognized.
pub const SYNTAX_UNEXPECTED_TOKEN: &str = "LDAP2001";

/// A complete filter was recognized but input remains after it.
pub const SYNTAX_TRAILING_INPUT: &str = "LDAP2002";

/// Filters nest deeper than the parser's configured depth limit.
pub const SYNTAX_NESTING_TOO_DEEP: &str = "LDAP2003";

// ── Assertion-value escapes ─────────────────────────────────────────────

/// A `\` escape not followed by two hexadecimal digits.
pub const ESCAPE_INVALID_HEX: &str = "LDAP3001";

/// A `\` escape cut short by the end of the value.
pub const ESCAPE_INCOMPLETE: &str = "LDAP3002";

/// Every code defined above, in numeric order.
pub const ALL: &[&str] = &[
    LEX_INVALID_CHARACTER,
    LEX_INVALID_BYTE,
    LEX_MALFORMED_SEQUENCE,
    SYNTAX_UNEXPECTED_TOKEN,
    SYNTAX_TRAILING_INPUT,
    SYNTAX_NESTING_TOO_DEEP,
    ESCAPE_INVALID_HEX,
    ESCAPE_INCOMPLETE,
];
