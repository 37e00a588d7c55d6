//! Escape processing for RFC 4515 assertion values.
//!
//! Inside a filter string, `\XX` (a backslash and two hex digits) stands for
//! the octet `0xXX`. The parser only recognizes these escapes; the helpers
//! here check and decode the raw value text for callers that need the bytes.
//! For example, `Lu\c4\8di\c4\87` decodes to the UTF-8 bytes of `Lučić`.

use crate::grammar::diag::{Diagnostic, Span, codes};

/// Escape indicator of RFC 4515 values.
pub const ESCAPE: u8 = b'\\';

/// A malformed escape at a specific byte offset of the value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexEscapeError {
    /// The backslash is followed by something other than two hex digits.
    #[error("invalid escape sequence {text:?} at offset {offset} (expected two hex digits 0-9, A-F after '\\')")]
    InvalidHex {
        /// Byte offset of the backslash.
        offset: usize,
        /// The backslash and the two characters after it.
        text: String,
    },
    /// The value ends before two hex digits follow the backslash.
    #[error("incomplete escape sequence at offset {offset} (expected '\\XX' but the value ends)")]
    Incomplete {
        /// Byte offset of the backslash.
        offset: usize,
    },
}

impl HexEscapeError {
    /// Byte offset of the backslash that starts the bad escape.
    pub fn offset(&self) -> usize {
        match self {
            HexEscapeError::InvalidHex { offset, .. } | HexEscapeError::Incomplete { offset } => {
                *offset
            }
        }
    }

    /// Diagnostic code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            HexEscapeError::InvalidHex { .. } => codes::ESCAPE_INVALID_HEX,
            HexEscapeError::Incomplete { .. } => codes::ESCAPE_INCOMPLETE,
        }
    }

    /// Convert into a diagnostic whose span is relative to the value.
    pub fn to_diagnostic(&self, value: &str) -> Diagnostic {
        let start = self.offset();
        let end = match self {
            HexEscapeError::InvalidHex { text, .. } => start + text.len(),
            HexEscapeError::Incomplete { .. } => value.len(),
        };
        Diagnostic::error(self.code(), self.to_string(), Some(Span::new(start, end)))
    }
}

/// Check `\XX` escapes, one error per bad escape.
///
/// Does not allocate decoded output. Use [`decode_value_escapes`] when the
/// bytes are needed.
pub fn validate_value_escapes(value: &str) -> Vec<HexEscapeError> {
    let mut errors = Vec::new();
    let bytes = value.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != ESCAPE {
            i += 1;
            continue;
        }
        match escape_at(value, i) {
            Ok(_) => i += 3,
            Err(e @ HexEscapeError::Incomplete { .. }) => {
                errors.push(e);
                break;
            }
            Err(e) => {
                errors.push(e);
                i += 1;
            }
        }
    }

    errors
}

/// Decode `\XX` escapes into their octets.
///
/// Unescaped text is copied through as UTF-8. On failure every bad escape is
/// reported; scanning resumes after the backslash of each one.
pub fn decode_value_escapes(value: &str) -> Result<Vec<u8>, Vec<HexEscapeError>> {
    let mut output = Vec::with_capacity(value.len());
    let mut errors = Vec::new();
    let bytes = value.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != ESCAPE {
            output.push(bytes[i]);
            i += 1;
            continue;
        }
        match escape_at(value, i) {
            Ok(byte) => {
                output.push(byte);
                i += 3;
            }
            Err(e @ HexEscapeError::Incomplete { .. }) => {
                errors.push(e);
                break;
            }
            Err(e) => {
                errors.push(e);
                output.push(ESCAPE);
                i += 1;
            }
        }
    }

    if errors.is_empty() {
        Ok(output)
    } else {
        Err(errors)
    }
}

/// Decode the escape whose backslash is at byte `i`.
fn escape_at(value: &str, i: usize) -> Result<u8, HexEscapeError> {
    let bytes = value.as_bytes();
    let (Some(&h1), Some(&h2)) = (bytes.get(i + 1), bytes.get(i + 2)) else {
        return Err(HexEscapeError::Incomplete { offset: i });
    };
    match (hex_digit_value(h1), hex_digit_value(h2)) {
        (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
        _ => Err(HexEscapeError::InvalidHex {
            offset: i,
            text: value[i..].chars().take(3).collect(),
        }),
    }
}

/// Numeric value (0-15) of an ASCII hex digit.
fn hex_digit_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
