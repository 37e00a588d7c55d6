//! RFC 3629 byte classification used by the byte-oriented filter lexer.
//!
//! ```text
//! UTF0 = %x80-BF
//! UTF1 = %x00-7F
//! UTF2 = %xC2-DF UTF0
//! UTF3 = %xE0 %xA0-BF UTF0 / %xE1-EC 2(UTF0) /
//!        %xED %x80-9F UTF0 / %xEE-EF 2(UTF0)
//! UTF4 = %xF0 %x90-BF 2(UTF0) / %xF1-F3 3(UTF0) /
//!        %xF4 %x80-8F 2(UTF0)
//! ```

use super::rfc4512::TokenKind;

/// Byte class of `b`: one of `Utf0`..`Utf4`, or `None` for bytes that can
/// never occur in well-formed UTF-8 (`C0`, `C1`, `F5`-`FF`).
pub const fn byte_class(b: u8) -> Option<TokenKind> {
    match b {
        0x00..=0x7F => Some(TokenKind::Utf1),
        0x80..=0xBF => Some(TokenKind::Utf0),
        0xC2..=0xDF => Some(TokenKind::Utf2),
        0xE0..=0xEF => Some(TokenKind::Utf3),
        0xF0..=0xF4 => Some(TokenKind::Utf4),
        _ => None,
    }
}

/// `UTF0 = %x80-BF`
pub const fn is_utf0(b: u8) -> bool {
    matches!(b, 0x80..=0xBF)
}

/// Total length of the sequence introduced by `lead`, or `None` if `lead`
/// does not start a multi-byte sequence.
pub const fn sequence_len(lead: u8) -> Option<usize> {
    match byte_class(lead) {
        Some(TokenKind::Utf2) => Some(2),
        Some(TokenKind::Utf3) => Some(3),
        Some(TokenKind::Utf4) => Some(4),
        _ => None,
    }
}

/// Inclusive range allowed for the byte following `lead`.
///
/// The narrowed ranges after `E0`, `ED`, `F0` and `F4` exclude overlong
/// forms, UTF-16 surrogates and code points above U+10FFFF.
pub const fn second_byte_range(lead: u8) -> (u8, u8) {
    match lead {
        0xE0 => (0xA0, 0xBF),
        0xED => (0x80, 0x9F),
        0xF0 => (0x90, 0xBF),
        0xF4 => (0x80, 0x8F),
        _ => (0x80, 0xBF),
    }
}

/// Whether `b` may appear at index `index` (1-based past the lead) of the
/// sequence introduced by `lead`.
pub const fn accepts_continuation(lead: u8, index: usize, b: u8) -> bool {
    if index == 1 {
        let (lo, hi) = second_byte_range(lead);
        b >= lo && b <= hi
    } else {
        is_utf0(b)
    }
}
