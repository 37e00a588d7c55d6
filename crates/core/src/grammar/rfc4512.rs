//! Terminal-kind catalogue shared by the filter lexers and the parser.
//!
//! Names follow the common ABNF productions of RFC 4512 section 1.4 and the
//! additional single-character terminals RFC 4515 section 3 introduces.

use serde::Serialize;

/// Classification of a filter token.
///
/// `Utf0` through `Utf4` are the RFC 3629 byte classes. The byte lexer uses
/// them to classify lead and continuation bytes; they never appear as the kind
/// of an emitted token, which is `Utfmb` for every multi-byte character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    /// `%x41-5A / %x61-7A` ; "A"-"Z" / "a"-"z"
    Alpha,
    /// `%x30-39` ; "0"-"9"
    Digit,
    /// `%x2D` ; "-"
    Hyphen,
    /// `%x5C` ; "\"
    Esc,
    /// `%x20` ; " "
    Space,
    /// `%x2C` ; ","
    Comma,
    /// `%x3D` ; "="
    Equals,
    /// `%x7E` ; "~"
    Tilde,
    /// `%x3C` ; "<"
    Langle,
    /// `%x3E` ; ">"
    Rangle,
    /// `%x3A` ; ":"
    Colon,
    /// `%x3B` ; ";"
    Semi,
    /// `%x28` ; "("
    Lparen,
    /// `%x29` ; ")"
    Rparen,
    /// `%x26` ; "&"
    Ampersand,
    /// `%x7C` ; "|"
    Vertbar,
    /// `%x21` ; "!"
    Exclamation,
    /// `%x2A` ; "*"
    Asterisk,
    /// `%x2E` ; "."
    Dot,
    /// `%x5B` ; "["
    Lsquare,
    /// `%x5D` ; "]"
    Rsquare,
    /// `%x01-27 / %x2B-5B / %x5D-7F` not claimed by a more specific kind.
    Utf1Subset,
    /// A complete two-, three- or four-byte UTF-8 character.
    Utfmb,
    /// `%x80-BF` ; continuation byte
    Utf0,
    /// `%x00-7F` ; single-byte character
    Utf1,
    /// `%xC2-DF` lead byte of a two-byte sequence
    Utf2,
    /// `%xE0-EF` lead byte of a three-byte sequence
    Utf3,
    /// `%xF0-F4` lead byte of a four-byte sequence
    Utf4,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// The catalogue name of this kind, as written in the RFC grammars.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Alpha => "ALPHA",
            TokenKind::Digit => "DIGIT",
            TokenKind::Hyphen => "HYPHEN",
            TokenKind::Esc => "ESC",
            TokenKind::Space => "SPACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Equals => "EQUALS",
            TokenKind::Tilde => "TILDE",
            TokenKind::Langle => "LANGLE",
            TokenKind::Rangle => "RANGLE",
            TokenKind::Colon => "COLON",
            TokenKind::Semi => "SEMI",
            TokenKind::Lparen => "LPAREN",
            TokenKind::Rparen => "RPAREN",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::Vertbar => "VERTBAR",
            TokenKind::Exclamation => "EXCLAMATION",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Dot => "DOT",
            TokenKind::Lsquare => "LSQUARE",
            TokenKind::Rsquare => "RSQUARE",
            TokenKind::Utf1Subset => "UTF1SUBSET",
            TokenKind::Utfmb => "UTFMB",
            TokenKind::Utf0 => "UTF0",
            TokenKind::Utf1 => "UTF1",
            TokenKind::Utf2 => "UTF2",
            TokenKind::Utf3 => "UTF3",
            TokenKind::Utf4 => "UTF4",
            TokenKind::Eof => "EOF",
        }
    }

    /// `keychar = ALPHA / DIGIT / HYPHEN`
    pub const fn is_keychar(self) -> bool {
        matches!(self, TokenKind::Alpha | TokenKind::Digit | TokenKind::Hyphen)
    }

    /// Whether a token of this kind is a `normal` assertion-value character
    /// (`UTF1SUBSET / UTFMB`).
    ///
    /// Every single-character terminal except `(`, `)`, `*` and `\` lies in
    /// the UTF1SUBSET range, so it is a normal character inside a value even
    /// though the lexer gives it its own kind.
    pub const fn is_normal(self) -> bool {
        matches!(
            self,
            TokenKind::Alpha
                | TokenKind::Digit
                | TokenKind::Hyphen
                | TokenKind::Space
                | TokenKind::Comma
                | TokenKind::Equals
                | TokenKind::Tilde
                | TokenKind::Langle
                | TokenKind::Rangle
                | TokenKind::Colon
                | TokenKind::Semi
                | TokenKind::Ampersand
                | TokenKind::Vertbar
                | TokenKind::Exclamation
                | TokenKind::Dot
                | TokenKind::Lsquare
                | TokenKind::Rsquare
                | TokenKind::Utf1Subset
                | TokenKind::Utfmb
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `UTF1SUBSET = %x01-27 / %x2B-5B / %x5D-7F`
///
/// Excludes NUL, LPAREN, RPAREN, ASTERISK and ESC.
pub const fn is_utf1subset(cp: u32) -> bool {
    matches!(cp, 0x01..=0x27 | 0x2B..=0x5B | 0x5D..=0x7F)
}

/// Kind of every single-byte (ASCII) character. `None` marks NUL, which no
/// terminal accepts.
#[rustfmt::skip]
pub const ASCII_KINDS: [Option<TokenKind>; 128] = {
    let mut t = [Some(TokenKind::Utf1Subset); 128];
    t[0x00] = None;
    let mut i = b'A'; while i <= b'Z' { t[i as usize] = Some(TokenKind::Alpha); i += 1; }
    let mut i = b'a'; while i <= b'z' { t[i as usize] = Some(TokenKind::Alpha); i += 1; }
    let mut i = b'0'; while i <= b'9' { t[i as usize] = Some(TokenKind::Digit); i += 1; }
    t[b'(' as usize] = Some(TokenKind::Lparen);
    t[b')' as usize] = Some(TokenKind::Rparen);
    t[b'&' as usize] = Some(TokenKind::Ampersand);
    t[b'|' as usize] = Some(TokenKind::Vertbar);
    t[b'!' as usize] = Some(TokenKind::Exclamation);
    t[b'*' as usize] = Some(TokenKind::Asterisk);
    t[b'\\' as usize] = Some(TokenKind::Esc);
    t[b' ' as usize] = Some(TokenKind::Space);
    t[b',' as usize] = Some(TokenKind::Comma);
    t[b'.' as usize] = Some(TokenKind::Dot);
    t[b'-' as usize] = Some(TokenKind::Hyphen);
    t[b'=' as usize] = Some(TokenKind::Equals);
    t[b'~' as usize] = Some(TokenKind::Tilde);
    t[b'<' as usize] = Some(TokenKind::Langle);
    t[b'>' as usize] = Some(TokenKind::Rangle);
    t[b':' as usize] = Some(TokenKind::Colon);
    t[b';' as usize] = Some(TokenKind::Semi);
    t[b'[' as usize] = Some(TokenKind::Lsquare);
    t[b']' as usize] = Some(TokenKind::Rsquare);
    t
};

/// Classify a single byte as a filter terminal.
///
/// Returns `None` for NUL and for every byte >= 0x80; multi-byte characters
/// are recognized separately.
pub const fn classify_ascii(b: u8) -> Option<TokenKind> {
    if b < 0x80 { ASCII_KINDS[b as usize] } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_kinds() {
        assert_eq!(classify_ascii(b'('), Some(TokenKind::Lparen));
        assert_eq!(classify_ascii(b')'), Some(TokenKind::Rparen));
        assert_eq!(classify_ascii(b'<'), Some(TokenKind::Langle));
        assert_eq!(classify_ascii(b'>'), Some(TokenKind::Rangle));
        assert_eq!(classify_ascii(b'-'), Some(TokenKind::Hyphen));
        assert_eq!(classify_ascii(b'\\'), Some(TokenKind::Esc));
        assert_eq!(classify_ascii(b'['), Some(TokenKind::Lsquare));
        assert_eq!(classify_ascii(b']'), Some(TokenKind::Rsquare));
    }

    #[test]
    fn letters_and_digits() {
        for b in b'a'..=b'z' {
            assert_eq!(classify_ascii(b), Some(TokenKind::Alpha));
        }
        for b in b'A'..=b'Z' {
            assert_eq!(classify_ascii(b), Some(TokenKind::Alpha));
        }
        for b in b'0'..=b'9' {
            assert_eq!(classify_ascii(b), Some(TokenKind::Digit));
        }
    }

    #[test]
    fn catch_all_and_rejects() {
        assert_eq!(classify_ascii(0x00), None);
        assert_eq!(classify_ascii(0x01), Some(TokenKind::Utf1Subset));
        assert_eq!(classify_ascii(b'%'), Some(TokenKind::Utf1Subset));
        assert_eq!(classify_ascii(b'_'), Some(TokenKind::Utf1Subset));
        assert_eq!(classify_ascii(0x7F), Some(TokenKind::Utf1Subset));
        assert_eq!(classify_ascii(0x80), None);
        assert_eq!(classify_ascii(0xFF), None);
    }

    #[test]
    fn utf1subset_boundaries() {
        assert!(!is_utf1subset(0x00));
        assert!(is_utf1subset(0x27));
        assert!(!is_utf1subset(0x28));
        assert!(!is_utf1subset(0x29));
        assert!(!is_utf1subset(0x2A));
        assert!(is_utf1subset(0x2B));
        assert!(is_utf1subset(0x5B));
        assert!(!is_utf1subset(0x5C));
        assert!(is_utf1subset(0x5D));
        assert!(is_utf1subset(0x7F));
        assert!(!is_utf1subset(0x80));
    }

    #[test]
    fn normal_matches_utf1subset_range() {
        for b in 0x01u8..0x80 {
            let kind = classify_ascii(b).unwrap();
            assert_eq!(
                kind.is_normal(),
                is_utf1subset(u32::from(b)),
                "byte 0x{b:02X} classified {kind}"
            );
        }
        assert!(TokenKind::Utfmb.is_normal());
        assert!(!TokenKind::Eof.is_normal());
    }

    #[test]
    fn names_round_trip_through_serde() {
        let json = serde_json::to_string(&TokenKind::Utf1Subset).unwrap();
        assert_eq!(json, "\"UTF1SUBSET\"");
        let json = serde_json::to_string(&TokenKind::Langle).unwrap();
        assert_eq!(json, format!("\"{}\"", TokenKind::Langle.name()));
    }
}
