//! Tests for the code-point and byte filter lexers.

mod common;

use common::{kinds, rejoin};
use ldap_syntax_core::grammar::diag::Span;
use ldap_syntax_core::samples;
use ldap_syntax_core::{
    ByteFilterLexer, FilterLexer, LexError, TokenKind, TokenSource, tokenize, tokenize_bytes,
};

// ─── Round trip ──────────────────────────────────────────────────────────────

#[test]
fn token_texts_reconstruct_input() {
    for filter in samples::all() {
        let toks = tokenize(filter).unwrap();
        assert_eq!(rejoin(&toks), filter);
        let toks = tokenize_bytes(filter.as_bytes()).unwrap();
        assert_eq!(rejoin(&toks), filter);
    }
    let odd = "(x=é€𝄞 -<>[]%_\u{7f}\u{1})";
    assert_eq!(rejoin(&tokenize(odd).unwrap()), odd);
    assert_eq!(rejoin(&tokenize_bytes(odd.as_bytes()).unwrap()), odd);
}

#[test]
fn spans_slice_the_input() {
    let input = "(cn=Łódź*)";
    for tok in tokenize(input).unwrap() {
        if !tok.is_eof() {
            assert_eq!(&input[tok.span.start..tok.span.end], tok.text);
        }
    }
}

#[test]
fn lexers_agree_on_valid_utf8() {
    for filter in samples::all().chain(["(sn=Lučić)", "(cn=日本)"]) {
        let cp = tokenize(filter).unwrap();
        let bytes = tokenize_bytes(filter.as_bytes()).unwrap();
        assert_eq!(kinds(&cp), kinds(&bytes), "{filter}");
        let spans = |toks: &[ldap_syntax_core::Token<'_>]| -> Vec<Span> {
            toks.iter().map(|t| t.span).collect()
        };
        assert_eq!(spans(&cp), spans(&bytes), "{filter}");
    }
}

// ─── Classification ──────────────────────────────────────────────────────────

#[test]
fn every_ascii_terminal() {
    let toks = tokenize("()&|!*\\ ,.-=~<>:;[]aZ09%").unwrap();
    assert_eq!(
        kinds(&toks),
        vec![
            TokenKind::Lparen,
            TokenKind::Rparen,
            TokenKind::Ampersand,
            TokenKind::Vertbar,
            TokenKind::Exclamation,
            TokenKind::Asterisk,
            TokenKind::Esc,
            TokenKind::Space,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Hyphen,
            TokenKind::Equals,
            TokenKind::Tilde,
            TokenKind::Langle,
            TokenKind::Rangle,
            TokenKind::Colon,
            TokenKind::Semi,
            TokenKind::Lsquare,
            TokenKind::Rsquare,
            TokenKind::Alpha,
            TokenKind::Alpha,
            TokenKind::Digit,
            TokenKind::Digit,
            TokenKind::Utf1Subset,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn one_utfmb_token_per_lead_byte_range() {
    // C2-DF, E0, E1-EC, ED, EE-EF, F0, F1-F3, F4
    let chars = [
        '\u{80}',
        '\u{7FF}',
        '\u{800}',
        '\u{1000}',
        '\u{D7FF}',
        '\u{E000}',
        '\u{FFFF}',
        '\u{10000}',
        '\u{40000}',
        '\u{10FFFF}',
    ];
    for ch in chars {
        let s = ch.to_string();
        let toks = tokenize_bytes(s.as_bytes()).unwrap();
        assert_eq!(kinds(&toks), vec![TokenKind::Utfmb, TokenKind::Eof], "{ch:?}");
        assert_eq!(toks[0].span.len(), ch.len_utf8(), "{ch:?}");
        assert_eq!(toks[0].text, s);
        assert_eq!(toks[1].position, ch.len_utf8());
    }
}

#[test]
fn bad_continuations_are_malformed() {
    let cases: &[(&[u8], usize)] = &[
        (&[0xC2, 0x41], 1),
        (&[0xC2], 1),
        (&[0xE0, 0x80, 0x80], 1),
        (&[0xE1, 0x80], 2),
        (&[0xED, 0xA0, 0x80], 1),
        (&[0xEF, 0xBF, 0x7F], 2),
        (&[0xF0, 0x8F, 0x80, 0x80], 1),
        (&[0xF0, 0x90, 0x80], 3),
        (&[0xF3, 0x80, 0x80, 0xC0], 3),
        (&[0xF4, 0x90, 0x80, 0x80], 1),
    ];
    for &(bytes, fault) in cases {
        match tokenize_bytes(bytes) {
            Err(LexError::MalformedSequence {
                lead, offset: 0, fault: f, ..
            }) => {
                assert_eq!(lead, bytes[0]);
                assert_eq!(f, fault, "{bytes:02X?}");
            }
            other => panic!("{bytes:02X?}: unexpected {other:?}"),
        }
    }
}

#[test]
fn bytes_that_never_start_a_character() {
    for byte in [0x80, 0xBF, 0xC0, 0xC1, 0xF5, 0xFF] {
        assert_eq!(
            tokenize_bytes(&[b'a', byte]).unwrap_err(),
            LexError::InvalidByte { byte, offset: 1 }
        );
    }
}

#[test]
fn nul_is_rejected() {
    assert!(matches!(
        tokenize("(\0)"),
        Err(LexError::InvalidCharacter { ch: '\0', position: 1, .. })
    ));
    assert!(matches!(
        tokenize_bytes(b"(\0)"),
        Err(LexError::InvalidCharacter { ch: '\0', position: 1, .. })
    ));
}

// ─── Sequence behavior ───────────────────────────────────────────────────────

#[test]
fn token_sequence_ends_after_eof() {
    let mut it = FilterLexer::new("(a)").tokens();
    assert_eq!(it.by_ref().count(), 4);
    assert!(it.next().is_none());
}

#[test]
fn lexer_repeats_eof() {
    let mut lexer = ByteFilterLexer::new(b"x");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Alpha);
    for _ in 0..3 {
        let tok = lexer.next_token().unwrap();
        assert!(tok.is_eof());
        assert_eq!(tok.position, 1);
        assert_eq!(tok.text, "<EOF>");
    }
}

#[test]
fn token_sequence_stops_after_error() {
    let items: Vec<_> = ByteFilterLexer::new(b"ab\xffcd").tokens().collect();
    assert_eq!(items.len(), 3);
    assert!(items[2].is_err());
}

#[test]
fn tokens_serialize_with_catalogue_names() {
    let toks = tokenize("(ü").unwrap();
    let json = serde_json::to_value(&toks).unwrap();
    assert_eq!(json[0]["kind"], "LPAREN");
    assert_eq!(json[1]["kind"], "UTFMB");
    assert_eq!(json[1]["text"], "ü");
    assert_eq!(json[2]["kind"], "EOF");
    assert_eq!(json[2]["span"]["start"], 3);
}
