use super::driver::{Lookahead, TokenSource};
use super::error::{Expected, LexError, ParseError};
use super::lexer::{ByteFilterLexer, ModeLexer};
use super::rfc4512::TokenKind;
use super::source::SourceMode;
use super::token::Token;

/// Default limit on nested `filter` productions.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for [`parse_with_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Character source and lexer to use.
    pub mode: SourceMode,
    /// Maximum number of nested filters (`(&(|(!(...))))` counts four).
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Recognize a complete RFC 4515 filter string.
pub fn parse_str(input: &str) -> Result<(), ParseError> {
    parse_with_config(input, &ParseConfig::default())
}

/// Recognize a complete RFC 4515 filter given as raw bytes.
///
/// Multi-byte characters are checked against RFC 3629 by the byte lexer, so
/// input that is not valid UTF-8 fails with a lexical error.
pub fn parse_bytes(input: &[u8]) -> Result<(), ParseError> {
    parse_bytes_with_depth(input, DEFAULT_MAX_DEPTH)
}

/// [`parse_bytes`] with an explicit nesting limit.
pub fn parse_bytes_with_depth(input: &[u8], max_depth: usize) -> Result<(), ParseError> {
    log::debug!("parsing {} filter bytes", input.len());
    run(ByteFilterLexer::new(input), max_depth)
}

/// Recognize a complete filter string with explicit options.
pub fn parse_with_config(input: &str, config: &ParseConfig) -> Result<(), ParseError> {
    log::debug!("parsing filter {input:?} ({} source)", config.mode);
    run(ModeLexer::new(input, config.mode), config.max_depth)
}

/// Whether `input` is a complete RFC 4515 filter.
pub fn is_match(input: &str) -> bool {
    parse_str(input).is_ok()
}

fn run<'a, L: TokenSource<'a>>(lexer: L, max_depth: usize) -> Result<(), ParseError> {
    let result = FilterParser::new(lexer)
        .map_err(ParseError::from)
        .and_then(|parser| {
            let mut parser = parser.with_max_depth(max_depth);
            parser.filter()?;
            parser.finish()
        });
    match &result {
        Ok(()) => log::debug!("filter matches"),
        Err(e) => log::debug!("filter rejected: {e}"),
    }
    result
}

// ─── Parser Implementation ─────────────────────────────────────────────────

/// Recursive-descent recognizer for the RFC 4515 filter grammar.
///
/// Each grammar rule leaves the lookahead on the first token it did not
/// consume. The first mismatch aborts the parse.
#[derive(Debug)]
pub struct FilterParser<'a, L> {
    cursor: Lookahead<'a, L>,
    depth: usize,
    max_depth: usize,
}

impl<'a, L: TokenSource<'a>> FilterParser<'a, L> {
    /// Take ownership of `lexer` and read the first lookahead token.
    pub fn new(lexer: L) -> Result<Self, LexError> {
        Ok(Self {
            cursor: Lookahead::new(lexer)?,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Limit the nesting depth of filters.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The lookahead token.
    pub fn lookahead(&self) -> &Token<'a> {
        self.cursor.peek()
    }

    /// Whether all input has been consumed.
    pub fn at_eof(&self) -> bool {
        self.cursor.at_eof()
    }

    /// Position of the lexer's character source.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Fail with [`ParseError::TrailingInput`] unless the lookahead is EOF.
    pub fn finish(&self) -> Result<(), ParseError> {
        if self.at_eof() {
            return Ok(());
        }
        let rest = self.cursor.peek();
        Err(ParseError::TrailingInput {
            found: rest.kind,
            text: rest.text.to_string(),
            position: rest.position,
            span: rest.span,
        })
    }

    /// `filter = LPAREN filtercomp RPAREN`
    pub fn filter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            let open = self.cursor.peek();
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                position: open.position,
                span: open.span,
            });
        }
        self.depth += 1;
        let result = self.parenthesized();
        self.depth -= 1;
        result
    }

    fn parenthesized(&mut self) -> Result<(), ParseError> {
        self.cursor.match_kind(TokenKind::Lparen)?;
        self.filtercomp()?;
        self.cursor.match_kind(TokenKind::Rparen)?;
        Ok(())
    }

    /// `filtercomp = and / or / not / item`
    fn filtercomp(&mut self) -> Result<(), ParseError> {
        match self.cursor.kind() {
            TokenKind::Ampersand | TokenKind::Vertbar => {
                self.cursor.consume()?;
                self.filterlist()
            }
            TokenKind::Exclamation => {
                self.cursor.consume()?;
                self.filter()
            }
            _ => self.item(),
        }
    }

    /// `filterlist = 1*filter`
    fn filterlist(&mut self) -> Result<(), ParseError> {
        loop {
            self.filter()?;
            if !self.cursor.at(TokenKind::Lparen) {
                return Ok(());
            }
        }
    }

    /// `item = simple / present / substring / extensible`
    fn item(&mut self) -> Result<(), ParseError> {
        match self.cursor.kind() {
            TokenKind::Alpha | TokenKind::Digit => {
                self.attr()?;
                self.item_tail()
            }
            _ => self.extensible2(),
        }
    }

    /// Everything after `attr`. Equality, substring and present share the
    /// `EQUALS` branch: a value, then any number of `"*" value`.
    fn item_tail(&mut self) -> Result<(), ParseError> {
        match self.cursor.kind() {
            TokenKind::Colon => self.extensible1_tail(),
            TokenKind::Tilde | TokenKind::Rangle | TokenKind::Langle => {
                self.filtertype()?;
                self.assertion_value()
            }
            TokenKind::Equals => {
                self.cursor.consume()?;
                self.assertion_value()?;
                while self.cursor.at(TokenKind::Asterisk) {
                    self.cursor.consume()?;
                    self.assertion_value()?;
                }
                Ok(())
            }
            _ => Err(self.cursor.expected(Expected::FilterType)),
        }
    }

    /// `filtertype = equal / approx / greaterorequal / lessorequal`
    fn filtertype(&mut self) -> Result<(), ParseError> {
        match self.cursor.kind() {
            TokenKind::Equals => {
                self.cursor.consume()?;
            }
            TokenKind::Tilde | TokenKind::Rangle | TokenKind::Langle => {
                self.cursor.consume()?;
                self.cursor.match_kind(TokenKind::Equals)?;
            }
            _ => return Err(self.cursor.expected(Expected::FilterType)),
        }
        Ok(())
    }

    /// `attr [dnattrs] [matchingrule] COLON EQUALS assertionvalue`, after `attr`.
    fn extensible1_tail(&mut self) -> Result<(), ParseError> {
        self.cursor.match_kind(TokenKind::Colon)?;
        self.dn_and_rule(false)?;
        self.cursor.match_kind(TokenKind::Equals)?;
        self.assertion_value()
    }

    /// `[dnattrs] matchingrule COLON EQUALS assertionvalue`
    fn extensible2(&mut self) -> Result<(), ParseError> {
        self.cursor.match_kind(TokenKind::Colon)?;
        self.dn_and_rule(true)?;
        self.cursor.match_kind(TokenKind::Equals)?;
        self.assertion_value()
    }

    /// `[ "dn" COLON ] [ oid COLON ]` with the rule required or optional.
    ///
    /// `d` `n` `:` is the dn marker. Any other keystring starting with `d` is
    /// the matching rule, already partly consumed.
    fn dn_and_rule(&mut self, rule_required: bool) -> Result<(), ParseError> {
        if !self.cursor.peek().is_letter('d') {
            return self.matching_rule(rule_required);
        }
        self.cursor.consume()?;
        if self.cursor.peek().is_letter('n') {
            self.cursor.consume()?;
            if self.cursor.at(TokenKind::Colon) {
                self.cursor.consume()?;
                return self.matching_rule(rule_required);
            }
        }
        self.keychars()?;
        self.cursor.match_kind(TokenKind::Colon)?;
        Ok(())
    }

    /// `oid COLON`, skipped when optional and the lookahead cannot start an oid.
    fn matching_rule(&mut self, required: bool) -> Result<(), ParseError> {
        if required || matches!(self.cursor.kind(), TokenKind::Alpha | TokenKind::Digit) {
            self.oid()?;
            self.cursor.match_kind(TokenKind::Colon)?;
        }
        Ok(())
    }

    /// `attributedescription = attributetype options`
    fn attr(&mut self) -> Result<(), ParseError> {
        self.oid()?;
        while self.cursor.at(TokenKind::Semi) {
            self.cursor.consume()?;
            self.option()?;
        }
        Ok(())
    }

    /// `option = 1*keychar`
    fn option(&mut self) -> Result<(), ParseError> {
        self.keychar()?;
        self.keychars()
    }

    fn keychar(&mut self) -> Result<(), ParseError> {
        if self.cursor.kind().is_keychar() {
            self.cursor.consume()?;
            Ok(())
        } else {
            Err(self.cursor.expected(Expected::KeyChar))
        }
    }

    /// `*keychar`
    fn keychars(&mut self) -> Result<(), ParseError> {
        while self.cursor.kind().is_keychar() {
            self.cursor.consume()?;
        }
        Ok(())
    }

    /// `oid = descr / numericoid`
    fn oid(&mut self) -> Result<(), ParseError> {
        match self.cursor.kind() {
            TokenKind::Alpha => self.descr(),
            TokenKind::Digit => self.numericoid(),
            _ => Err(self.cursor.expected(Expected::Oid)),
        }
    }

    /// `descr = keystring = leadkeychar *keychar`
    fn descr(&mut self) -> Result<(), ParseError> {
        self.cursor.match_kind(TokenKind::Alpha)?;
        self.keychars()
    }

    /// `numericoid = number *( DOT number )`
    fn numericoid(&mut self) -> Result<(), ParseError> {
        self.number()?;
        while self.cursor.at(TokenKind::Dot) {
            self.cursor.consume()?;
            self.number()?;
        }
        Ok(())
    }

    /// `number = DIGIT / ( LDIGIT 1*DIGIT )`
    fn number(&mut self) -> Result<(), ParseError> {
        if !self.cursor.at(TokenKind::Digit) {
            return Err(self.cursor.expected(Expected::Number));
        }
        let lead = self.cursor.consume()?;
        if lead.text != "0" {
            while self.cursor.at(TokenKind::Digit) {
                self.cursor.consume()?;
            }
        }
        Ok(())
    }

    /// `assertionvalue = valueencoding = 0*(normal / escaped)`
    fn assertion_value(&mut self) -> Result<(), ParseError> {
        loop {
            let kind = self.cursor.kind();
            if kind == TokenKind::Esc {
                self.escaped()?;
            } else if kind.is_normal() {
                self.cursor.consume()?;
            } else {
                return Ok(());
            }
        }
    }

    /// `escaped = ESC HEX HEX`
    fn escaped(&mut self) -> Result<(), ParseError> {
        self.cursor.match_kind(TokenKind::Esc)?;
        self.hex()?;
        self.hex()
    }

    fn hex(&mut self) -> Result<(), ParseError> {
        if self.cursor.peek().is_hex_digit() {
            self.cursor.consume()?;
            Ok(())
        } else {
            Err(self.cursor.expected(Expected::HexDigit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::error::SyntaxError;
    use crate::grammar::lexer::FilterLexer;

    fn syntax(input: &str) -> SyntaxError {
        match parse_str(input) {
            Err(ParseError::Syntax(e)) => e,
            other => panic!("expected syntax error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn filter_leaves_trailing_input_in_lookahead() {
        let mut parser = FilterParser::new(FilterLexer::new("(a=b)(c=d)")).unwrap();
        parser.filter().unwrap();
        assert_eq!(parser.lookahead().kind, TokenKind::Lparen);
        assert_eq!(parser.lookahead().position, 5);
        assert!(matches!(
            parser.finish(),
            Err(ParseError::TrailingInput { position: 5, .. })
        ));
    }

    #[test]
    fn not_takes_exactly_one_filter() {
        assert!(is_match("(!(a=1))"));
        let err = syntax("(!(a=1)(b=2))");
        assert_eq!(err.expected, Expected::Kind(TokenKind::Rparen));
        assert_eq!(err.found, TokenKind::Lparen);
    }

    #[test]
    fn dn_prefix_of_rule_name() {
        assert!(is_match("(cn:dnQualifierMatch:=x)"));
        assert!(is_match("(cn:d:=x)"));
        assert!(is_match("(cn:dn:=x)"));
        assert!(is_match("(cn:DN:caseExactMatch:=x)"));
        assert!(is_match("(:dn:1.2:=x)"));
    }

    #[test]
    fn extensible2_requires_rule() {
        assert_eq!(syntax("(:dn:=x)").expected, Expected::Oid);
        assert_eq!(syntax("(:=x)").expected, Expected::Oid);
    }

    #[test]
    fn numeric_oids() {
        assert!(is_match("(1=x)"));
        assert!(is_match("(0.10.200=x)"));
        let err = syntax("(01=x)");
        assert_eq!(err.expected, Expected::FilterType);
        assert_eq!(err.text, "1");
    }

    #[test]
    fn hex_digits_limited_to_a_through_f() {
        assert!(is_match("(a=\\fF)"));
        let err = syntax("(a=\\g0)");
        assert_eq!(err.expected, Expected::HexDigit);
        assert_eq!(err.text, "g");
    }

    #[test]
    fn depth_limit() {
        let config = ParseConfig {
            max_depth: 3,
            ..ParseConfig::default()
        };
        assert!(parse_with_config("(&(|(a=1)))", &config).is_ok());
        let err = parse_with_config("(&(|(!(a=1))))", &config).unwrap_err();
        assert!(matches!(
            err,
            ParseError::NestingTooDeep {
                limit: 3,
                position: 6,
                ..
            }
        ));
    }

    #[test]
    fn byte_and_code_point_agree() {
        for input in ["(sn=Łukasz)", "(cn=日本*)", "(a=\\zz)", "(a=1"] {
            let config = ParseConfig {
                mode: SourceMode::Byte,
                ..ParseConfig::default()
            };
            assert_eq!(
                parse_str(input).is_ok(),
                parse_with_config(input, &config).is_ok(),
                "{input}"
            );
        }
    }
}
