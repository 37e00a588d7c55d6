//! Character sources: a cursor over the input that exposes the current
//! symbol and advances one unit at a time.
//!
//! Reading past the end never fails; the source keeps reporting end of input.

/// Which character source (and therefore which lexer) to use for a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceMode {
    /// Iterate Unicode scalar values of a `&str`.
    #[default]
    CodePoint,
    /// Iterate raw bytes; the lexer assembles multi-byte sequences itself.
    Byte,
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceMode::CodePoint => f.write_str("code-point"),
            SourceMode::Byte => f.write_str("byte"),
        }
    }
}

/// A cursor over input symbols.
pub trait CharSource {
    /// The unit the source iterates (`char` or `u8`).
    type Unit: Copy + Eq + std::fmt::Debug;

    /// The symbol at the cursor, or `None` at end of input.
    fn current(&self) -> Option<Self::Unit>;

    /// Move forward exactly one unit. A no-op at end of input.
    fn advance(&mut self);

    /// Zero-based index of the cursor, in units.
    fn position(&self) -> usize;

    /// Byte offset of the cursor into the input.
    fn byte_offset(&self) -> usize;

    /// Whether the cursor has reached the end of input.
    fn is_eof(&self) -> bool {
        self.current().is_none()
    }
}

/// Source iterating the Unicode scalar values of a string.
#[derive(Debug, Clone)]
pub struct CodePointSource<'a> {
    input: &'a str,
    position: usize,
    offset: usize,
    current: Option<char>,
}

impl<'a> CodePointSource<'a> {
    /// Create a source positioned at the first character of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            offset: 0,
            current: input.chars().next(),
        }
    }

    /// The complete input.
    pub fn input(&self) -> &'a str {
        self.input
    }
}

impl CharSource for CodePointSource<'_> {
    type Unit = char;

    fn current(&self) -> Option<char> {
        self.current
    }

    fn advance(&mut self) {
        let Some(ch) = self.current else {
            return;
        };
        self.offset += ch.len_utf8();
        self.position += 1;
        self.current = self.input[self.offset..].chars().next();
    }

    fn position(&self) -> usize {
        self.position
    }

    fn byte_offset(&self) -> usize {
        self.offset
    }
}

/// Source iterating raw bytes.
#[derive(Debug, Clone)]
pub struct ByteSource<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> ByteSource<'a> {
    /// Create a source positioned at the first byte of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, position: 0 }
    }

    /// The complete input.
    pub fn input(&self) -> &'a [u8] {
        self.input
    }
}

impl CharSource for ByteSource<'_> {
    type Unit = u8;

    fn current(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn position(&self) -> usize {
        self.position
    }

    fn byte_offset(&self) -> usize {
        self.position
    }
}
