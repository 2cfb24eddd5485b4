use core::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Lexical category of a [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum SpanKind {
    Code = 0,
    CharLiteral = 1,
    StringLiteral = 2,
    BlockComment = 3,
    LineComment = 4,
}

impl SpanKind {
    pub const ALL: [SpanKind; 5] = [
        SpanKind::Code,
        SpanKind::CharLiteral,
        SpanKind::StringLiteral,
        SpanKind::BlockComment,
        SpanKind::LineComment,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SpanKind::Code => "code",
            SpanKind::CharLiteral => "char",
            SpanKind::StringLiteral => "string",
            SpanKind::BlockComment => "block-comment",
            SpanKind::LineComment => "line-comment",
        }
    }

    pub const fn is_comment(self) -> bool {
        matches!(self, SpanKind::BlockComment | SpanKind::LineComment)
    }

    pub const fn is_literal(self) -> bool {
        matches!(self, SpanKind::CharLiteral | SpanKind::StringLiteral)
    }

    /// Parses the names produced by [`SpanKind::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

bitflags! {
    /// A set of span kinds, e.g. the kinds a word search may step over.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct SpanKinds: u8 {
        const CODE = 1;
        const CHAR_LITERAL = 2;
        const STRING_LITERAL = 4;
        const BLOCK_COMMENT = 8;
        const LINE_COMMENT = 16;

        const COMMENTS = Self::BLOCK_COMMENT.bits() | Self::LINE_COMMENT.bits();
        const LITERALS = Self::CHAR_LITERAL.bits() | Self::STRING_LITERAL.bits();
    }
}

impl From<SpanKind> for SpanKinds {
    fn from(kind: SpanKind) -> Self {
        match kind {
            SpanKind::Code => SpanKinds::CODE,
            SpanKind::CharLiteral => SpanKinds::CHAR_LITERAL,
            SpanKind::StringLiteral => SpanKinds::STRING_LITERAL,
            SpanKind::BlockComment => SpanKinds::BLOCK_COMMENT,
            SpanKind::LineComment => SpanKinds::LINE_COMMENT,
        }
    }
}

impl SpanKinds {
    pub fn includes(self, kind: SpanKind) -> bool {
        self.contains(kind.into())
    }
}

/// A typed, contiguous byte range of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Span {
    pub kind: SpanKind,
    pub start: usize,
    pub length: usize,
}

impl Span {
    pub const fn new(kind: SpanKind, start: usize, length: usize) -> Self {
        Self { kind, start, length }
    }

    /// Builds a span from a start and an (exclusive) end offset.
    pub fn between(kind: SpanKind, start: usize, end: usize) -> Self {
        Self::new(kind, start, end.saturating_sub(start))
    }

    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }

    /// The slice of `source` this span covers, or `""` if it does not fit.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.range()).unwrap_or("")
    }
}
