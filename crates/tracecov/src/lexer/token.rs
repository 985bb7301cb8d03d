//! Token model shared by the tokenizer and the line scanner.

use serde::{Deserialize, Serialize};

/// Lexical category of a token, as far as coverage inference cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Spaces, tabs and form feeds
    Whitespace,
    /// Line terminator
    Newline,
    /// `#` comment running to end of line
    Comment,
    /// Opening quote of a string literal (prefix included)
    StringBegin,
    /// String literal body, may span lines
    StringLiteral,
    /// Closing quote of a string literal
    StringEnd,
    /// `def` keyword
    Def,
    /// `class` keyword
    Class,
    /// `(`, `[` or `{`
    GroupOpen,
    /// `)`, `]` or `}`
    GroupClose,
    /// Binary operator or trailing `\` that lets a statement continue
    ContinuationOperator,
    /// Any other executable token
    Other,
}

impl TokenKind {
    /// Whether a line starting with this token holds code.
    ///
    /// Blank and comment-only lines are the only non-executable ones.
    #[inline]
    #[must_use]
    pub const fn is_executable(self) -> bool {
        !matches!(self, Self::Whitespace | Self::Newline | Self::Comment)
    }

    /// Tokens that do not clear a pending continuation.
    #[inline]
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::Comment)
    }

    /// String pieces (begin, body or end).
    #[inline]
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(
            self,
            Self::StringBegin | Self::StringLiteral | Self::StringEnd
        )
    }

    /// `def` or `class`
    #[inline]
    #[must_use]
    pub const fn is_definition(self) -> bool {
        matches!(self, Self::Def | Self::Class)
    }
}

/// Half-open byte range `[start, end)` within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start byte offset
    pub start: usize,
    /// Exclusive end byte offset
    pub end: usize,
}

impl Span {
    /// Creates a span and normalizes offset ordering.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Span length in bytes
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` lies inside the span or is its start.
    #[must_use]
    pub const fn touches(self, offset: usize) -> bool {
        offset == self.start || (offset > self.start && offset < self.end)
    }
}

/// A lexical token with its source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token category
    pub kind: TokenKind,
    /// Byte span in the document
    pub span: Span,
}

impl Token {
    /// Creates a token value.
    #[must_use]
    pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }
}
