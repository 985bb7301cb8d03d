//! Python-flavoured tokenizer.
//!
//! Produces a gap-free token stream: every byte of the input belongs to
//! exactly one token, and tokens appear in offset order. Only the
//! distinctions the line scanner needs are made; everything else is
//! `Other`.

use super::token::{Token, TokenKind};

/// Binary operators after which a statement may continue, longest first.
const CONTINUATION_OPERATORS: &[&str] = &[
    "**", "//", "<<", ">>", "<=", ">=", "==", "!=", "+", "-", "*", "/", "%", "@", "&", "|", "^",
    "<", ">",
];

/// Non-continuing multi-byte operators that share a prefix with the above.
const OTHER_OPERATORS: &[&str] = &[
    "**=", "//=", "<<=", ">>=", "+=", "-=", "*=", "/=", "%=", "@=", "&=", "|=", "^=", "->", ":=",
];

/// Tokenize `text` into a gap-free stream.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(text);
    while tokenizer.step() {}
    tokenizer.tokens
}

#[derive(Debug)]
struct Tokenizer<'a> {
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        if self.pos > start {
            self.tokens.push(Token::new(kind, start, self.pos));
        }
    }

    fn advance_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek(0).is_some_and(&pred) {
            self.pos += 1;
        }
    }

    /// Scan one token. Returns `false` at end of input.
    fn step(&mut self) -> bool {
        let Some(byte) = self.peek(0) else {
            return false;
        };
        let start = self.pos;
        match byte {
            b' ' | b'\t' | b'\x0c' => {
                self.advance_while(|b| matches!(b, b' ' | b'\t' | b'\x0c'));
                self.push(TokenKind::Whitespace, start);
            }
            b'\n' => {
                self.pos += 1;
                self.push(TokenKind::Newline, start);
            }
            b'\r' => {
                self.pos += if self.peek(1) == Some(b'\n') { 2 } else { 1 };
                self.push(TokenKind::Newline, start);
            }
            b'#' => {
                self.advance_while(|b| b != b'\n' && b != b'\r');
                self.push(TokenKind::Comment, start);
            }
            b'\\' => {
                self.pos += 1;
                let kind = if matches!(self.peek(0), Some(b'\n' | b'\r') | None) {
                    TokenKind::ContinuationOperator
                } else {
                    TokenKind::Other
                };
                self.push(kind, start);
            }
            b'\'' | b'"' => self.scan_string(start),
            b'(' | b'[' | b'{' => {
                self.pos += 1;
                self.push(TokenKind::GroupOpen, start);
            }
            b')' | b']' | b'}' => {
                self.pos += 1;
                self.push(TokenKind::GroupClose, start);
            }
            b'0'..=b'9' => {
                self.advance_while(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.');
                self.push(TokenKind::Other, start);
            }
            b if is_word_byte(b) => self.scan_word(start),
            _ => self.scan_operator(start),
        }
        true
    }

    fn scan_word(&mut self, start: usize) {
        self.advance_while(|b| is_word_byte(b) || b.is_ascii_digit());
        let word = &self.bytes[start..self.pos];
        if word.len() <= 2
            && word.iter().all(|b| b"rRbBuUfF".contains(b))
            && matches!(self.peek(0), Some(b'\'' | b'"'))
        {
            self.scan_string(start);
            return;
        }
        let kind = match word {
            b"def" => TokenKind::Def,
            b"class" => TokenKind::Class,
            b"and" | b"or" => TokenKind::ContinuationOperator,
            _ => TokenKind::Other,
        };
        self.push(kind, start);
    }

    /// Scan a string whose prefix (if any) starts at `start` and whose
    /// opening quote is at the cursor.
    fn scan_string(&mut self, start: usize) {
        let Some(quote) = self.peek(0) else {
            return;
        };
        let triple = self.peek(1) == Some(quote) && self.peek(2) == Some(quote);
        self.pos += if triple { 3 } else { 1 };
        self.push(TokenKind::StringBegin, start);

        let body_start = self.pos;
        let mut closed = false;
        while let Some(byte) = self.peek(0) {
            if byte == b'\\' {
                self.pos = (self.pos + 2).min(self.bytes.len());
                continue;
            }
            if byte == quote {
                if !triple {
                    closed = true;
                    break;
                }
                if self.peek(1) == Some(quote) && self.peek(2) == Some(quote) {
                    closed = true;
                    break;
                }
            }
            if !triple && (byte == b'\n' || byte == b'\r') {
                break;
            }
            self.pos += 1;
        }
        self.push(TokenKind::StringLiteral, body_start);

        if closed {
            let end_start = self.pos;
            self.pos += if triple { 3 } else { 1 };
            self.push(TokenKind::StringEnd, end_start);
        }
    }

    fn scan_operator(&mut self, start: usize) {
        let tail = &self.bytes[start..];
        if let Some(op) = OTHER_OPERATORS
            .iter()
            .find(|op| tail.starts_with(op.as_bytes()))
        {
            self.pos += op.len();
            self.push(TokenKind::Other, start);
            return;
        }
        if let Some(op) = CONTINUATION_OPERATORS
            .iter()
            .find(|op| tail.starts_with(op.as_bytes()))
        {
            let kind = if matches!(*op, "*" | "**") && self.in_unpacking_position() {
                TokenKind::Other
            } else {
                TokenKind::ContinuationOperator
            };
            self.pos += op.len();
            self.push(kind, start);
            return;
        }
        // Single punctuation byte (`=`, `:`, `,`, `.`, ...)
        self.pos += 1;
        self.push(TokenKind::Other, start);
    }

    /// Whether a `*` or `**` at the cursor is a star import or an unpacking
    /// star rather than a binary operator: the previous significant token is
    /// `import`, an opening bracket or a comma.
    fn in_unpacking_position(&self) -> bool {
        let Some(prev) = self.tokens.iter().rev().find(|t| !t.kind.is_trivia()) else {
            return false;
        };
        match prev.kind {
            TokenKind::GroupOpen => true,
            TokenKind::Other => matches!(
                &self.bytes[prev.span.start..prev.span.end],
                b"import" | b","
            ),
            _ => false,
        }
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}
