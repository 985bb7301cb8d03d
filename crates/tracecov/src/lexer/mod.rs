//! Lexical layer: tokens, the tokenizer and the physical line table.
//!
//! The tokenizer recognizes just enough of Python's lexical grammar to
//! tell the line scanner where statements begin, continue and end:
//! comments, string pieces, `def`/`class`, bracket groups and the
//! operators after which a statement may carry on to the next line.

mod line_index;
mod token;
mod tokenizer;

pub use line_index::LineIndex;
pub use token::{Span, Token, TokenKind};
pub use tokenizer::tokenize;
