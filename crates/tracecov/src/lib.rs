//! Tracecov: Line Coverage Inference for Sparse Tracer Records
//!
//! Line tracers record which lines ran, but only some of them: the last
//! physical line of a multi-line statement, and never comments, blank lines
//! or docstrings. Tracecov combines such a record with a lexical scan of the
//! current source text and assigns every line a gutter state.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    TRACECOV Architecture                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐         │
//! │   │ record     │    │ coverage   │    │ Summary /  │         │
//! │   │ (tracer    │───►│ classify   │───►│ LCOV /     │         │
//! │   │  output)   │    │ (4 passes) │    │ gutter     │         │
//! │   └────────────┘    └─────▲──────┘    └────────────┘         │
//! │                           │                                   │
//! │                     ┌─────┴──────┐                            │
//! │                     │ lexer      │◄── live source text        │
//! │                     └────────────┘                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use tracecov::{analyze, LineClassification, RecordFile};
//!
//! let record = RecordFile::parse("pkg/m.py\n[2]\n");
//! let file = analyze("x = 1\ny = 2\nz = 3", record.lookup("pkg/m.py"));
//!
//! assert_eq!(file.get(1), Some(LineClassification::Covered));
//! assert_eq!(file.summary.not_covered_count, 2);
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Per-line classification, summaries and report formatters
pub mod coverage;

/// Tokens, tokenizer and physical line table
pub mod lexer;

/// Tracer record parsing and reloading
pub mod record;

mod result;

pub use coverage::{
    analyze, classify, scan_text, seed_from_record, ClassifiedFile, LcovFormatter,
    LineClassification, LineInfo, Summary,
};
pub use lexer::{tokenize, LineIndex, Token, TokenKind};
pub use record::{RawExecutionRecord, RecordEntry, RecordFile, RecordReloader};
pub use result::{TracecovError, TracecovResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::coverage::*;
    pub use super::lexer::*;
    pub use super::record::*;
    pub use super::result::*;
}
