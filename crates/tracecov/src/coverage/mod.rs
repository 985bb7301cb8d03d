//! Line Coverage Inference
//!
//! Rebuilds a full per-line coverage picture from the sparse output of a
//! line tracer and a lexical scan of the live document.
//!
//! # Architecture
//!
//! ```text
//! record ──► RecordFile ──► seed_from_record ──┐
//!                                              ├──► classify ──► Summary
//! text ────► tokenize ────► scan_lines ────────┘
//! ```
//!
//! Every stage is a pure function of its inputs. Callers that reload the
//! record while classifying must serialize the two for the same file.

mod classification;
mod classifier;
pub mod formatters;
mod pipeline;
mod scanner;
mod summary;

pub use classification::LineClassification;
pub use classifier::{
    classify, classify_structure, correct_statement_tails, extrapolate_tail,
    promote_definition_comments,
};
pub use formatters::LcovFormatter;
pub use pipeline::{analyze, seed_from_record, ClassifiedFile};
pub use scanner::{scan_lines, scan_text, LineInfo};
pub use summary::Summary;
