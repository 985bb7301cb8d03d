//! Tracecov CLI Library
//!
//! Command-line interface for tracecov: annotated listings, summaries and
//! LCOV reports from sparse line-tracer records.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;
pub mod watch;

pub use commands::{
    AnnotateArgs, Cli, ColorArg, Commands, ConfigArgs, SummaryArgs, SummaryFormat, WatchArgs,
};
pub use config::{
    CliConfig, ColorChoice, FileConfig, Verbosity, DEFAULT_CONFIG_FILE, DEFAULT_RECORD_FILE,
};
pub use error::{CliError, CliResult};
pub use output::{gutter_marker, render_summary, FileReport, GutterRenderer, SummaryReport};
pub use watch::RecordWatcher;
