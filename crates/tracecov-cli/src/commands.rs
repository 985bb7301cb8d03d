//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tracecov: line coverage gutters from sparse line-tracer records
#[derive(Parser, Debug)]
#[command(name = "tracecov")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, global = true)]
    pub color: Option<ColorArg>,

    /// Configuration file (default: .tracecov.yaml in the working directory)
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Tracer record file
    #[arg(short, long, global = true, env = "TRACECOV_RECORD")]
    pub record: Option<PathBuf>,

    /// Project root that relative record paths resolve against
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a source file with a coverage gutter
    Annotate(AnnotateArgs),

    /// Summarize coverage for one or more source files
    Summary(SummaryArgs),

    /// Re-annotate a source file whenever the record changes
    Watch(WatchArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the annotate command
#[derive(Parser, Debug)]
pub struct AnnotateArgs {
    /// Source file to annotate
    pub source: PathBuf,

    /// Hide line numbers
    #[arg(long)]
    pub no_line_numbers: bool,
}

/// Arguments for the summary command
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Source files to summarize
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: SummaryFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Test name for LCOV reports
    #[arg(long)]
    pub test_name: Option<String>,
}

/// Summary output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SummaryFormat {
    /// Human-readable table
    #[default]
    Text,
    /// JSON document
    Json,
    /// LCOV tracefile
    Lcov,
}

/// Arguments for the watch command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Source file to re-annotate
    pub source: PathBuf,

    /// Fallback poll interval in milliseconds
    #[arg(long, default_value = "500")]
    pub poll_ms: u64,

    /// Print only the summary line on each change
    #[arg(long)]
    pub summary_only: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print the built-in defaults instead of the effective configuration
    #[arg(long)]
    pub defaults: bool,

    /// Print as YAML, ready to save as .tracecov.yaml
    #[arg(long)]
    pub yaml: bool,
}

/// Color choice argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
