//! CLI configuration
//!
//! Values come from three layers, later ones winning: built-in defaults,
//! an optional YAML file and command-line flags.

use crate::commands::Cli;
use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".tracecov.yaml";

/// Record file name the tracer writes by default
pub const DEFAULT_RECORD_FILE: &str = ".coverage.lines";

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Derive from `-q` and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default `tracing` filter for this level when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::colors_enabled(),
        }
    }
}

/// Contents of a `.tracecov.yaml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Record file, relative to `root` unless absolute
    pub record: Option<PathBuf>,
    /// Project root
    pub root: Option<PathBuf>,
    /// Color choice
    pub color: Option<ColorChoice>,
}

impl FileConfig {
    /// Parse YAML text. An empty document yields the empty config.
    pub fn parse(text: &str) -> CliResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(text).map_err(|e| CliError::config(e.to_string()))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&text)
    }

    /// Load `explicit` if given, otherwise [`DEFAULT_CONFIG_FILE`] in `dir`
    /// when it exists.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> CliResult<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config file");
            return Self::load(&candidate).map(Some);
        }
        Ok(None)
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Record file, relative to `root` unless absolute
    pub record: PathBuf,
    /// Project root
    pub root: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            record: PathBuf::from(DEFAULT_RECORD_FILE),
            root: PathBuf::from("."),
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer an optional config file and the command-line flags over the
    /// defaults.
    #[must_use]
    pub fn resolve(cli: &Cli, file: Option<&FileConfig>) -> Self {
        let mut config = Self::new();
        if let Some(file) = file {
            config = config.with_file(file);
        }

        config = config.with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));
        if let Some(color) = cli.color {
            config = config.with_color(color.into());
        }
        if let Some(ref record) = cli.record {
            config = config.with_record(record);
        }
        if let Some(ref root) = cli.root {
            config = config.with_root(root);
        }
        config
    }

    /// Apply every value the file sets
    #[must_use]
    pub fn with_file(mut self, file: &FileConfig) -> Self {
        if let Some(ref record) = file.record {
            self.record.clone_from(record);
        }
        if let Some(ref root) = file.root {
            self.root.clone_from(root);
        }
        if let Some(color) = file.color {
            self.color = color;
        }
        self
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set record file
    #[must_use]
    pub fn with_record(mut self, record: impl Into<PathBuf>) -> Self {
        self.record = record.into();
        self
    }

    /// Set project root
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Effective record location
    #[must_use]
    pub fn record_path(&self) -> PathBuf {
        self.root.join(&self.record)
    }

    /// Key used to look `source` up in the record: its path relative to
    /// the project root when it lies inside it.
    #[must_use]
    pub fn source_key(&self, source: &Path) -> String {
        source
            .strip_prefix(&self.root)
            .unwrap_or(source)
            .to_string_lossy()
            .into_owned()
    }
}
