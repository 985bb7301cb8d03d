//! Tracecov CLI: coverage gutters from sparse line-tracer records
//!
//! ## Usage
//!
//! ```bash
//! tracecov annotate pkg/mod.py                  # Annotated listing
//! tracecov summary pkg/*.py --format lcov       # LCOV for CI
//! tracecov watch pkg/mod.py                     # Re-annotate on each trace run
//! tracecov config --yaml > .tracecov.yaml       # Save effective settings
//! ```

use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracecov_cli::{handlers, Cli, CliConfig, CliResult, Commands, FileConfig, Verbosity};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let file = FileConfig::discover(cli.config_file.as_deref(), Path::new("."))?;
    let config = CliConfig::resolve(&cli, file.as_ref());
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Commands::Annotate(args) => handlers::execute_annotate(&config, &args),
        Commands::Summary(args) => handlers::execute_summary(&config, &args),
        Commands::Watch(args) => handlers::execute_watch(&config, &args),
        Commands::Config(args) => handlers::execute_config(&config, &args),
    }
}

/// Log to stderr; `RUST_LOG` wins over the `-v` count.
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
