//! Watch command handler

use super::analysis::record_for;
use super::annotate::render_annotation;
use crate::commands::{AnnotateArgs, WatchArgs};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::watch::RecordWatcher;
use std::time::Duration;
use tracecov::analyze;

/// Execute the watch command. Runs until interrupted.
pub fn execute_watch(config: &CliConfig, args: &WatchArgs) -> CliResult<()> {
    let mut watcher =
        RecordWatcher::start(config.record_path(), Duration::from_millis(args.poll_ms))?;
    watcher.refresh()?;

    let annotate = AnnotateArgs {
        source: args.source.clone(),
        no_line_numbers: false,
    };

    loop {
        // Re-read the source too: it may have been edited since the last run
        let text = std::fs::read_to_string(&args.source)?;
        let file = analyze(&text, record_for(config, watcher.current(), &args.source));

        if args.summary_only {
            println!("{}: {}", args.source.display(), file.summary);
        } else {
            if config.color.should_color() {
                let _ = console::Term::stdout().clear_screen();
            }
            print!("{}", render_annotation(config, &annotate, &text, &file));
            println!("{}: {}", args.source.display(), file.summary);
        }

        watcher.wait_for_change()?;
    }
}
