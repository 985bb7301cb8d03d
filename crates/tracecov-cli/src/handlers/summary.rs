//! Summary command handler

use super::analysis::{analyze_source, load_record};
use crate::commands::SummaryArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::render_summary;
use tracecov::ClassifiedFile;

/// Execute the summary command
pub fn execute_summary(config: &CliConfig, args: &SummaryArgs) -> CliResult<()> {
    let files = collect_files(config, args)?;
    let report = render_summary(&files, args.format, args.test_name.as_deref())?;

    match args.output {
        Some(ref path) => {
            std::fs::write(path, report)?;
            if !config.verbosity.is_quiet() {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => print!("{report}"),
    }
    Ok(())
}

/// Analyze every source named in `args`, keyed by its record path
pub fn collect_files(
    config: &CliConfig,
    args: &SummaryArgs,
) -> CliResult<Vec<(String, ClassifiedFile)>> {
    let record = load_record(config)?;
    args.sources
        .iter()
        .map(|source| {
            let (_, file) = analyze_source(config, record.as_ref(), source)?;
            Ok((config.source_key(source), file))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::SummaryFormat;

    #[test]
    fn test_collect_and_write_lcov() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.py"), "x = 1\ny = 2").unwrap();
        std::fs::write(dir.path().join("b.py"), "z = 3").unwrap();
        let config = CliConfig::new().with_root(dir.path());
        std::fs::write(config.record_path(), "a.py\n[2]\nb.py\n[1]\n").unwrap();

        let out = dir.path().join("cov.lcov");
        let args = SummaryArgs {
            sources: vec![dir.path().join("a.py"), dir.path().join("b.py")],
            format: SummaryFormat::Lcov,
            output: Some(out.clone()),
            test_name: None,
        };

        let files = collect_files(&config, &args).unwrap();
        assert_eq!(files[0].0, "a.py");
        assert_eq!(files[0].1.summary.executed_count, 1);

        execute_summary(&config.with_verbosity(crate::Verbosity::Quiet), &args).unwrap();
        let lcov = std::fs::read_to_string(out).unwrap();
        assert!(lcov.contains("SF:a.py\nDA:1,0\nDA:2,1\n"));
        assert!(lcov.contains("SF:b.py\nDA:1,1\n"));
    }
}
