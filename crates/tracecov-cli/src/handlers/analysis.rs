//! Shared record loading and per-source analysis

use crate::config::CliConfig;
use crate::error::CliResult;
use std::path::Path;
use tracecov::{analyze, ClassifiedFile, RawExecutionRecord, RecordFile, TracecovError};

/// Load the configured record.
///
/// A missing record file is not fatal: every source is then analyzed
/// without raw data.
pub fn load_record(config: &CliConfig) -> CliResult<Option<RecordFile>> {
    let path = config.record_path();
    match RecordFile::load(&path) {
        Ok(record) => {
            tracing::debug!(path = %path.display(), entries = record.len(), "loaded record");
            Ok(Some(record))
        }
        Err(TracecovError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "no coverage record found");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Raw data for `source`, `None` when the record lacks a usable entry.
#[must_use]
pub fn record_for<'a>(
    config: &CliConfig,
    record: Option<&'a RecordFile>,
    source: &Path,
) -> Option<&'a RawExecutionRecord> {
    let record = record?;
    let key = config.source_key(source);
    match record.require(&key) {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(%err, "analyzing without execution data");
            None
        }
    }
}

/// Read `source` and classify it against `record`.
///
/// Returns the text alongside the result so callers can render it.
pub fn analyze_source(
    config: &CliConfig,
    record: Option<&RecordFile>,
    source: &Path,
) -> CliResult<(String, ClassifiedFile)> {
    let text = std::fs::read_to_string(source)?;
    let file = analyze(&text, record_for(config, record, source));
    tracing::debug!(source = %source.display(), summary = %file.summary, "analyzed");
    Ok((text, file))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tracecov::LineClassification::{Covered, NotCovered};

    fn project() -> (tempfile::TempDir, CliConfig) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pkg")).unwrap();
        std::fs::write(dir.path().join("pkg/m.py"), "x = 1\ny = 2\n").unwrap();
        let config = CliConfig::new().with_root(dir.path());
        (dir, config)
    }

    #[test]
    fn test_missing_record_is_not_fatal() {
        let (_dir, config) = project();
        assert!(load_record(&config).unwrap().is_none());
    }

    #[test]
    fn test_analyze_against_relative_record_path() {
        let (dir, config) = project();
        std::fs::write(config.record_path(), "pkg/m.py\n[1]\n").unwrap();

        let record = load_record(&config).unwrap();
        let (text, file) =
            analyze_source(&config, record.as_ref(), &dir.path().join("pkg/m.py")).unwrap();
        assert_eq!(text, "x = 1\ny = 2\n");
        assert_eq!(file.get(0), Some(Covered));
        assert_eq!(file.get(1), Some(NotCovered));
    }

    #[test]
    fn test_unlisted_source_has_no_data() {
        let (dir, config) = project();
        let record = RecordFile::parse("other.py\n[1]\n");
        assert!(record_for(&config, Some(&record), &dir.path().join("pkg/m.py")).is_none());
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let (dir, config) = project();
        let err = analyze_source(&config, None, &dir.path().join("nope.py")).unwrap_err();
        assert!(matches!(err, crate::CliError::Io(_)));
    }
}
