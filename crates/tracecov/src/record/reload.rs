//! Timestamp-gated record reloading.
//!
//! The tracer rewrites the record file after every run. Readers only need
//! to re-parse when its modification time has moved past the one they last
//! loaded; the last-seen timestamp lives in the reloader value, never in
//! process-wide state.

use super::RecordFile;
use crate::result::TracecovResult;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Reloads a record file when, and only when, it changes on disk.
#[derive(Debug)]
pub struct RecordReloader {
    path: PathBuf,
    last_seen: Option<SystemTime>,
    current: Option<RecordFile>,
}

impl RecordReloader {
    /// Create a reloader for `path`. Nothing is read until the first
    /// [`reload_if_changed`](Self::reload_if_changed).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_seen: None,
            current: None,
        }
    }

    /// Path of the watched record
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time of the currently loaded record
    #[must_use]
    pub const fn last_seen(&self) -> Option<SystemTime> {
        self.last_seen
    }

    /// The currently loaded record, if any
    #[must_use]
    pub const fn current(&self) -> Option<&RecordFile> {
        self.current.as_ref()
    }

    /// Re-read the record if its modification time advanced.
    ///
    /// Returns `true` when a new record was loaded. On error the previously
    /// loaded record is kept.
    pub fn reload_if_changed(&mut self) -> TracecovResult<bool> {
        let modified = std::fs::metadata(&self.path)?.modified()?;
        if self.last_seen.is_some_and(|seen| modified <= seen) {
            return Ok(false);
        }

        let record = RecordFile::load(&self.path)?;
        tracing::info!(
            path = %self.path.display(),
            entries = record.len(),
            "reloaded coverage record"
        );
        self.current = Some(record);
        self.last_seen = Some(modified);
        Ok(true)
    }

    /// Forget the loaded record so the next call reloads unconditionally.
    pub fn invalidate(&mut self) {
        self.last_seen = None;
        self.current = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    fn set_mtime(path: &Path, time: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn test_first_call_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record");
        fs::write(&path, "a.py\n[1]\n").unwrap();

        let mut reloader = RecordReloader::new(&path);
        assert!(reloader.current().is_none());
        assert!(reloader.reload_if_changed().unwrap());
        assert_eq!(reloader.current().unwrap().len(), 1);
        assert!(reloader.last_seen().is_some());
    }

    #[test]
    fn test_unchanged_file_is_not_reparsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record");
        fs::write(&path, "a.py\n[1]\n").unwrap();

        let mut reloader = RecordReloader::new(&path);
        assert!(reloader.reload_if_changed().unwrap());
        assert!(!reloader.reload_if_changed().unwrap());
    }

    #[test]
    fn test_newer_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record");
        fs::write(&path, "a.py\n[1]\n").unwrap();
        let base = SystemTime::now() - Duration::from_secs(60);
        set_mtime(&path, base);

        let mut reloader = RecordReloader::new(&path);
        assert!(reloader.reload_if_changed().unwrap());

        fs::write(&path, "a.py\n[1]\nb.py\n[2]\n").unwrap();
        set_mtime(&path, base + Duration::from_secs(5));
        assert!(reloader.reload_if_changed().unwrap());
        assert_eq!(reloader.current().unwrap().len(), 2);
    }

    #[test]
    fn test_older_timestamp_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record");
        fs::write(&path, "a.py\n[1]\n").unwrap();
        let base = SystemTime::now() - Duration::from_secs(60);
        set_mtime(&path, base);

        let mut reloader = RecordReloader::new(&path);
        assert!(reloader.reload_if_changed().unwrap());

        fs::write(&path, "b.py\n[2]\n").unwrap();
        set_mtime(&path, base - Duration::from_secs(5));
        assert!(!reloader.reload_if_changed().unwrap());
        assert!(reloader.current().unwrap().lookup("a.py").is_some());
    }

    #[test]
    fn test_missing_file_keeps_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record");
        fs::write(&path, "a.py\n[1]\n").unwrap();

        let mut reloader = RecordReloader::new(&path);
        assert!(reloader.reload_if_changed().unwrap());
        fs::remove_file(&path).unwrap();
        assert!(reloader.reload_if_changed().is_err());
        assert!(reloader.current().is_some());
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record");
        fs::write(&path, "a.py\n[1]\n").unwrap();

        let mut reloader = RecordReloader::new(&path);
        assert!(reloader.reload_if_changed().unwrap());
        reloader.invalidate();
        assert!(reloader.current().is_none());
        assert!(reloader.reload_if_changed().unwrap());
    }
}
